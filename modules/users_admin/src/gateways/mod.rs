pub mod intercepted;

pub use intercepted::InterceptedUsersClient;
