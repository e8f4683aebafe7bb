pub mod users_client;

pub use users_client::{ClientBuildError, HttpUsersClient};
