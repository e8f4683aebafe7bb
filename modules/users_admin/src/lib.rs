// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{client, error, model};

// === CONFIGURATION ===
pub mod config;
pub use config::UsersAdminConfig;

// === COMPONENTS ===
// Domain logic is transport-agnostic; `infra` talks HTTP and `gateways` wraps
// any `UsersApi` with cross-cutting behavior.
pub mod domain;
pub mod gateways;
pub mod infra;

/// Name of this module's section in the application config bag.
pub const MODULE_NAME: &str = "users_admin";
