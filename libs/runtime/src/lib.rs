//! Process-level runtime helpers shared by the users-admin binaries:
//! layered configuration loading and per-subsystem logging.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, AppSection, CliArgs, ConfigProvider, LoggingConfig,
    Section,
};
