//! Application configuration.

pub mod app_config;
/// Command-line parsing.
pub mod args;
/// Config file discovery and parsing.
pub mod loader;

pub use app_config::{
    AppConfig, BatchSection, ClientSection, LogLevel, ServerSection, UpstreamSection,
};
pub use args::CliArgs;
pub use loader::{ConfigError, ConfigLoader};
