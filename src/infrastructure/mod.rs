//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image fetching, proxying and caching.
pub mod image;

pub use config::{AppConfig, CliArgs, ConfigError, ConfigLoader, LogLevel};
pub use image::{
    CdnAllowList, ClientCacheConfig, ClientImageCache, DiskImageCache, HttpImageFetcher,
    ImageProxy, UpstreamFetcher,
};
