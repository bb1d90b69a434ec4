//! Application configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::application::services::batch_loader::{
    BatchConfig, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE,
};
use crate::infrastructure::image::cdn::DEFAULT_ALLOWED_HOSTS;
use crate::infrastructure::image::client_cache::{
    ClientCacheConfig, DEFAULT_BASE_DELAY, DEFAULT_FALLBACK_IMAGE, DEFAULT_MAX_RETRIES,
};
use crate::infrastructure::image::upstream::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::infrastructure::image::CdnAllowList;

pub(super) const APP_NAME: &str = "portfolio-images";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Upstream CDN settings.
    #[serde(default)]
    pub upstream: UpstreamSection,

    /// Client cache settings.
    #[serde(default)]
    pub client: ClientSection,

    /// Batch loading settings.
    #[serde(default)]
    pub batch: BatchSection,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding cached proxy images.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Site directory to serve statically, if any.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Public base URL used in startup logs.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cache_dir: default_cache_dir(),
            static_dir: None,
            public_base_url: None,
        }
    }
}

/// Upstream fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSection {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent to the CDN.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// CDN hosts the proxy will fetch from.
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<String>,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            allowed_hosts: default_allowed_hosts(),
        }
    }
}

/// Client cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSection {
    /// Total fetch attempts per URL.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff base in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Local proxy endpoint that CDN requests are routed through.
    #[serde(default = "default_proxy_endpoint")]
    pub proxy_endpoint: String,

    /// Placeholder shown for failed images.
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            proxy_endpoint: default_proxy_endpoint(),
            fallback_image: default_fallback_image(),
        }
    }
}

/// Batch loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSection {
    /// Images per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between batches in milliseconds.
    #[serde(default = "default_batch_delay_ms")]
    pub delay_ms: u64,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            delay_ms: default_batch_delay_ms(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache/images")
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_allowed_hosts() -> Vec<String> {
    DEFAULT_ALLOWED_HOSTS.iter().map(ToString::to_string).collect()
}

const fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

#[allow(clippy::cast_possible_truncation)]
const fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY.as_millis() as u64
}

fn default_proxy_endpoint() -> String {
    "http://localhost:3000/proxy/image".to_string()
}

fn default_fallback_image() -> String {
    DEFAULT_FALLBACK_IMAGE.to_string()
}

const fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

#[allow(clippy::cast_possible_truncation)]
const fn default_batch_delay_ms() -> u64 {
    DEFAULT_BATCH_DELAY.as_millis() as u64
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(host) = args.host {
            self.server.host = host;
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(cache_dir) = args.cache_dir {
            self.server.cache_dir = cache_dir;
        }
        if let Some(static_dir) = args.static_dir {
            self.server.static_dir = Some(static_dir);
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    /// Base URL logged at startup.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        self.server
            .public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.server.port))
    }

    /// Upstream request timeout.
    #[must_use]
    pub const fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }

    /// CDN allow-list built from `[upstream] allowed_hosts`.
    #[must_use]
    pub fn allow_list(&self) -> CdnAllowList {
        CdnAllowList::new(&self.upstream.allowed_hosts)
    }

    /// Settings for a client-side image cache.
    #[must_use]
    pub fn client_cache_config(&self) -> ClientCacheConfig {
        ClientCacheConfig {
            max_retries: self.client.max_retries,
            base_delay: Duration::from_millis(self.client.base_delay_ms),
            fallback_image: self.client.fallback_image.clone(),
        }
    }

    /// Settings for the throttled batch loader.
    #[must_use]
    pub const fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            batch_size: self.batch.batch_size,
            delay_between_batches: Duration::from_millis(self.batch.delay_ms),
        }
    }
}
