//! Image retrieval and caching infrastructure.
//!
//! This module provides:
//! - CDN allow-listing and proxy URL construction
//! - Upstream fetching with a browser-like client
//! - Persistent disk caching keyed by URL hash
//! - The server-side proxy combining the two
//! - The in-memory client cache with retry and backoff

pub mod cdn;
pub mod client_cache;
pub mod content_type;
pub mod disk_cache;
pub mod http_fetcher;
pub mod object_store;
pub mod proxy;
pub mod upstream;

pub use cdn::{CdnAllowList, DEFAULT_ALLOWED_HOSTS, proxy_url};
pub use client_cache::{ClientCacheConfig, ClientCacheStats, ClientImageCache};
pub use disk_cache::{CachedFileInfo, CachedImage, DiskCacheStats, DiskImageCache};
pub use http_fetcher::HttpImageFetcher;
pub use object_store::ObjectUrlStore;
pub use proxy::{ImageProxy, ImageSource, ProxiedImage, ProxyOutcome};
pub use upstream::UpstreamFetcher;
