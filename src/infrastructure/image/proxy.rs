//! Server-side proxy: disk cache in front of the upstream CDN.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use super::cdn::CdnAllowList;
use super::content_type::DEFAULT_CONTENT_TYPE;
use super::disk_cache::{DiskCacheStats, DiskImageCache};
use crate::domain::entities::CacheKey;
use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetchPort;

/// Where a proxied image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the disk cache.
    DiskCache,
    /// Downloaded from the CDN during this request.
    Upstream,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DiskCache => write!(f, "disk"),
            Self::Upstream => write!(f, "upstream"),
        }
    }
}

/// Image body ready to be served.
#[derive(Debug, Clone)]
pub struct ProxiedImage {
    /// Image bytes.
    pub bytes: Bytes,
    /// Content type header value.
    pub content_type: String,
    /// Quoted entity tag.
    pub etag: String,
    /// Where the bytes came from.
    pub source: ImageSource,
}

/// Result of a proxy request.
#[derive(Debug, Clone)]
pub enum ProxyOutcome {
    /// The client's copy is current.
    NotModified {
        /// Quoted entity tag.
        etag: String,
    },
    /// Bytes to send.
    Image(ProxiedImage),
}

/// Proxies allow-listed CDN images through the disk cache.
pub struct ImageProxy {
    upstream: Arc<dyn ImageFetchPort>,
    disk_cache: DiskImageCache,
    allow_list: CdnAllowList,
}

impl std::fmt::Debug for ImageProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageProxy")
            .field("disk_cache", &self.disk_cache)
            .field("allow_list", &self.allow_list)
            .finish_non_exhaustive()
    }
}

impl ImageProxy {
    /// Creates a proxy.
    #[must_use]
    pub fn new(
        upstream: Arc<dyn ImageFetchPort>,
        disk_cache: DiskImageCache,
        allow_list: CdnAllowList,
    ) -> Self {
        Self {
            upstream,
            disk_cache,
            allow_list,
        }
    }

    /// Serves `url`, from disk when possible.
    ///
    /// A disk hit whose entity tag matches `if_none_match` short-circuits to
    /// [`ProxyOutcome::NotModified`] without reading the file. A miss is
    /// fetched upstream and stored before it is returned.
    ///
    /// # Errors
    /// `InvalidRequest` for URLs outside the allow-list; `RateLimited` or
    /// `UpstreamFailure` from the CDN; `StorageFailure` from the disk.
    pub async fn get(
        &self,
        url: &str,
        if_none_match: Option<&str>,
    ) -> Result<ProxyOutcome, FetchError> {
        if !self.allow_list.is_allowed(url) {
            return Err(FetchError::invalid_request(
                "Only allow-listed CDN images are supported",
            ));
        }

        let key = CacheKey::from_url(url);
        let etag = key.etag();

        if let Some(path) = self.disk_cache.find(&key).await? {
            if if_none_match.is_some_and(|header| etag_matches(header, &etag)) {
                debug!(url = %url, "Client copy is current");
                return Ok(ProxyOutcome::NotModified { etag });
            }
            if let Some(cached) = self.disk_cache.read_at(&path).await? {
                info!(url = %url, "Served cached image");
                return Ok(ProxyOutcome::Image(ProxiedImage {
                    bytes: cached.bytes,
                    content_type: cached.content_type.to_string(),
                    etag,
                    source: ImageSource::DiskCache,
                }));
            }
        }

        info!(url = %url, "Downloading image");
        let fetched = self.upstream.fetch(url).await?;
        let content_type = fetched.content_type.as_deref();
        self.disk_cache
            .store(&key, url, &fetched.bytes, content_type)
            .await?;
        info!(url = %url, size = fetched.bytes.len(), "Cached image");

        Ok(ProxyOutcome::Image(ProxiedImage {
            content_type: content_type.unwrap_or(DEFAULT_CONTENT_TYPE).to_string(),
            bytes: fetched.bytes,
            etag,
            source: ImageSource::Upstream,
        }))
    }

    /// Enumerates the disk cache.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be read.
    pub async fn stats(&self) -> Result<DiskCacheStats, FetchError> {
        self.disk_cache.stats().await
    }

    /// Empties the disk cache, returning the number of files removed.
    ///
    /// # Errors
    /// Returns error if a file cannot be removed.
    pub async fn clear(&self) -> Result<usize, FetchError> {
        self.disk_cache.clear().await
    }
}

/// Checks an `If-None-Match` header value against `etag`.
fn etag_matches(header: &str, etag: &str) -> bool {
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}
