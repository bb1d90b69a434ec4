//! Domain types for image retrieval and caching.

use bytes::Bytes;
use tokio::time::Instant;

use crate::domain::errors::FetchError;

/// Content-addressed identifier for a source URL.
/// Stable across restarts so disk entries survive a server restart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for a source URL by hashing the URL string.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }

    /// Returns the inner hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the quoted entity tag used for conditional requests.
    #[must_use]
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locally resolvable handle to decoded image bytes.
///
/// Minted by the client cache, which stays the sole owner until it is
/// revoked by a cache clear.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Mints a fresh, unique object URL.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("blob:portfolio/{}", uuid::Uuid::new_v4()))
    }

    /// Returns the URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a UI element should display for a requested URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Cached bytes, resolvable through the owning cache.
    Object(ObjectUrl),
    /// Placeholder image path used after retries are exhausted.
    Fallback(String),
}

impl ImageRef {
    /// Returns the string a UI element would use as its source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Object(url) => url.as_str(),
            Self::Fallback(path) => path,
        }
    }

    /// Returns true if this is the placeholder.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Returns the object URL, if any.
    #[must_use]
    pub const fn object_url(&self) -> Option<&ObjectUrl> {
        match self {
            Self::Object(url) => Some(url),
            Self::Fallback(_) => None,
        }
    }
}

/// Image payload returned by a fetch.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// Raw image bytes.
    pub bytes: Bytes,
    /// Declared content type, if the source sent one.
    pub content_type: Option<String>,
}

impl FetchedImage {
    /// Creates a payload.
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }
}

/// Per-URL state tracked by the client cache. A URL with no state is uncached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlState {
    /// A fetch has been issued; `attempt` is zero-indexed.
    Pending {
        /// Attempt number of the most recent fetch.
        attempt: u32,
        /// When that attempt started.
        last_attempt: Instant,
    },
    /// Fetched successfully. Terminal until the cache is cleared.
    Cached(ObjectUrl),
    /// Retry budget exhausted. Only a manual retry leaves this state.
    Failed {
        /// When the final attempt started.
        last_attempt: Instant,
        /// Error from the final attempt.
        error: FetchError,
    },
}

impl UrlState {
    /// Start time of the most recent attempt, if one was made.
    #[must_use]
    pub const fn last_attempt(&self) -> Option<Instant> {
        match self {
            Self::Pending { last_attempt, .. } | Self::Failed { last_attempt, .. } => {
                Some(*last_attempt)
            }
            Self::Cached(_) => None,
        }
    }

    /// Returns true if the URL is cached.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }

    /// Returns true if the URL exhausted its retries.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
