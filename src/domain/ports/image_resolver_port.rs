//! Port definition for resolving image URLs into displayable references.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::domain::entities::ImageRef;
use crate::domain::errors::FetchError;

/// Progress notifications for a single resolve call.
/// Every method defaults to a no-op.
pub trait ImageObserver: Send + Sync {
    /// The image was fetched and cached.
    fn on_load(&self, _url: &str, _image: &ImageRef) {}

    /// The image is permanently failed; the fallback is in use.
    fn on_error(&self, _url: &str, _error: &FetchError) {}

    /// Another attempt will run after `delay`.
    fn on_retry(&self, _url: &str, _attempt: u32, _delay: Duration) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ImageObserver for NoopObserver {}

/// Outcome of a resolve call.
#[derive(Debug)]
pub enum Resolution {
    /// A final reference is available now (cached image or fallback).
    Ready(ImageRef),
    /// The first attempt failed and retries continue in the background.
    /// The handle yields the eventual reference.
    RetryScheduled(JoinHandle<ImageRef>),
}

impl Resolution {
    /// Returns the reference if one is available immediately.
    #[must_use]
    pub const fn ready(&self) -> Option<&ImageRef> {
        match self {
            Self::Ready(image) => Some(image),
            Self::RetryScheduled(_) => None,
        }
    }

    /// Waits for the final reference, following a scheduled retry if needed.
    /// Returns `None` if the retry task was aborted.
    pub async fn settle(self) -> Option<ImageRef> {
        match self {
            Self::Ready(image) => Some(image),
            Self::RetryScheduled(handle) => handle.await.ok(),
        }
    }
}

/// Port for resolving URLs through a cache.
#[async_trait]
pub trait ImageResolverPort: Send + Sync {
    /// Resolves `url`, reporting progress to `observer`.
    async fn resolve(&self, url: &str, observer: Arc<dyn ImageObserver>) -> Resolution;

    /// Returns true if `url` should go through the cache at all.
    fn handles(&self, url: &str) -> bool;
}

/// Recording resolver for tests.
#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::entities::ObjectUrl;
    use parking_lot::Mutex;
    use tokio::time::Instant;

    /// Resolver that records when each URL was requested.
    pub struct MockResolver {
        latency: Duration,
        starts: Mutex<Vec<(String, Instant)>>,
        finishes: Mutex<Vec<(String, Instant)>>,
        failing: Vec<String>,
    }

    impl MockResolver {
        /// Creates a resolver that succeeds after `latency`.
        pub fn new(latency: Duration) -> Self {
            Self {
                latency,
                starts: Mutex::new(Vec::new()),
                finishes: Mutex::new(Vec::new()),
                failing: Vec::new(),
            }
        }

        /// Makes the given URLs resolve to the fallback.
        pub fn failing_on(mut self, urls: &[&str]) -> Self {
            self.failing = urls.iter().map(ToString::to_string).collect();
            self
        }

        /// Start instants in call order.
        pub fn starts(&self) -> Vec<(String, Instant)> {
            self.starts.lock().clone()
        }

        /// Finish instants in completion order.
        pub fn finishes(&self) -> Vec<(String, Instant)> {
            self.finishes.lock().clone()
        }
    }

    #[async_trait]
    impl ImageResolverPort for MockResolver {
        async fn resolve(&self, url: &str, observer: Arc<dyn ImageObserver>) -> Resolution {
            self.starts.lock().push((url.to_string(), Instant::now()));
            tokio::time::sleep(self.latency).await;
            self.finishes.lock().push((url.to_string(), Instant::now()));
            if self.failing.iter().any(|u| u == url) {
                let error = FetchError::RateLimited;
                observer.on_error(url, &error);
                Resolution::Ready(ImageRef::Fallback("fallback.webp".to_string()))
            } else {
                let image = ImageRef::Object(ObjectUrl::generate());
                observer.on_load(url, &image);
                Resolution::Ready(image)
            }
        }

        fn handles(&self, _url: &str) -> bool {
            true
        }
    }
}
