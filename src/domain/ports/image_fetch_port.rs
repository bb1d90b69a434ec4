//! Port definition for fetching image bytes.

use async_trait::async_trait;

use crate::domain::entities::FetchedImage;
use crate::domain::errors::FetchError;

/// Port for retrieving image bytes for a URL.
/// Implementations must be thread-safe.
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches the bytes behind `url`.
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

/// Test double for [`ImageFetchPort`].
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::time::Duration;

    use parking_lot::Mutex;
    use tokio::time::Instant;

    /// Scripted fetcher for testing.
    ///
    /// Responses queued for a URL are consumed in order; once the queue is
    /// empty the default response is used.
    pub struct MockImageFetcher {
        scripted: Mutex<HashMap<String, VecDeque<Result<FetchedImage, FetchError>>>>,
        default: Result<FetchedImage, FetchError>,
        calls: Mutex<Vec<(String, Instant)>>,
        latency: Duration,
    }

    impl MockImageFetcher {
        /// Creates a mock that answers every URL with `bytes`.
        pub fn succeeding(bytes: &'static [u8]) -> Self {
            Self::with_default(Ok(FetchedImage::new(
                bytes,
                Some("image/webp".to_string()),
            )))
        }

        /// Creates a mock that fails every URL with `error`.
        pub fn failing(error: FetchError) -> Self {
            Self::with_default(Err(error))
        }

        fn with_default(default: Result<FetchedImage, FetchError>) -> Self {
            Self {
                scripted: Mutex::new(HashMap::new()),
                default,
                calls: Mutex::new(Vec::new()),
                latency: Duration::ZERO,
            }
        }

        /// Simulates network latency on every call.
        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        /// Queues a response for the next call for `url`.
        pub fn push(&self, url: &str, response: Result<FetchedImage, FetchError>) {
            self.scripted
                .lock()
                .entry(url.to_string())
                .or_default()
                .push_back(response);
        }

        /// Total number of fetches.
        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        /// Number of fetches for one URL.
        pub fn calls_for(&self, url: &str) -> usize {
            self.calls.lock().iter().filter(|(u, _)| u == url).count()
        }

        /// Start instants of every fetch, in call order.
        pub fn call_times(&self) -> Vec<(String, Instant)> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl ImageFetchPort for MockImageFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
            self.calls.lock().push((url.to_string(), Instant::now()));
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            let scripted = self
                .scripted
                .lock()
                .get_mut(url)
                .and_then(VecDeque::pop_front);
            scripted.unwrap_or_else(|| self.default.clone())
        }
    }
}
