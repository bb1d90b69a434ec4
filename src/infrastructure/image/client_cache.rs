//! In-memory client image cache with per-URL retry and backoff.
//!
//! Each URL moves through `Uncached -> Pending -> {Cached, Failed}`. The
//! state lives in a single map; the lock is never held across an `.await`,
//! and state is re-read after every suspension point.
//!
//! One instance is meant to be constructed per process and shared by
//! cloning, which is cheap.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use super::cdn::CdnAllowList;
use super::object_store::ObjectUrlStore;
use crate::domain::entities::{FetchedImage, ImageRef, ObjectUrl, UrlState};
use crate::domain::errors::FetchError;
use crate::domain::ports::{
    ImageFetchPort, ImageObserver, ImageResolverPort, NoopObserver, Resolution,
};

/// Default number of attempts per URL.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay unit for exponential backoff.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(2);

/// Default placeholder shown for failed images.
pub const DEFAULT_FALLBACK_IMAGE: &str = "assets/images/project_image_placeholder.webp";

/// Configuration for the client cache.
#[derive(Debug, Clone)]
pub struct ClientCacheConfig {
    /// Total attempts before a URL is marked failed.
    pub max_retries: u32,
    /// Backoff unit; attempt `n` waits `base_delay * 2^n` after the previous one.
    pub base_delay: Duration,
    /// Placeholder path returned once a URL has failed.
    pub fallback_image: String,
}

impl Default for ClientCacheConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
        }
    }
}

/// Counts reported by [`ClientImageCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientCacheStats {
    /// URLs with a cached object.
    pub cached: usize,
    /// URLs that exhausted their retries.
    pub failed: usize,
    /// `cached + failed`.
    pub total: usize,
}

impl std::fmt::Display for ClientCacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Image cache: {} cached, {} failed ({} total)",
            self.cached, self.failed, self.total
        )
    }
}

/// Result of one pass through the fetch path.
enum Step {
    Done(ImageRef),
    Retry(u32),
}

struct CacheInner {
    fetcher: Arc<dyn ImageFetchPort>,
    allow_list: CdnAllowList,
    objects: ObjectUrlStore,
    states: Mutex<HashMap<String, UrlState>>,
    config: ClientCacheConfig,
}

/// Client-side image cache.
#[derive(Clone)]
pub struct ClientImageCache {
    inner: Arc<CacheInner>,
}

impl std::fmt::Debug for ClientImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientImageCache")
            .field("config", &self.inner.config)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl ClientImageCache {
    /// Creates a cache that fetches through `fetcher`. Only URLs on
    /// `allow_list` are meant to go through the cache; see
    /// [`ImageResolverPort::handles`].
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn ImageFetchPort>,
        allow_list: CdnAllowList,
        config: ClientCacheConfig,
    ) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                fetcher,
                allow_list,
                objects: ObjectUrlStore::new(),
                states: Mutex::new(HashMap::new()),
                config,
            }),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientCacheConfig {
        &self.inner.config
    }

    /// Delay required between the previous attempt and attempt `attempt`.
    #[must_use]
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        self.inner
            .config
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Returns the cached reference for `url` without any I/O.
    #[must_use]
    pub fn cached(&self, url: &str) -> Option<ImageRef> {
        match self.inner.states.lock().get(url) {
            Some(UrlState::Cached(object)) => Some(ImageRef::Object(object.clone())),
            _ => None,
        }
    }

    /// Returns the current state of `url`; `None` means uncached.
    #[must_use]
    pub fn state(&self, url: &str) -> Option<UrlState> {
        self.inner.states.lock().get(url).cloned()
    }

    /// Resolves an object URL minted by this cache to its bytes.
    /// Returns `None` once the URL has been revoked.
    #[must_use]
    pub fn object(&self, url: &ObjectUrl) -> Option<FetchedImage> {
        self.inner.objects.get(url)
    }

    /// Fetches `url`, retrying with backoff until it is cached or its retry
    /// budget is spent. Always returns a reference: the cached object or the
    /// fallback.
    pub async fn get_image(&self, url: &str, observer: &dyn ImageObserver) -> ImageRef {
        self.run(url, 0, false, observer).await
    }

    /// Runs the first attempt inline. If it needs a retry, the remaining
    /// attempts continue on a background task whose handle is returned.
    pub async fn resolve(&self, url: &str, observer: Arc<dyn ImageObserver>) -> Resolution {
        self.resolve_with(url, false, observer).await
    }

    /// Re-attempts `url` even if it has failed. The failed state is only
    /// left when an attempt succeeds.
    pub async fn retry(&self, url: &str, observer: Arc<dyn ImageObserver>) -> Resolution {
        info!(url = %url, "Manual retry");
        self.resolve_with(url, true, observer).await
    }

    /// Re-attempts every failed URL concurrently and waits for the outcomes.
    pub async fn retry_all_failed(&self, observer: &dyn ImageObserver) -> Vec<(String, ImageRef)> {
        let failed: Vec<String> = self
            .inner
            .states
            .lock()
            .iter()
            .filter(|(_, state)| state.is_failed())
            .map(|(url, _)| url.clone())
            .collect();

        info!(count = failed.len(), "Retrying all failed images");
        let results = join_all(
            failed
                .iter()
                .map(|url| self.run(url, 0, true, observer)),
        )
        .await;
        failed.into_iter().zip(results).collect()
    }

    /// Fetches every URL concurrently and waits for all of them. Individual
    /// failures only show up in the returned count.
    pub async fn preload_images<S: AsRef<str>>(&self, urls: &[S]) -> usize {
        debug!(count = urls.len(), "Preloading images");
        let results = join_all(
            urls.iter()
                .map(|url| self.get_image(url.as_ref(), &NoopObserver)),
        )
        .await;
        let loaded = results.iter().filter(|r| !r.is_fallback()).count();
        debug!(loaded, failed = results.len() - loaded, "Image preloading complete");
        loaded
    }

    /// Revokes every cached object and forgets all per-URL state.
    ///
    /// Fetches already in flight are not cancelled; they repopulate the
    /// cache when they finish.
    pub fn clear_cache(&self) {
        let drained: Vec<UrlState> = {
            let mut states = self.inner.states.lock();
            states.drain().map(|(_, state)| state).collect()
        };
        for state in &drained {
            if let UrlState::Cached(object) = state {
                self.inner.objects.revoke(object);
            }
        }
        info!(count = drained.len(), "Image cache cleared");
    }

    /// Returns cached/failed counts.
    #[must_use]
    pub fn stats(&self) -> ClientCacheStats {
        let states = self.inner.states.lock();
        let cached = states.values().filter(|s| s.is_cached()).count();
        let failed = states.values().filter(|s| s.is_failed()).count();
        ClientCacheStats {
            cached,
            failed,
            total: cached + failed,
        }
    }

    async fn resolve_with(
        &self,
        url: &str,
        manual: bool,
        observer: Arc<dyn ImageObserver>,
    ) -> Resolution {
        match self.attempt(url, 0, manual, observer.as_ref()).await {
            Step::Done(image) => Resolution::Ready(image),
            Step::Retry(next) => {
                let cache = self.clone();
                let url = url.to_string();
                Resolution::RetryScheduled(tokio::spawn(async move {
                    cache.run(&url, next, manual, observer.as_ref()).await
                }))
            }
        }
    }

    async fn run(
        &self,
        url: &str,
        mut attempt: u32,
        manual: bool,
        observer: &dyn ImageObserver,
    ) -> ImageRef {
        loop {
            match self.attempt(url, attempt, manual, observer).await {
                Step::Done(image) => return image,
                Step::Retry(next) => attempt = next,
            }
        }
    }

    /// One pass: fast path, backoff gate, fetch, transition.
    async fn attempt(
        &self,
        url: &str,
        attempt: u32,
        manual: bool,
        observer: &dyn ImageObserver,
    ) -> Step {
        if let Some(step) = self.settled(url, manual, observer) {
            return step;
        }

        let delay = self.retry_delay(attempt);
        let last_attempt = self
            .inner
            .states
            .lock()
            .get(url)
            .and_then(UrlState::last_attempt);
        if let Some(last) = last_attempt {
            let elapsed = last.elapsed();
            if elapsed < delay {
                let wait = delay - elapsed;
                debug!(url = %url, wait_ms = wait.as_millis(), "Rate limiting: waiting before retry");
                tokio::time::sleep(wait).await;
                if let Some(step) = self.settled(url, manual, observer) {
                    return step;
                }
            }
        }

        self.record_attempt(url, attempt);
        debug!(url = %url, attempt = attempt + 1, "Fetching image");

        match self.inner.fetcher.fetch(url).await {
            Ok(image) => {
                let image = self.store(url, image);
                debug!(url = %url, "Image cached successfully");
                observer.on_load(url, &image);
                Step::Done(image)
            }
            Err(error) => self.on_failure(url, attempt, error, observer),
        }
    }

    /// Returns a final step if `url` needs no fetch: it is cached, or it has
    /// failed and this is not a manual retry.
    fn settled(&self, url: &str, manual: bool, observer: &dyn ImageObserver) -> Option<Step> {
        let state = self.inner.states.lock().get(url).cloned();
        match state {
            Some(UrlState::Cached(object)) => {
                trace!(url = %url, "Using cached image");
                Some(Step::Done(ImageRef::Object(object)))
            }
            Some(UrlState::Failed { error, .. }) if !manual => {
                trace!(url = %url, "URL failed too many times, using fallback");
                observer.on_error(url, &error);
                Some(Step::Done(self.fallback()))
            }
            _ => None,
        }
    }

    fn record_attempt(&self, url: &str, attempt: u32) {
        let now = Instant::now();
        let mut states = self.inner.states.lock();
        match states.get_mut(url) {
            Some(UrlState::Failed { last_attempt, .. }) => *last_attempt = now,
            Some(UrlState::Cached(_)) => {}
            _ => {
                states.insert(
                    url.to_string(),
                    UrlState::Pending {
                        attempt,
                        last_attempt: now,
                    },
                );
            }
        }
    }

    fn store(&self, url: &str, image: FetchedImage) -> ImageRef {
        let mut states = self.inner.states.lock();
        if let Some(UrlState::Cached(existing)) = states.get(url) {
            return ImageRef::Object(existing.clone());
        }
        let object = self.inner.objects.create(image);
        states.insert(url.to_string(), UrlState::Cached(object.clone()));
        ImageRef::Object(object)
    }

    fn on_failure(
        &self,
        url: &str,
        attempt: u32,
        error: FetchError,
        observer: &dyn ImageObserver,
    ) -> Step {
        warn!(url = %url, attempt = attempt + 1, error = %error, "Failed to load image");

        let next = attempt + 1;
        if error.is_retryable() && next < self.inner.config.max_retries {
            let delay = self.retry_delay(next);
            if error.is_rate_limited() {
                info!(url = %url, delay_ms = delay.as_millis(), "Rate limited, retrying with exponential backoff");
            } else {
                debug!(url = %url, delay_ms = delay.as_millis(), "Retrying after error");
            }
            observer.on_retry(url, next, delay);
            return Step::Retry(next);
        }

        let mut states = self.inner.states.lock();
        if let Some(UrlState::Cached(object)) = states.get(url) {
            return Step::Done(ImageRef::Object(object.clone()));
        }
        let last_attempt = states
            .get(url)
            .and_then(UrlState::last_attempt)
            .unwrap_or_else(Instant::now);
        states.insert(
            url.to_string(),
            UrlState::Failed {
                last_attempt,
                error: error.clone(),
            },
        );
        drop(states);

        warn!(url = %url, "Giving up on image, using fallback");
        observer.on_error(url, &error);
        Step::Done(self.fallback())
    }

    fn fallback(&self) -> ImageRef {
        ImageRef::Fallback(self.inner.config.fallback_image.clone())
    }
}

#[async_trait]
impl ImageResolverPort for ClientImageCache {
    async fn resolve(&self, url: &str, observer: Arc<dyn ImageObserver>) -> Resolution {
        Self::resolve(self, url, observer).await
    }

    fn handles(&self, url: &str) -> bool {
        self.inner.allow_list.is_allowed(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockImageFetcher;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const URL: &str = "https://lh3.googleusercontent.com/x";
    const BYTES: &[u8] = b"image bytes";

    #[derive(Default)]
    struct RecordingObserver {
        loads: AtomicUsize,
        errors: AtomicUsize,
        retries: Mutex<Vec<(u32, Duration)>>,
    }

    impl ImageObserver for RecordingObserver {
        fn on_load(&self, _url: &str, _image: &ImageRef) {
            self.loads.fetch_add(1, Ordering::SeqCst);
        }

        fn on_error(&self, _url: &str, _error: &FetchError) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_retry(&self, _url: &str, attempt: u32, delay: Duration) {
            self.retries.lock().push((attempt, delay));
        }
    }

    fn create_cache(fetcher: MockImageFetcher) -> (ClientImageCache, Arc<MockImageFetcher>) {
        let fetcher = Arc::new(fetcher);
        let cache = ClientImageCache::new(
            Arc::clone(&fetcher) as Arc<dyn ImageFetchPort>,
            CdnAllowList::default(),
            ClientCacheConfig::default(),
        );
        (cache, fetcher)
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_is_cached() {
        let (cache, fetcher) = create_cache(MockImageFetcher::succeeding(BYTES));
        let observer = Arc::new(RecordingObserver::default());

        let resolution = cache.resolve(URL, observer.clone()).await;
        let image = resolution.ready().cloned().unwrap();
        let object = image.object_url().unwrap();

        assert_eq!(cache.object(object).unwrap().bytes.as_ref(), BYTES);
        assert_eq!(observer.loads.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.stats(),
            ClientCacheStats {
                cached: 1,
                failed: 0,
                total: 1
            }
        );

        assert_eq!(cache.cached(URL), Some(image.clone()));
        let again = cache.resolve(URL, observer.clone()).await;
        assert_eq!(again.ready(), Some(&image));
        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(observer.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_exhausts_after_three_attempts() {
        let (cache, fetcher) = create_cache(MockImageFetcher::failing(FetchError::RateLimited));
        let observer = RecordingObserver::default();

        let image = cache.get_image(URL, &observer).await;

        assert_eq!(image, ImageRef::Fallback(DEFAULT_FALLBACK_IMAGE.to_string()));
        assert_eq!(fetcher.calls_for(URL), 3);
        assert!(cache.state(URL).unwrap().is_failed());
        assert_eq!(observer.errors.load(Ordering::SeqCst), 1);
        assert_eq!(
            *observer.retries.lock(),
            vec![(1, Duration::from_secs(4)), (2, Duration::from_secs(8))]
        );

        let again = cache.resolve(URL, Arc::new(NoopObserver)).await;
        assert!(again.ready().unwrap().is_fallback());
        assert_eq!(fetcher.calls_for(URL), 3);
        assert_eq!(
            cache.stats(),
            ClientCacheStats {
                cached: 0,
                failed: 1,
                total: 1
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_timing_between_attempts() {
        let (cache, fetcher) = create_cache(MockImageFetcher::failing(FetchError::network(
            "connection reset",
        )));

        cache.get_image(URL, &NoopObserver).await;

        let times: Vec<Instant> = fetcher.call_times().into_iter().map(|(_, t)| t).collect();
        assert_eq!(times.len(), 3);
        assert_eq!(times[1] - times[0], cache.retry_delay(1));
        assert_eq!(times[2] - times[1], cache.retry_delay(2));
        assert_eq!(cache.retry_delay(0), Duration::from_secs(2));
        assert_eq!(cache.retry_delay(2), Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_schedules_retry() {
        let fetcher = MockImageFetcher::succeeding(BYTES);
        fetcher.push(URL, Err(FetchError::RateLimited));
        let (cache, fetcher) = create_cache(fetcher);
        let observer = Arc::new(RecordingObserver::default());

        let resolution = cache.resolve(URL, observer.clone()).await;
        assert!(resolution.ready().is_none());
        assert_eq!(*observer.retries.lock(), vec![(1, Duration::from_secs(4))]);

        let started = Instant::now();
        let image = resolution.settle().await.unwrap();
        assert!(!image.is_fallback());
        assert!(started.elapsed() >= Duration::from_secs(4));
        assert_eq!(fetcher.calls_for(URL), 2);
        assert_eq!(observer.loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached(URL), Some(image));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_call_waits_for_gate() {
        let (cache, fetcher) = create_cache(
            MockImageFetcher::succeeding(BYTES).with_latency(Duration::from_millis(100)),
        );

        let first = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get_image(URL, &NoopObserver).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let started = Instant::now();
        let second = cache.get_image(URL, &NoopObserver).await;

        assert!(started.elapsed() >= Duration::from_millis(1990));
        assert_eq!(first.await.unwrap(), second);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_first_fetch_races_second_caller() {
        let (cache, fetcher) = create_cache(
            MockImageFetcher::succeeding(BYTES).with_latency(Duration::from_secs(3)),
        );

        let first = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get_image(URL, &NoopObserver).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let second = cache.get_image(URL, &NoopObserver).await;
        let first = first.await.unwrap();

        assert_eq!(fetcher.call_count(), 2);
        assert_eq!(first, second);
        assert_eq!(cache.inner.objects.len(), 1);
        assert_eq!(cache.stats().cached, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_fails_immediately() {
        let (cache, fetcher) =
            create_cache(MockImageFetcher::failing(FetchError::storage("disk full")));
        let observer = RecordingObserver::default();

        let image = cache.get_image(URL, &observer).await;

        assert!(image.is_fallback());
        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(observer.errors.load(Ordering::SeqCst), 1);
        assert!(observer.retries.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cache_resets_everything() {
        let fetcher = MockImageFetcher::succeeding(BYTES);
        let failing = "https://lh4.googleusercontent.com/broken";
        for _ in 0..3 {
            fetcher.push(failing, Err(FetchError::RateLimited));
        }
        let (cache, fetcher) = create_cache(fetcher);

        let image = cache.get_image(URL, &NoopObserver).await;
        cache.get_image(failing, &NoopObserver).await;
        assert_eq!(cache.stats().total, 2);

        cache.clear_cache();

        assert_eq!(cache.stats(), ClientCacheStats::default());
        assert!(cache.state(URL).is_none());
        assert!(cache.state(failing).is_none());
        assert!(cache.object(image.object_url().unwrap()).is_none());

        let refetched = cache.get_image(URL, &NoopObserver).await;
        assert_ne!(refetched, image);
        assert_eq!(fetcher.calls_for(URL), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_during_fetch_repopulates() {
        let (cache, _fetcher) =
            create_cache(MockImageFetcher::succeeding(BYTES).with_latency(Duration::from_secs(1)));

        let pending = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get_image(URL, &NoopObserver).await })
        };
        tokio::time::sleep(Duration::from_millis(500)).await;
        cache.clear_cache();

        let image = pending.await.unwrap();
        assert_eq!(cache.cached(URL), Some(image));
        assert_eq!(cache.stats().cached, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_retry_recovers_failed_url() {
        let fetcher = MockImageFetcher::succeeding(BYTES);
        for _ in 0..3 {
            fetcher.push(URL, Err(FetchError::RateLimited));
        }
        let (cache, fetcher) = create_cache(fetcher);

        cache.get_image(URL, &NoopObserver).await;
        assert!(cache.state(URL).unwrap().is_failed());

        let image = cache
            .retry(URL, Arc::new(NoopObserver))
            .await
            .settle()
            .await
            .unwrap();

        assert!(!image.is_fallback());
        assert_eq!(fetcher.calls_for(URL), 4);
        assert_eq!(cache.stats().failed, 0);
        assert_eq!(cache.stats().cached, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_retry_failure_stays_failed() {
        let (cache, fetcher) = create_cache(MockImageFetcher::failing(FetchError::RateLimited));

        cache.get_image(URL, &NoopObserver).await;
        let image = cache
            .retry(URL, Arc::new(NoopObserver))
            .await
            .settle()
            .await
            .unwrap();

        assert!(image.is_fallback());
        assert_eq!(fetcher.calls_for(URL), 6);
        assert!(cache.state(URL).unwrap().is_failed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_all_failed() {
        let other = "https://lh5.googleusercontent.com/y";
        let fetcher = MockImageFetcher::succeeding(BYTES);
        for url in [URL, other] {
            for _ in 0..3 {
                fetcher.push(url, Err(FetchError::network("timeout")));
            }
        }
        let (cache, _fetcher) = create_cache(fetcher);

        cache.preload_images(&[URL, other]).await;
        assert_eq!(cache.stats().failed, 2);

        let results = cache.retry_all_failed(&NoopObserver).await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|(_, image)| !image.is_fallback()));
        assert_eq!(cache.stats().cached, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preload_counts_successes() {
        let broken = "https://lh6.googleusercontent.com/z";
        let fetcher = MockImageFetcher::succeeding(BYTES);
        for _ in 0..3 {
            fetcher.push(broken, Err(FetchError::RateLimited));
        }
        let (cache, _fetcher) = create_cache(fetcher);

        let loaded = cache
            .preload_images(&[URL, "https://lh3.googleusercontent.com/b", broken])
            .await;

        assert_eq!(loaded, 2);
        assert_eq!(
            cache.stats(),
            ClientCacheStats {
                cached: 2,
                failed: 1,
                total: 3
            }
        );
    }

    #[test]
    fn test_handles_only_cdn_urls() {
        let (cache, _fetcher) = create_cache(MockImageFetcher::succeeding(BYTES));
        assert!(ImageResolverPort::handles(&cache, URL));
        assert!(!ImageResolverPort::handles(&cache, "https://example.com/a.png"));
    }
}
