//! Throttled batch loading.
//!
//! Splits a list of images into fixed-size groups. Each group is resolved
//! concurrently and fully settled before the next one starts, with a pause
//! in between to avoid bursts against the CDN.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, info};

use super::image_binder::{ImageBinder, LoadOutcome};
use crate::domain::entities::ImageRef;
use crate::domain::ports::{ImageObserver, ImageResolverPort, ImageTarget, Resolution};

/// Default number of images per batch.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Default pause between batches.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(1000);

/// Batch loader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Images resolved concurrently per batch. Zero is treated as one.
    pub batch_size: usize,
    /// Pause between consecutive batches.
    pub delay_between_batches: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            delay_between_batches: DEFAULT_BATCH_DELAY,
        }
    }
}

/// Tally of a throttled load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Images showing real content.
    pub loaded: usize,
    /// Images showing the placeholder.
    pub failed: usize,
    /// Images whose retries were still running when their batch settled.
    pub retrying: usize,
    /// Number of batches run.
    pub batches: usize,
}

impl BatchReport {
    fn record(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Direct | LoadOutcome::Loaded => self.loaded += 1,
            LoadOutcome::Failed => self.failed += 1,
            LoadOutcome::Retrying => self.retrying += 1,
        }
    }

    /// Total images processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.loaded + self.failed + self.retrying
    }
}

/// Loads images in throttled batches. Retries are left to the resolver.
#[derive(Clone)]
pub struct BatchLoader {
    resolver: Arc<dyn ImageResolverPort>,
    binder: ImageBinder,
    config: BatchConfig,
}

impl std::fmt::Debug for BatchLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BatchLoader {
    /// Creates a loader with default batch settings.
    #[must_use]
    pub fn new(resolver: Arc<dyn ImageResolverPort>) -> Self {
        Self::with_config(resolver, BatchConfig::default())
    }

    /// Creates a loader with custom batch settings.
    #[must_use]
    pub fn with_config(resolver: Arc<dyn ImageResolverPort>, config: BatchConfig) -> Self {
        Self {
            binder: ImageBinder::new(Arc::clone(&resolver)),
            resolver,
            config,
        }
    }

    /// Returns the batch settings.
    #[must_use]
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Resolves `urls` in throttled batches.
    ///
    /// Every resolve in a batch settles before the next batch starts. A
    /// scheduled retry counts as settled for this purpose; it keeps running
    /// in the background.
    pub async fn load_with_throttling<S: AsRef<str>>(
        &self,
        urls: &[S],
        observer: Arc<dyn ImageObserver>,
    ) -> BatchReport {
        self.run_batches(urls, |url| {
            let observer = Arc::clone(&observer);
            async move {
                match self.resolver.resolve(url.as_ref(), observer).await {
                    Resolution::Ready(ImageRef::Object(_)) => LoadOutcome::Loaded,
                    Resolution::Ready(ImageRef::Fallback(_)) => LoadOutcome::Failed,
                    Resolution::RetryScheduled(_) => LoadOutcome::Retrying,
                }
            }
        })
        .await
    }

    /// Binds each `(target, url)` pair in throttled batches.
    pub async fn bind_with_throttling(
        &self,
        images: &[(Arc<dyn ImageTarget>, String)],
    ) -> BatchReport {
        self.run_batches(images, |(target, url)| {
            self.binder.bind(Arc::clone(target), url)
        })
        .await
    }

    async fn run_batches<'a, T, F, Fut>(&self, items: &'a [T], load: F) -> BatchReport
    where
        F: Fn(&'a T) -> Fut,
        Fut: Future<Output = LoadOutcome>,
    {
        let batch_size = self.config.batch_size.max(1);
        let batch_count = items.len().div_ceil(batch_size);
        let mut report = BatchReport::default();

        for (index, batch) in items.chunks(batch_size).enumerate() {
            debug!(
                batch = index + 1,
                of = batch_count,
                size = batch.len(),
                "Loading image batch"
            );

            for outcome in join_all(batch.iter().map(&load)).await {
                report.record(outcome);
            }
            report.batches += 1;

            if index + 1 < batch_count {
                tokio::time::sleep(self.config.delay_between_batches).await;
            }
        }

        info!(
            loaded = report.loaded,
            failed = report.failed,
            retrying = report.retrying,
            batches = report.batches,
            "Batch load complete"
        );
        report
    }
}
