//! Binds resolved images to UI elements.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::domain::entities::ImageRef;
use crate::domain::errors::FetchError;
use crate::domain::ports::{ImageObserver, ImageResolverPort, ImageTarget, Resolution};

/// How a bind call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// URL is not cache-managed; the target got it as-is.
    Direct,
    /// Cached image is displayed.
    Loaded,
    /// Placeholder is displayed.
    Failed,
    /// A retry is running; the target updates when it settles.
    Retrying,
}

impl LoadOutcome {
    /// Returns true if the element shows real image content.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Direct | Self::Loaded)
    }
}

/// Logs retry progress for bound elements.
struct RetryLogger;

impl ImageObserver for RetryLogger {
    fn on_error(&self, url: &str, error: &FetchError) {
        debug!(url = %url, error = %error, "Using fallback for failed image");
    }

    fn on_retry(&self, url: &str, attempt: u32, delay: Duration) {
        debug!(url = %url, attempt, delay_ms = delay.as_millis(), "Retrying image");
    }
}

/// Resolves URLs and pushes the result into [`ImageTarget`]s.
#[derive(Clone)]
pub struct ImageBinder {
    resolver: Arc<dyn ImageResolverPort>,
}

impl std::fmt::Debug for ImageBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBinder").finish_non_exhaustive()
    }
}

impl ImageBinder {
    /// Creates a binder over `resolver`.
    #[must_use]
    pub fn new(resolver: Arc<dyn ImageResolverPort>) -> Self {
        Self { resolver }
    }

    /// Loads `url` into `target`.
    ///
    /// URLs the resolver does not manage are shown directly. Otherwise the
    /// cached object is shown at full opacity, or the placeholder dimmed.
    /// When a retry is scheduled the target is updated from a background
    /// task once it settles.
    pub async fn bind(&self, target: Arc<dyn ImageTarget>, url: &str) -> LoadOutcome {
        if !self.resolver.handles(url) {
            trace!(url = %url, "Loading image directly");
            target.show(url);
            return LoadOutcome::Direct;
        }

        match self.resolver.resolve(url, Arc::new(RetryLogger)).await {
            Resolution::Ready(image) => apply(target.as_ref(), &image),
            Resolution::RetryScheduled(handle) => {
                tokio::spawn(async move {
                    if let Ok(image) = handle.await {
                        apply(target.as_ref(), &image);
                    }
                });
                LoadOutcome::Retrying
            }
        }
    }
}

fn apply(target: &dyn ImageTarget, image: &ImageRef) -> LoadOutcome {
    target.show(image.as_str());
    target.set_dimmed(image.is_fallback());
    if image.is_fallback() {
        LoadOutcome::Failed
    } else {
        LoadOutcome::Loaded
    }
}
