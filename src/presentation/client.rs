//! Client-side image pipeline assembled from configuration.

use std::sync::Arc;

use crate::application::{BatchLoader, BatchReport, ImageBinder};
use crate::domain::entities::ImageRef;
use crate::domain::errors::FetchError;
use crate::domain::ports::{ImageFetchPort, ImageObserver, ImageTarget};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::image::{ClientImageCache, HttpImageFetcher};

/// Retrying image cache plus the batch loader and binder built on it.
#[derive(Debug, Clone)]
pub struct ImageClient {
    cache: ClientImageCache,
    loader: BatchLoader,
}

impl ImageClient {
    /// Builds the pipeline from `[client]`, `[batch]` and `[upstream]`.
    /// CDN requests go through `client.proxy_endpoint`.
    ///
    /// # Errors
    /// Returns error if the proxy endpoint is not a valid URL or the HTTP
    /// client cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let fetcher = HttpImageFetcher::new(
            &config.client.proxy_endpoint,
            config.allow_list(),
            config.upstream_timeout(),
        )?;
        Ok(Self::with_fetcher(Arc::new(fetcher), config))
    }

    /// Builds the pipeline around an existing fetcher.
    #[must_use]
    pub fn with_fetcher(fetcher: Arc<dyn ImageFetchPort>, config: &AppConfig) -> Self {
        let cache = ClientImageCache::new(
            fetcher,
            config.allow_list(),
            config.client_cache_config(),
        );
        let loader = BatchLoader::with_config(Arc::new(cache.clone()), config.batch_config());
        Self { cache, loader }
    }

    /// The retrying cache.
    #[must_use]
    pub const fn cache(&self) -> &ClientImageCache {
        &self.cache
    }

    /// The throttled batch loader.
    #[must_use]
    pub const fn loader(&self) -> &BatchLoader {
        &self.loader
    }

    /// A binder over the same cache.
    #[must_use]
    pub fn binder(&self) -> ImageBinder {
        ImageBinder::new(Arc::new(self.cache.clone()))
    }

    /// Fetches one image with retries, see [`ClientImageCache::get_image`].
    pub async fn get_image(&self, url: &str, observer: &dyn ImageObserver) -> ImageRef {
        self.cache.get_image(url, observer).await
    }

    /// Loads `urls` in throttled batches.
    pub async fn load_all<S: AsRef<str>>(
        &self,
        urls: &[S],
        observer: Arc<dyn ImageObserver>,
    ) -> BatchReport {
        self.loader.load_with_throttling(urls, observer).await
    }

    /// Binds `(target, url)` pairs in throttled batches.
    pub async fn bind_all(&self, images: &[(Arc<dyn ImageTarget>, String)]) -> BatchReport {
        self.loader.bind_with_throttling(images).await
    }
}
