//! Browser-side network fetcher that routes CDN images through the proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::cdn::{CdnAllowList, proxy_url};
use super::upstream::download;
use crate::domain::entities::FetchedImage;
use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetchPort;

/// Fetches images for the client cache.
///
/// URLs on allow-listed CDN hosts are rewritten to the local proxy endpoint;
/// everything else is fetched directly.
pub struct HttpImageFetcher {
    client: Client,
    proxy_endpoint: Url,
    allow_list: CdnAllowList,
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher")
            .field("proxy_endpoint", &self.proxy_endpoint.as_str())
            .field("allow_list", &self.allow_list)
            .finish_non_exhaustive()
    }
}

impl HttpImageFetcher {
    /// Creates a fetcher that proxies through `proxy_endpoint`.
    ///
    /// # Errors
    /// Returns error if the endpoint is not a valid URL or the HTTP client
    /// cannot be created.
    pub fn new(
        proxy_endpoint: &str,
        allow_list: CdnAllowList,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let proxy_endpoint = Url::parse(proxy_endpoint).map_err(|e| {
            FetchError::invalid_request(format!("invalid proxy endpoint {proxy_endpoint}: {e}"))
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            proxy_endpoint,
            allow_list,
        })
    }

    /// Returns the URL that will actually be requested for `url`.
    #[must_use]
    pub fn request_url(&self, url: &str) -> String {
        if self.allow_list.is_allowed(url) {
            proxy_url(&self.proxy_endpoint, url).into()
        } else {
            url.to_string()
        }
    }

    /// Returns true if `url` is routed through the proxy.
    #[must_use]
    pub fn is_proxied(&self, url: &str) -> bool {
        self.allow_list.is_allowed(url)
    }
}

#[async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let request_url = self.request_url(url);
        if request_url != url {
            debug!(url = %url, proxy = %request_url, "Using proxy server");
        }
        download(&self.client, &request_url).await
    }
}
