//! Upstream CDN fetcher used by the proxy on a cache miss.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::cdn::CdnAllowList;
use crate::domain::entities::FetchedImage;
use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetchPort;

/// Browser user agent; the CDNs reject obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Upstream request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches images straight from allow-listed CDN hosts.
pub struct UpstreamFetcher {
    client: Client,
    allow_list: CdnAllowList,
}

impl std::fmt::Debug for UpstreamFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamFetcher")
            .field("allow_list", &self.allow_list)
            .finish_non_exhaustive()
    }
}

impl UpstreamFetcher {
    /// Creates a fetcher for the given hosts.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        allow_list: CdnAllowList,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, allow_list })
    }
}

#[async_trait]
impl ImageFetchPort for UpstreamFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        if !self.allow_list.is_allowed(url) {
            return Err(FetchError::invalid_request(
                "Only allow-listed CDN images are supported",
            ));
        }
        debug!(url = %url, "Downloading image from upstream");
        download(&self.client, url).await
    }
}

/// Issues a GET and classifies the outcome.
///
/// 429 becomes [`FetchError::RateLimited`]; any other non-success status or
/// transport error becomes [`FetchError::UpstreamFailure`].
pub(crate) async fn download(client: &Client, url: &str) -> Result<FetchedImage, FetchError> {
    let response = client.get(url).send().await.map_err(|e| {
        warn!(url = %url, error = %e, "Image request failed");
        if e.is_timeout() {
            FetchError::network("request timed out")
        } else if e.is_connect() {
            FetchError::network(format!("failed to connect: {e}"))
        } else {
            FetchError::network(format!("Request failed: {e}"))
        }
    })?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimited);
    }
    if !status.is_success() {
        return Err(FetchError::upstream_status(
            status.as_u16(),
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
        ));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::network(format!("Failed to read body: {e}")))?;

    Ok(FetchedImage {
        bytes,
        content_type,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    fn local_fetcher() -> UpstreamFetcher {
        UpstreamFetcher::new(
            CdnAllowList::new(["127.0.0.1"]),
            DEFAULT_USER_AGENT,
            DEFAULT_TIMEOUT,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_rejects_disallowed_host_without_request() {
        let server = test_server::spawn().await;
        let fetcher = UpstreamFetcher::new(
            CdnAllowList::default(),
            DEFAULT_USER_AGENT,
            DEFAULT_TIMEOUT,
        )
        .unwrap();

        let err = fetcher.fetch(&server.url("/ok.png")).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest { .. }));
        assert_eq!(server.hits(), 0);
    }

    #[tokio::test]
    async fn test_success_returns_bytes_and_type() {
        let server = test_server::spawn().await;
        let image = local_fetcher().fetch(&server.url("/ok.png")).await.unwrap();

        assert_eq!(image.bytes.as_ref(), b"png bytes");
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_429_is_rate_limited() {
        let server = test_server::spawn().await;
        let err = local_fetcher()
            .fetch(&server.url("/limited"))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::RateLimited);
    }

    #[tokio::test]
    async fn test_other_status_is_upstream_failure() {
        let server = test_server::spawn().await;
        let err = local_fetcher()
            .fetch(&server.url("/broken"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::UpstreamFailure {
                status: Some(502),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_sends_browser_user_agent() {
        let server = test_server::spawn().await;
        let image = local_fetcher().fetch(&server.url("/agent")).await.unwrap();
        assert_eq!(image.bytes.as_ref(), DEFAULT_USER_AGENT.as_bytes());
    }

    #[tokio::test]
    async fn test_connection_failure_is_upstream_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_fetcher()
            .fetch(&format!("http://{addr}/gone.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::UpstreamFailure { status: None, .. }));
    }
}
