//! Error types for the HTTP server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::errors::FetchError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The `url` query parameter was absent or empty.
    #[error("URL parameter is required")]
    MissingUrl,

    /// The URL is not on an allow-listed CDN host.
    #[error("Disallowed image URL: {0}")]
    DisallowedHost(String),

    /// The CDN answered 429.
    #[error("Rate limited by upstream CDN")]
    RateLimited,

    /// Any other CDN or network failure.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Disk cache failure.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<FetchError> for ServerError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::InvalidRequest { reason } => Self::DisallowedHost(reason),
            FetchError::RateLimited => Self::RateLimited,
            FetchError::UpstreamFailure { message, .. } => Self::Upstream(message),
            FetchError::StorageFailure { message } => Self::Storage(message),
        }
    }
}

impl ServerError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingUrl | Self::DisallowedHost(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::MissingUrl => json!({"error": "URL parameter is required"}),
            Self::DisallowedHost(reason) => json!({
                "error": "Only allow-listed CDN images are supported",
                "message": reason,
            }),
            Self::RateLimited => json!({
                "error": "Rate limited by upstream CDN",
                "message": "Please try again later",
            }),
            Self::Upstream(message) => {
                tracing::error!(error = %message, "Failed to proxy image");
                json!({"error": "Failed to proxy image", "message": message})
            }
            Self::Storage(message) => {
                tracing::error!(error = %message, "Image cache storage failure");
                json!({"error": "Image cache storage failure", "message": message})
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(FetchError::invalid_request("nope"), StatusCode::BAD_REQUEST ; "invalid request")]
    #[test_case(FetchError::RateLimited, StatusCode::TOO_MANY_REQUESTS ; "rate limited")]
    #[test_case(FetchError::upstream_status(502, "bad gateway"), StatusCode::INTERNAL_SERVER_ERROR ; "upstream")]
    #[test_case(FetchError::network("timed out"), StatusCode::INTERNAL_SERVER_ERROR ; "network")]
    #[test_case(FetchError::storage("disk full"), StatusCode::INTERNAL_SERVER_ERROR ; "storage")]
    fn test_fetch_error_status(error: FetchError, expected: StatusCode) {
        assert_eq!(ServerError::from(error).status(), expected);
    }

    #[test]
    fn test_missing_url_is_bad_request() {
        let response = ServerError::MissingUrl.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
