//! Image fetch error types.

use thiserror::Error;

/// Failure kinds surfaced by the image pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("rate limited by upstream")]
    RateLimited,

    #[error("upstream failure: {message}")]
    UpstreamFailure { status: Option<u16>, message: String },

    #[error("storage failure: {message}")]
    StorageFailure { message: String },
}

impl FetchError {
    /// Creates invalid request error.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Creates upstream failure from a non-success HTTP status.
    #[must_use]
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        Self::UpstreamFailure {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates upstream failure from a network-level error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::UpstreamFailure {
            status: None,
            message: message.into(),
        }
    }

    /// Creates storage failure.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageFailure {
            message: message.into(),
        }
    }

    /// Returns whether the retry loop may try again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::UpstreamFailure { .. })
    }

    /// Returns whether upstream asked us to slow down.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}
