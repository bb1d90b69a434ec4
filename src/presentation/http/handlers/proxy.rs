//! Image proxy endpoint.
//!
//! Serves allow-listed CDN images through the disk cache with long-lived
//! cache headers and conditional GET support.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::infrastructure::image::ProxyOutcome;
use crate::presentation::http::error::ServerError;
use crate::presentation::http::state::AppState;

/// `Cache-Control` sent with every proxied image.
pub const CACHE_CONTROL: &str = "public, max-age=86400";

/// Query for GET /proxy/image.
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    /// Source image URL.
    pub url: Option<String>,
}

/// Handle GET /proxy/image.
pub async fn proxy_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProxyQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let url = query
        .url
        .filter(|url| !url.is_empty())
        .ok_or(ServerError::MissingUrl)?;

    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok());

    let outcome = state.proxy.get(&url, if_none_match).await.map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Error proxying image");
        ServerError::from(e)
    })?;

    Ok(match outcome {
        ProxyOutcome::NotModified { etag } => (
            StatusCode::NOT_MODIFIED,
            [
                (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
                (header::ETAG, etag),
            ],
        )
            .into_response(),
        ProxyOutcome::Image(image) => {
            tracing::debug!(url = %url, source = %image.source, "Served image");
            (
                [
                    (header::CONTENT_TYPE, image.content_type),
                    (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
                    (header::ETAG, image.etag),
                ],
                image.bytes,
            )
                .into_response()
        }
    })
}
