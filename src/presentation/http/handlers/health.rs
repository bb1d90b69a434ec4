//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use crate::presentation::http::state::AppState;

/// Response for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"OK"`.
    pub status: &'static str,
    /// Current time (RFC 3339).
    pub timestamp: String,
    /// Seconds since startup.
    pub uptime: f64,
}

/// Handle GET /health.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}
