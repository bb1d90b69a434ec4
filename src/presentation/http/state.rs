//! Application state.
//!
//! Shared state for all request handlers.

use std::time::Instant;

use crate::infrastructure::image::ImageProxy;

/// Application state shared across all handlers.
#[derive(Debug)]
pub struct AppState {
    /// Image proxy backed by the disk cache.
    pub proxy: ImageProxy,
    /// Process start, for the health endpoint.
    pub started_at: Instant,
}

impl AppState {
    /// Creates state around `proxy`, starting the uptime clock now.
    #[must_use]
    pub fn new(proxy: ImageProxy) -> Self {
        Self {
            proxy,
            started_at: Instant::now(),
        }
    }
}
