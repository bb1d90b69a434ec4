//! HTTP server for the image proxy.
//!
//! Serves:
//! - `GET /proxy/image?url=...` backed by the disk cache
//! - `GET /cache/stats` and `DELETE /cache/clear` for operators
//! - `GET /health`
//! - clean-URL redirects and, optionally, the static site itself

mod app;
pub mod error;
pub mod handlers;
pub mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::infrastructure::image::ImageProxy;

pub use app::create_router;
pub use error::ServerError;
pub use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to bind to.
    pub addr: SocketAddr,
    /// Site directory served for unmatched paths.
    pub static_dir: Option<PathBuf>,
    /// Base URL shown in startup logs.
    pub public_base_url: String,
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server(proxy: ImageProxy, config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(proxy));
    let app = create_router(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "Portfolio server running");
    tracing::info!("Main portfolio: {}/", config.public_base_url);
    tracing::info!("Image proxy: {}/proxy/image?url=...", config.public_base_url);
    tracing::info!("Health check: {}/health", config.public_base_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
