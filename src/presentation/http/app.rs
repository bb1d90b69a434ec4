//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `static_dir` - Site directory served for unmatched paths, if any
pub fn create_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let api_routes = Router::new()
        .route("/proxy/image", get(handlers::proxy::proxy_image))
        .route("/cache/stats", get(handlers::cache::get_stats))
        .route("/cache/clear", delete(handlers::cache::clear_cache))
        .route("/health", get(handlers::health::health));

    let page_routes = Router::new()
        .route("/admin", get(handlers::redirects::admin))
        .route("/login", get(handlers::redirects::login))
        .route("/project/{id}", get(handlers::redirects::project))
        .route("/about", get(handlers::redirects::about))
        .route("/projects", get(handlers::redirects::projects))
        .route("/contact", get(handlers::redirects::contact))
        .route("/resume", get(handlers::redirects::resume));

    let mut router = Router::new().merge(api_routes).merge(page_routes);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
