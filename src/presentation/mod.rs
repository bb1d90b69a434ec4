//! Presentation layer: the HTTP surface of the image proxy and the
//! client-side image pipeline.

/// Client-side image pipeline wired from configuration.
pub mod client;
/// axum server, routes and handlers.
pub mod http;

pub use client::ImageClient;
pub use http::{ServerConfig, run_server};
