//! Portfolio images - image proxy, disk cache and retrying client cache.
//!
//! This crate provides the image pipeline of a portfolio site with clean
//! architecture: a server-side proxy that fetches allow-listed CDN images
//! and persists them on disk, and a client-side cache that resolves image
//! URLs with per-URL exponential backoff and throttled batch loading.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing image loading services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the HTTP server.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "portfolio-images";
