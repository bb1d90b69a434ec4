//! Application layer with services built on domain ports.

/// Image loading services.
pub mod services;

pub use services::{BatchConfig, BatchLoader, BatchReport, ImageBinder, LoadOutcome};
