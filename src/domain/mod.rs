//! Domain layer with core image-pipeline types and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{CacheKey, FetchedImage, ImageRef, ObjectUrl, UrlState};
pub use errors::FetchError;
pub use ports::{ImageFetchPort, ImageObserver, ImageResolverPort, ImageTarget, Resolution};
