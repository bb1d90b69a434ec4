//! Domain entities.

mod image;

pub use image::{CacheKey, FetchedImage, ImageRef, ObjectUrl, UrlState};
