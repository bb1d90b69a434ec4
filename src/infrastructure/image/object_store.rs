//! Registry of object URLs minted for cached image bytes.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::trace;

use crate::domain::entities::{FetchedImage, ObjectUrl};

/// Maps object URLs to the bytes they stand for.
/// A revoked URL no longer resolves.
#[derive(Debug, Default)]
pub struct ObjectUrlStore {
    objects: Mutex<HashMap<ObjectUrl, FetchedImage>>,
}

impl ObjectUrlStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `image` and returns its new URL.
    pub fn create(&self, image: FetchedImage) -> ObjectUrl {
        let url = ObjectUrl::generate();
        self.objects.lock().insert(url.clone(), image);
        trace!(object_url = %url, "Created object URL");
        url
    }

    /// Resolves a URL to its bytes.
    #[must_use]
    pub fn get(&self, url: &ObjectUrl) -> Option<FetchedImage> {
        self.objects.lock().get(url).cloned()
    }

    /// Releases one URL. Returns false if it was not registered.
    pub fn revoke(&self, url: &ObjectUrl) -> bool {
        self.objects.lock().remove(url).is_some()
    }

    /// Number of live URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    /// Returns true if no URLs are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
