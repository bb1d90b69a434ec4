//! Port for the UI element an image is rendered into.

/// A visual element that displays an image source.
#[cfg_attr(test, mockall::automock)]
pub trait ImageTarget: Send + Sync {
    /// Sets the element's source to an object URL or a plain path.
    fn show(&self, source: &str);

    /// Toggles the reduced-opacity marker used for placeholders.
    fn set_dimmed(&self, dimmed: bool);
}
