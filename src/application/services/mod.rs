pub mod batch_loader;
pub mod image_binder;

pub use batch_loader::{BatchConfig, BatchLoader, BatchReport};
pub use image_binder::{ImageBinder, LoadOutcome};
