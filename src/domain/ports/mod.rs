mod image_fetch_port;
mod image_resolver_port;
mod image_target_port;

pub use image_fetch_port::ImageFetchPort;
pub use image_resolver_port::{ImageObserver, ImageResolverPort, NoopObserver, Resolution};
pub use image_target_port::ImageTarget;

#[cfg(test)]
pub use image_target_port::MockImageTarget;
