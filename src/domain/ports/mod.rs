mod image_cache_port;
mod picture_source_port;

#[cfg(test)]
pub use image_cache_port::MockImageFetcher;
pub use image_cache_port::{CacheError, CacheResult, ImageFetcher};
pub use picture_source_port::PictureSource;

#[cfg(test)]
pub mod mocks {
    pub use super::picture_source_port::mock::MockPictureSource;
}
