//! Port definition for image fetching.

use std::sync::Arc;

use crate::domain::entities::ImageKey;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur while filling the image cache.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// Request failed or returned a non-success status.
    #[error("Fetch error: {0}")]
    Fetch(String),
    /// Failed to decode image.
    #[error("Decode error: {0}")]
    Decode(String),
    /// I/O error while reading a local image.
    #[error("IO error: {0}")]
    Io(String),
}

/// Port for loading an image by key.
/// Implementations must be thread-safe.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetches and decodes the image identified by `key`.
    async fn fetch(&self, key: &ImageKey) -> CacheResult<Arc<image::DynamicImage>>;
}
