//! Domain types for image handling.

use std::sync::Arc;

/// Cache key for a loadable image: the URL it is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageKey(pub String);

impl ImageKey {
    /// Creates a new `ImageKey` from any string-like input.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the inner URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the key is a site-relative path like `/content/...`.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.0.starts_with('/') && !self.0.starts_with("//")
    }
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A decoded image ready for display.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Key the image was loaded under.
    pub key: ImageKey,
    /// Decoded pixels, shared with the cache.
    pub image: Arc<image::DynamicImage>,
    /// Where the image came from.
    pub source: ImageSource,
}

/// Where a preloaded image was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Already present in the cache.
    Cache,
    /// Freshly fetched.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Network => write!(f, "network"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_keys() {
        assert!(ImageKey::from("/content/pictures/horizontal/a.jpg").is_relative());
        assert!(!ImageKey::from("https://example.com/a.jpg").is_relative());
        assert!(!ImageKey::from("//cdn.example.com/a.jpg").is_relative());
    }
}
