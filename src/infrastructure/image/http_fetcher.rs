//! Image fetcher backed by HTTP and the local public directory.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::entities::ImageKey;
use crate::domain::ports::{CacheError, CacheResult, ImageFetcher};

/// Configuration for the image fetcher.
#[derive(Debug, Clone)]
pub struct ImageFetcherConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Site origin that relative keys are resolved against.
    /// When unset, relative keys are read from `public_dir`.
    pub origin: Option<String>,
    /// Directory served at the site root.
    pub public_dir: PathBuf,
}

impl Default for ImageFetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            origin: None,
            public_dir: PathBuf::from("public"),
        }
    }
}

/// Loads images over HTTP, or from disk for site-relative keys.
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
    config: ImageFetcherConfig,
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpImageFetcher {
    /// Creates a new fetcher with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ImageFetcherConfig) -> CacheResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CacheError::Fetch(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns where `key` will be loaded from.
    ///
    /// Protocol-relative keys (`//host/...`) are fetched over `https`.
    ///
    /// # Errors
    /// Returns `CacheError::Io` for a relative key that climbs out of the
    /// public directory with `..`.
    pub fn locate(&self, key: &ImageKey) -> CacheResult<Location> {
        let raw = key.as_str();
        if raw.starts_with("//") {
            return Ok(Location::Remote(format!("https:{raw}")));
        }
        if !key.is_relative() {
            return Ok(Location::Remote(raw.to_string()));
        }

        let relative = Path::new(raw.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(CacheError::Io(format!(
                "Refusing path outside public directory: {key}"
            )));
        }

        Ok(match &self.config.origin {
            Some(origin) => Location::Remote(format!("{}{}", origin.trim_end_matches('/'), key)),
            None => Location::Local(self.config.public_dir.join(relative)),
        })
    }

    async fn download(&self, url: &str) -> CacheResult<Vec<u8>> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CacheError::Fetch(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CacheError::Fetch(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CacheError::Fetch(format!("Failed to read body: {e}")))?;

        Ok(bytes.to_vec())
    }

    async fn read_local(path: &Path) -> CacheResult<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| CacheError::Io(format!("Failed to read {}: {e}", path.display())))
    }
}

/// Resolved source of an image key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Absolute URL.
    Remote(String),
    /// File under the public directory.
    Local(PathBuf),
}

#[async_trait::async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, key: &ImageKey) -> CacheResult<Arc<image::DynamicImage>> {
        let bytes = match self.locate(key)? {
            Location::Remote(url) => {
                debug!(key = %key, url = %url, "Downloading image");
                self.download(&url).await?
            }
            Location::Local(path) => {
                trace!(key = %key, path = %path.display(), "Reading local image");
                Self::read_local(&path).await?
            }
        };

        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| CacheError::Decode(format!("Decode task panicked: {e}")))?
            .map_err(|e| CacheError::Decode(format!("Failed to decode image: {e}")))?;

        Ok(Arc::new(decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(public_dir: PathBuf, origin: Option<&str>) -> HttpImageFetcher {
        HttpImageFetcher::new(ImageFetcherConfig {
            timeout_secs: 5,
            origin: origin.map(String::from),
            public_dir,
        })
        .unwrap()
    }

    #[test]
    fn test_locate() {
        let local = fetcher(PathBuf::from("/srv/public"), None);
        assert_eq!(
            local.locate(&ImageKey::from("/content/pictures/vertical/A raw.jpg")),
            Ok(Location::Local(PathBuf::from(
                "/srv/public/content/pictures/vertical/A raw.jpg"
            )))
        );
        assert_eq!(
            local.locate(&ImageKey::from("https://cdn.example.com/a.jpg")),
            Ok(Location::Remote("https://cdn.example.com/a.jpg".to_string()))
        );

        let remote = fetcher(PathBuf::from("public"), Some("https://example.com/"));
        assert_eq!(
            remote.locate(&ImageKey::from("/images/sample-raw.jpg")),
            Ok(Location::Remote(
                "https://example.com/images/sample-raw.jpg".to_string()
            ))
        );
    }

    #[test]
    fn test_locate_protocol_relative_uses_https() {
        let local = fetcher(PathBuf::from("public"), None);
        assert_eq!(
            local.locate(&ImageKey::from("//cdn.example.com/a.jpg")),
            Ok(Location::Remote("https://cdn.example.com/a.jpg".to_string()))
        );
    }

    #[test]
    fn test_locate_rejects_parent_segments() {
        let local = fetcher(PathBuf::from("/srv/public"), None);
        for key in ["/../../etc/passwd", "/content/../../secret.jpg"] {
            assert!(matches!(
                local.locate(&ImageKey::from(key)),
                Err(CacheError::Io(_))
            ));
        }

        let remote = fetcher(PathBuf::from("public"), Some("https://example.com"));
        assert!(remote.locate(&ImageKey::from("/../a.jpg")).is_err());
    }

    #[tokio::test]
    async fn test_fetch_outside_public_dir_fails() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::TempDir::new()?;
        let public = dir.path().join("public");
        std::fs::create_dir_all(&public)?;
        image::DynamicImage::new_rgb8(2, 2).save(dir.path().join("secret.jpg"))?;

        let fetcher = fetcher(public, None);
        let result = fetcher.fetch(&ImageKey::from("/../secret.jpg")).await;
        assert!(matches!(result, Err(CacheError::Io(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_local_image() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::TempDir::new()?;
        let pictures = dir.path().join("content/pictures/horizontal");
        std::fs::create_dir_all(&pictures)?;
        image::DynamicImage::new_rgb8(6, 3).save(pictures.join("Dunes raw.jpg"))?;

        let fetcher = fetcher(dir.path().to_path_buf(), None);
        let image = fetcher
            .fetch(&ImageKey::from("/content/pictures/horizontal/Dunes raw.jpg"))
            .await?;

        assert_eq!((image.width(), image.height()), (6, 3));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_missing_local_image() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::TempDir::new()?;
        let fetcher = fetcher(dir.path().to_path_buf(), None);

        let result = fetcher.fetch(&ImageKey::from("/missing.jpg")).await;
        assert!(matches!(result, Err(CacheError::Io(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_undecodable_image() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::TempDir::new()?;
        std::fs::write(dir.path().join("broken.jpg"), b"not a jpeg")?;
        let fetcher = fetcher(dir.path().to_path_buf(), None);

        let result = fetcher.fetch(&ImageKey::from("/broken.jpg")).await;
        assert!(matches!(result, Err(CacheError::Decode(_))));
        Ok(())
    }
}
