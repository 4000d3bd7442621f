//! Image preloading use case.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::{ImageKey, ImageSource, PictureCatalog};
use crate::domain::ports::CacheError;
use crate::infrastructure::image::FifoImageCache;

/// Outcome of preloading one image.
#[derive(Debug, Clone)]
pub struct PreloadOutcome {
    /// Image key.
    pub key: ImageKey,
    /// Source and dimensions on success, error otherwise.
    pub result: Result<(ImageSource, u32, u32), CacheError>,
}

/// Summary of a preload run.
#[derive(Debug, Clone, Default)]
pub struct PreloadReport {
    /// Per-key outcomes in request order.
    pub outcomes: Vec<PreloadOutcome>,
}

impl PreloadReport {
    /// Number of images that loaded.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of images that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.loaded()
    }
}

/// Warms the image cache for a set of keys.
pub struct PreloadUseCase {
    cache: Arc<FifoImageCache>,
}

impl PreloadUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(cache: Arc<FifoImageCache>) -> Self {
        Self { cache }
    }

    /// Returns the raw and edited image keys of every picture, in catalog order.
    #[must_use]
    pub fn keys_for_catalog(catalog: &PictureCatalog) -> Vec<ImageKey> {
        catalog
            .pictures()
            .flat_map(|p| [ImageKey::new(&p.raw_path), ImageKey::new(&p.edited_path)])
            .collect()
    }

    /// Preloads all keys concurrently. Failures are reported, not raised.
    pub async fn execute(&self, keys: &[ImageKey]) -> PreloadReport {
        let results = self.cache.preload_batch(keys).await;

        let outcomes: Vec<_> = keys
            .iter()
            .zip(results)
            .map(|(key, result)| PreloadOutcome {
                key: key.clone(),
                result: result.map(|loaded| (loaded.source, loaded.image.width(), loaded.image.height())),
            })
            .collect();

        let report = PreloadReport { outcomes };
        if report.failed() > 0 {
            warn!(failed = report.failed(), "Some images failed to preload");
        }
        info!(loaded = report.loaded(), stats = %self.cache.stats(), "Preload finished");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockImageFetcher;

    #[test]
    fn test_keys_for_catalog() {
        let keys = PreloadUseCase::keys_for_catalog(&PictureCatalog::sample());
        assert_eq!(
            keys,
            vec![
                ImageKey::from("/images/sample-raw.jpg"),
                ImageKey::from("/images/sample-edited.jpg"),
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_reports_failures() {
        let mut fetcher = MockImageFetcher::new();
        fetcher.expect_fetch().times(2).returning(|key| {
            if key.as_str().ends_with("missing.jpg") {
                Err(CacheError::Io("not found".to_string()))
            } else {
                Ok(Arc::new(image::DynamicImage::new_rgb8(3, 2)))
            }
        });
        let cache = Arc::new(FifoImageCache::new(4, Arc::new(fetcher)));
        let use_case = PreloadUseCase::new(cache.clone());

        let keys = [ImageKey::from("/a.jpg"), ImageKey::from("/missing.jpg")];
        let report = use_case.execute(&keys).await;

        assert_eq!(report.loaded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.outcomes[0].result,
            Ok((ImageSource::Network, 3, 2))
        );
        assert!(cache.contains(&keys[0]));
        assert!(!cache.contains(&keys[1]));
    }
}
