//! Builds the picture and video catalogs served to the front end.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{Category, PictureCatalog, PictureCategory, VideoCatalog};
use crate::domain::errors::CatalogResult;
use crate::domain::ports::PictureSource;
use crate::domain::services::PicturePairing;
use crate::infrastructure::content::CatalogStore;

/// Serves catalogs from static files, falling back to a directory scan.
pub struct CatalogService {
    source: Arc<dyn PictureSource>,
    store: CatalogStore,
    pairing: PicturePairing,
}

impl CatalogService {
    /// Creates a new service.
    #[must_use]
    pub fn new(source: Arc<dyn PictureSource>, store: CatalogStore, pairing: PicturePairing) -> Self {
        Self {
            source,
            store,
            pairing,
        }
    }

    /// Returns the static `pictures.json` if present, otherwise scans the
    /// category directories.
    ///
    /// # Errors
    /// Returns error if `pictures.json` exists but cannot be read or parsed.
    pub fn pictures(&self) -> CatalogResult<PictureCatalog> {
        if let Some(catalog) = self.store.read_pictures()? {
            debug!(path = %self.store.pictures_path().display(), "Serving static picture catalog");
            return Ok(catalog);
        }
        Ok(self.generate_pictures())
    }

    /// Like [`Self::pictures`], but any failure yields the sample catalog.
    #[must_use]
    pub fn pictures_or_sample(&self) -> PictureCatalog {
        self.pictures().unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to sample picture catalog");
            PictureCatalog::sample()
        })
    }

    /// Scans every category directory and pairs raw/edited files.
    ///
    /// Missing directories and categories without complete pairs are left
    /// out of the catalog.
    #[must_use]
    pub fn generate_pictures(&self) -> PictureCatalog {
        let mut categories = Vec::new();

        for category in Category::ALL {
            let Some(files) = self.source.list(category) else {
                debug!(%category, "No directory for category");
                continue;
            };
            let pictures = self.pairing.resolve(&files, category);
            if pictures.is_empty() {
                debug!(%category, files = files.len(), "No complete pairs in category");
                continue;
            }
            categories.push(PictureCategory::new(category, pictures));
        }

        let catalog = PictureCatalog::generated(categories);
        info!(
            categories = catalog.categories.len(),
            pictures = catalog.picture_count(),
            "Generated picture catalog"
        );
        catalog
    }

    /// Generates the catalog and writes it as the static `pictures.json`.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn export_pictures(&self) -> CatalogResult<(PictureCatalog, PathBuf)> {
        let catalog = self.generate_pictures();
        let path = self.store.write_pictures(&catalog)?;
        Ok((catalog, path))
    }

    /// Returns the video catalog.
    ///
    /// # Errors
    /// Returns `CatalogError::NotFound` if `videos.json` is missing.
    pub fn videos(&self) -> CatalogResult<VideoCatalog> {
        self.store.read_videos()
    }

    /// Like [`Self::videos`], but any failure yields the sample catalog.
    #[must_use]
    pub fn videos_or_sample(&self) -> VideoCatalog {
        self.videos().unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to sample video catalog");
            VideoCatalog::sample()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CatalogError;
    use crate::domain::ports::mocks::MockPictureSource;
    use std::fs;
    use tempfile::tempdir;

    fn service(source: MockPictureSource, root: &std::path::Path) -> CatalogService {
        CatalogService::new(
            Arc::new(source),
            CatalogStore::new(root.join("pictures"), root.join("videos")),
            PicturePairing::new("/content/pictures"),
        )
    }

    #[test]
    fn test_generate_skips_empty_and_missing_categories() {
        let dir = tempdir().unwrap();
        let source = MockPictureSource::new().with_files(
            Category::Horizontal,
            &["Sunset raw.jpg", "Sunset edit.jpg", "Lonely raw.jpg"],
        );
        let catalog = service(source, dir.path()).generate_pictures();

        assert_eq!(catalog.title, "Picture");
        assert_eq!(catalog.description, "See the difference!");
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].id, "horizontal");
        assert_eq!(catalog.categories[0].pictures[0].id, "sunset");
    }

    #[test]
    fn test_generate_orders_horizontal_before_vertical() {
        let dir = tempdir().unwrap();
        let source = MockPictureSource::new()
            .with_files(Category::Vertical, &["Tower raw.jpg", "Tower edit.jpg"])
            .with_files(Category::Horizontal, &["Bay raw.jpeg", "Bay edit.jpeg"]);
        let catalog = service(source, dir.path()).generate_pictures();

        let ids: Vec<_> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["horizontal", "vertical"]);
        assert_eq!(
            catalog.categories[1].pictures[0].raw_path,
            "/content/pictures/vertical/Tower raw.jpg"
        );
    }

    #[test]
    fn test_no_directories_gives_empty_catalog() {
        let dir = tempdir().unwrap();
        let catalog = service(MockPictureSource::new(), dir.path()).generate_pictures();
        assert!(catalog.categories.is_empty());
    }

    #[test]
    fn test_static_file_takes_precedence() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pictures")).unwrap();
        let json = serde_json::to_string(&PictureCatalog::sample()).unwrap();
        fs::write(dir.path().join("pictures/pictures.json"), json).unwrap();

        let source = MockPictureSource::new()
            .with_files(Category::Horizontal, &["Sunset raw.jpg", "Sunset edit.jpg"]);
        let catalog = service(source, dir.path()).pictures().unwrap();

        assert_eq!(catalog, PictureCatalog::sample());
    }

    #[test]
    fn test_export_then_serve() {
        let dir = tempdir().unwrap();
        let source = MockPictureSource::new()
            .with_files(Category::Horizontal, &["Sunset raw.jpg", "Sunset edit.jpg"]);
        let service = service(source, dir.path());

        let (exported, path) = service.export_pictures().unwrap();
        assert!(path.exists());
        assert_eq!(service.pictures().unwrap(), exported);
    }

    #[test]
    fn test_malformed_static_file_falls_back_to_sample() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pictures")).unwrap();
        fs::write(dir.path().join("pictures/pictures.json"), "[").unwrap();
        let service = service(MockPictureSource::new(), dir.path());

        assert!(matches!(service.pictures(), Err(CatalogError::Json(_))));
        assert_eq!(service.pictures_or_sample(), PictureCatalog::sample());
    }

    #[test]
    fn test_missing_videos() {
        let dir = tempdir().unwrap();
        let service = service(MockPictureSource::new(), dir.path());

        assert!(service.videos().unwrap_err().is_not_found());
        assert_eq!(service.videos_or_sample(), VideoCatalog::sample());
    }
}
