//! Static catalog files (`pictures.json`, `videos.json`).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::entities::{PictureCatalog, VideoCatalog};
use crate::domain::errors::{CatalogError, CatalogResult};

/// Pre-generated picture catalog file name.
pub const PICTURES_FILE_NAME: &str = "pictures.json";
/// Video catalog file name.
pub const VIDEOS_FILE_NAME: &str = "videos.json";

/// Reads and writes the JSON catalogs under the content directories.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pictures_dir: PathBuf,
    videos_dir: PathBuf,
}

impl CatalogStore {
    /// Creates a store for the given pictures and videos directories.
    #[must_use]
    pub fn new(pictures_dir: impl Into<PathBuf>, videos_dir: impl Into<PathBuf>) -> Self {
        Self {
            pictures_dir: pictures_dir.into(),
            videos_dir: videos_dir.into(),
        }
    }

    /// Path of the static picture catalog.
    #[must_use]
    pub fn pictures_path(&self) -> PathBuf {
        self.pictures_dir.join(PICTURES_FILE_NAME)
    }

    /// Path of the video catalog.
    #[must_use]
    pub fn videos_path(&self) -> PathBuf {
        self.videos_dir.join(VIDEOS_FILE_NAME)
    }

    /// Reads the static picture catalog, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file exists but cannot be read or parsed.
    pub fn read_pictures(&self) -> CatalogResult<Option<PictureCatalog>> {
        match Self::read_json(&self.pictures_path()) {
            Ok(catalog) => Ok(Some(catalog)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes the picture catalog atomically.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be written.
    pub fn write_pictures(&self, catalog: &PictureCatalog) -> CatalogResult<PathBuf> {
        let path = self.pictures_path();
        fs::create_dir_all(&self.pictures_dir)?;
        Self::save_to_file(&path, catalog)?;
        info!(path = %path.display(), pictures = catalog.picture_count(), "Wrote picture catalog");
        Ok(path)
    }

    /// Reads the video catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if `videos.json` is missing, or another
    /// `CatalogError` if it cannot be read or parsed.
    pub fn read_videos(&self) -> CatalogResult<VideoCatalog> {
        Self::read_json(&self.videos_path())
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> CatalogResult<T> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::not_found(path));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), "Parsing catalog");
        Ok(serde_json::from_str(&content)?)
    }

    fn save_to_file<T: serde::Serialize>(path: &Path, data: &T) -> CatalogResult<()> {
        let content = serde_json::to_string_pretty(data)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.write_all(b"\n")?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}
