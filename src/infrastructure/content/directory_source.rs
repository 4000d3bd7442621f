//! Picture source reading category subdirectories.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::domain::entities::Category;
use crate::domain::ports::PictureSource;

/// Lists `root/<category>/` on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryPictureSource {
    root: PathBuf,
}

impl DirectoryPictureSource {
    /// Creates a source rooted at the pictures content directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PictureSource for DirectoryPictureSource {
    fn list(&self, category: Category) -> Option<Vec<String>> {
        let dir = self.root.join(category.dir_name());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %dir.display(), error = %e, "Category directory unavailable");
                return None;
            }
        };

        let mut files = Vec::new();
        for entry in entries.flatten() {
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(name) => warn!(?name, "Skipping file with non UTF-8 name"),
            }
        }

        debug!(%category, count = files.len(), "Listed category directory");
        Some(files)
    }
}
