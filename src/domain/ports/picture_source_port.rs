//! Port for listing picture files.

use crate::domain::entities::Category;

/// Lists the filenames available for a picture category.
pub trait PictureSource: Send + Sync {
    /// Returns the filenames in the category's directory,
    /// or `None` if the directory does not exist.
    fn list(&self, category: Category) -> Option<Vec<String>>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// In-memory picture source for testing.
    #[derive(Default)]
    pub struct MockPictureSource {
        files: HashMap<Category, Vec<String>>,
    }

    impl MockPictureSource {
        /// Creates a source with no directories.
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a directory listing for `category`.
        pub fn with_files(mut self, category: Category, files: &[&str]) -> Self {
            self.files
                .insert(category, files.iter().map(ToString::to_string).collect());
            self
        }
    }

    impl PictureSource for MockPictureSource {
        fn list(&self, category: Category) -> Option<Vec<String>> {
            self.files.get(&category).cloned()
        }
    }
}
