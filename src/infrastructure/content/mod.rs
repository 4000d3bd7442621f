//! Filesystem access to portfolio content.

mod catalog_store;
mod directory_source;

pub use catalog_store::{CatalogStore, PICTURES_FILE_NAME, VIDEOS_FILE_NAME};
pub use directory_source::DirectoryPictureSource;
