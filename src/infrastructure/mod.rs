//! Infrastructure layer with filesystem, network and configuration adapters.

/// Application configuration.
pub mod config;
/// Content directories and static catalog files.
pub mod content;
/// Image caching and fetching.
pub mod image;

pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager};
pub use content::{CatalogStore, DirectoryPictureSource};
pub use self::image::{CacheStats, FifoImageCache, HttpImageFetcher, ImageFetcherConfig};
