//! Domain layer with catalog entities, pairing rules and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{Category, ImageKey, PictureCatalog, PictureRecord, VideoCatalog};
pub use errors::CatalogError;
pub use ports::{ImageFetcher, PictureSource};
pub use services::PicturePairing;
