//! Application layer with catalog services and use cases.

/// Catalog services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::CatalogService;
pub use use_cases::{PreloadReport, PreloadUseCase};
