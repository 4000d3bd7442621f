//! Folio - content backend for a photography portfolio.
//!
//! This crate builds the raw/edited picture catalog from content directories,
//! serves the static video catalog, and provides a bounded image cache with
//! asynchronous preloading.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing catalog services and use cases.
pub mod application;
/// Domain layer containing entities, errors, pairing rules and ports.
pub mod domain;
/// Infrastructure layer containing filesystem, network and config adapters.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
