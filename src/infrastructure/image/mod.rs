//! Image handling infrastructure.
//!
//! This module provides:
//! - Bounded in-memory caching with insertion-order eviction
//! - An HTTP/local-file fetcher used to fill the cache

pub mod http_fetcher;
pub mod memory_cache;

pub use http_fetcher::{HttpImageFetcher, ImageFetcherConfig, Location};
pub use memory_cache::{CacheStats, DEFAULT_CACHE_SIZE, FifoImageCache};
