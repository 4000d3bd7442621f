//! In-memory bounded image cache with insertion-order (FIFO) eviction.

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::domain::entities::{ImageKey, ImageSource, LoadedImage};
use crate::domain::ports::{CacheResult, ImageFetcher};

/// Default maximum number of images to cache in memory.
pub const DEFAULT_CACHE_SIZE: usize = 30;

type SharedFetch = Shared<BoxFuture<'static, CacheResult<Arc<image::DynamicImage>>>>;

#[derive(Default)]
struct FifoState {
    entries: HashMap<ImageKey, Arc<image::DynamicImage>>,
    /// Keys oldest first.
    order: VecDeque<ImageKey>,
}

/// Bounded cache of decoded images.
///
/// When full, inserting a new key evicts the key that was inserted first.
/// Lookups and overwrites never change a key's position, so this is FIFO,
/// not LRU. All mutations go through one lock, so the size bound holds
/// under concurrent use.
pub struct FifoImageCache {
    state: Mutex<FifoState>,
    capacity: NonZeroUsize,
    fetcher: Arc<dyn ImageFetcher>,
    single_flight: bool,
    in_flight: Mutex<HashMap<ImageKey, SharedFetch>>,
    hits: AtomicU64,
    misses: AtomicU64,
    fetches: AtomicU64,
    evictions: AtomicU64,
}

impl FifoImageCache {
    /// Creates a cache holding at most `capacity` images (minimum 1).
    #[must_use]
    pub fn new(capacity: usize, fetcher: Arc<dyn ImageFetcher>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(FifoState::default()),
            capacity,
            fetcher,
            single_flight: false,
            in_flight: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            fetches: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Creates a cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self::new(DEFAULT_CACHE_SIZE, fetcher)
    }

    /// Merges concurrent preloads of the same uncached key into one fetch.
    #[must_use]
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }

    /// Returns the maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the current number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `key` is cached.
    #[must_use]
    pub fn contains(&self, key: &ImageKey) -> bool {
        self.state.lock().entries.contains_key(key)
    }

    /// Returns the cached image for `key`. Never loads, never reorders.
    #[must_use]
    pub fn get(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>> {
        self.state.lock().entries.get(key).cloned()
    }

    /// Stores `image` under `key`.
    ///
    /// An existing key keeps its eviction position and only has its value
    /// replaced. A new key evicts the oldest entry first if the cache is full.
    pub fn put(&self, key: ImageKey, image: Arc<image::DynamicImage>) {
        let mut state = self.state.lock();

        if let Some(slot) = state.entries.get_mut(&key) {
            trace!(key = %key, "Replacing cached image in place");
            *slot = image;
            return;
        }

        if state.entries.len() >= self.capacity.get()
            && let Some(oldest) = state.order.pop_front()
        {
            state.entries.remove(&oldest);
            self.evictions.fetch_add(1, Ordering::Relaxed);
            debug!(key = %oldest, "Evicted oldest image from cache");
        }

        trace!(key = %key, "Storing image in cache");
        state.order.push_back(key.clone());
        state.entries.insert(key, image);
    }

    /// Removes `key`, returning its image if it was cached.
    pub fn remove(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>> {
        let mut state = self.state.lock();
        let image = state.entries.remove(key)?;
        state.order.retain(|k| k != key);
        Some(image)
    }

    /// Empties the cache.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order.clear();
        debug!("Cleared image cache");
    }

    /// Returns cached keys, oldest first.
    #[must_use]
    pub fn keys(&self) -> Vec<ImageKey> {
        self.state.lock().order.iter().cloned().collect()
    }

    /// Returns the cached image, or fetches and caches it.
    ///
    /// A failed fetch is returned to the caller and not cached, so a later
    /// call fetches again.
    ///
    /// # Errors
    /// Returns the fetcher's error if the image is not cached and cannot be loaded.
    pub async fn preload(&self, key: &ImageKey) -> CacheResult<LoadedImage> {
        if let Some(image) = self.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Preload served from cache");
            return Ok(LoadedImage {
                key: key.clone(),
                image,
                source: ImageSource::Cache,
            });
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let result = if self.single_flight {
            self.fetch_shared(key).await
        } else {
            self.fetches.fetch_add(1, Ordering::Relaxed);
            self.fetcher.fetch(key).await
        };

        match result {
            Ok(image) => {
                self.put(key.clone(), image.clone());
                debug!(key = %key, "Preloaded image");
                Ok(LoadedImage {
                    key: key.clone(),
                    image,
                    source: ImageSource::Network,
                })
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to preload image");
                Err(e)
            }
        }
    }

    /// Preloads every key concurrently, returning results in input order.
    pub async fn preload_batch(&self, keys: &[ImageKey]) -> Vec<CacheResult<LoadedImage>> {
        futures_util::future::join_all(keys.iter().map(|key| self.preload(key))).await
    }

    async fn fetch_shared(&self, key: &ImageKey) -> CacheResult<Arc<image::DynamicImage>> {
        let fetch = {
            let mut in_flight = self.in_flight.lock();
            if let Some(pending) = in_flight.get(key) {
                trace!(key = %key, "Joining in-flight fetch");
                pending.clone()
            } else {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                let fetcher = Arc::clone(&self.fetcher);
                let owned_key = key.clone();
                let pending = async move { fetcher.fetch(&owned_key).await }
                    .boxed()
                    .shared();
                in_flight.insert(key.clone(), pending.clone());
                pending
            }
        };

        let result = fetch.clone().await;

        let mut in_flight = self.in_flight.lock();
        if in_flight
            .get(key)
            .is_some_and(|pending| Shared::ptr_eq(pending, &fetch))
        {
            in_flight.remove(key);
        }

        result
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            fetches: self.fetches.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            size: self.len(),
            capacity: self.capacity(),
        }
    }
}

impl std::fmt::Debug for FifoImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FifoImageCache")
            .field("capacity", &self.capacity)
            .field("single_flight", &self.single_flight)
            .finish_non_exhaustive()
    }
}

/// Statistics about preload performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Preloads served from the cache.
    pub hits: u64,
    /// Preloads that needed a fetch.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Fetches actually issued.
    pub fetches: u64,
    /// Entries evicted to stay within capacity.
    pub evictions: u64,
    /// Current number of cached images.
    pub size: usize,
    /// Maximum number of cached images.
    pub capacity: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {}/{} images, {:.1}% hit rate ({} hits, {} misses, {} fetches, {} evictions)",
            self.size,
            self.capacity,
            self.hit_rate,
            self.hits,
            self.misses,
            self.fetches,
            self.evictions
        )
    }
}
