//! In-memory image cache backed by `moka`.

use artisan_market_core::image_cache::{EvictionPolicy, ImageCache, ImageKey};
use moka::sync::Cache;

/// Process-wide image cache keyed by flat storage keys.
///
/// With [`EvictionPolicy::Unbounded`] entries live until the process exits;
/// with [`EvictionPolicy::MaxEntries`] moka evicts by its TinyLFU policy.
#[derive(Clone)]
pub struct MokaImageCache {
    cache: Cache<String, String>,
    policy: EvictionPolicy,
}

impl MokaImageCache {
    /// Create a cache applying `policy`.
    #[must_use]
    pub fn new(policy: EvictionPolicy) -> Self {
        let cache = match policy {
            EvictionPolicy::Unbounded => Cache::builder().build(),
            EvictionPolicy::MaxEntries(max) => Cache::builder().max_capacity(max).build(),
        };
        Self { cache, policy }
    }

    /// Approximate number of stored entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl ImageCache for MokaImageCache {
    fn get(&self, key: &ImageKey) -> Option<String> {
        self.cache.get(&key.storage_key())
    }

    fn set(&self, key: ImageKey, data_uri: String) {
        tracing::debug!(key = %key, bytes = data_uri.len(), "Caching image");
        self.cache.insert(key.storage_key(), data_uri);
    }

    fn has(&self, key: &ImageKey) -> bool {
        self.cache.contains_key(&key.storage_key())
    }

    fn policy(&self) -> EvictionPolicy {
        self.policy
    }
}
