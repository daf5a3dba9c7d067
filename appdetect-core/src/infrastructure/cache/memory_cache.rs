//! In-memory descriptor cache using moka

use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;
use crate::domain::ArtifactCoordinates;

/// Read-through cache of descriptor documents keyed by coordinates
///
/// Concurrent lookups of the same key share one in-flight load. Failed loads are
/// not cached, so a transient network error is retried on the next lookup.
#[derive(Clone)]
pub struct MemoryCache {
    cache: Cache<ArtifactCoordinates, Arc<str>>,
}

impl MemoryCache {
    /// Create a new in-memory cache with specified capacity and TTL
    pub fn new(max_entries: u64, ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();

        Self { cache }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, config.ttl_seconds)
    }

    /// Get an entry from the cache
    pub async fn get(&self, key: &ArtifactCoordinates) -> Option<Arc<str>> {
        self.cache.get(key).await
    }

    /// Return the cached entry or run `load` and cache its successful result
    pub async fn get_or_try_load<F, E>(
        &self,
        key: &ArtifactCoordinates,
        load: F,
    ) -> Result<Arc<str>, Arc<E>>
    where
        F: Future<Output = Result<Arc<str>, E>>,
        E: Send + Sync + 'static,
    {
        self.cache.try_get_with_by_ref(key, load).await
    }

    /// Invalidate an entry
    pub async fn invalidate(&self, key: &ArtifactCoordinates) {
        self.cache.invalidate(key).await;
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Number of cached entries (approximate until pending tasks run)
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
