//! Memoizing wrapper for descriptor repositories

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::DescriptorRepository;
use crate::application::errors::RepositoryError;
use crate::config::CacheConfig;
use crate::domain::ArtifactCoordinates;
use crate::infrastructure::cache::MemoryCache;

/// Repository wrapper that caches successful fetches by coordinates
///
/// Safe to share across tasks analyzing different modules; the same parent or BOM
/// is downloaded once per cache lifetime.
pub struct CachedRepository<R> {
    inner: R,
    cache: MemoryCache,
}

impl<R: DescriptorRepository> CachedRepository<R> {
    pub fn new(inner: R, cache: MemoryCache) -> Self {
        Self { inner, cache }
    }

    pub fn from_config(inner: R, config: &CacheConfig) -> Self {
        Self::new(inner, MemoryCache::from_config(config))
    }

    pub fn cache(&self) -> &MemoryCache {
        &self.cache
    }
}

#[async_trait]
impl<R: DescriptorRepository> DescriptorRepository for CachedRepository<R> {
    async fn fetch_descriptor(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> Result<Arc<str>, RepositoryError> {
        if let Some(hit) = self.cache.get(coordinates).await {
            debug!(coordinates = %coordinates, "Descriptor cache hit");
            return Ok(hit);
        }

        self.cache
            .get_or_try_load(coordinates, self.inner.fetch_descriptor(coordinates))
            .await
            .map_err(|e| (*e).clone())
    }
}
