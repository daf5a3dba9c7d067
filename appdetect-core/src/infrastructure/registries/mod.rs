/*
 Infrastructure: Remote Descriptor Repositories

 This module defines the abstraction used by the effective descriptor resolver to
 fetch parent descriptors and imported BOMs that are not on the local file system.

 - Domain:         ArtifactCoordinates live in crate::domain
 - Application:    the resolver swallows RepositoryError values (logged, non-fatal)
 - Infrastructure: MavenRepositoryClient implements the trait over HTTPS,
                   CachedRepository memoizes any implementation,
                   OfflineRepository never touches the network
*/

pub mod cached;
pub mod maven_repository;

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::RepositoryError;
use crate::config::{CacheConfig, RepositoryConfig};
use crate::domain::ArtifactCoordinates;

pub use cached::CachedRepository;
pub use maven_repository::MavenRepositoryClient;

/// Trait for fetching raw descriptor documents by coordinates.
/// - Implementations should:
///   - Reject coordinates that would escape the repository layout
///   - Only contact allow-listed hosts
///   - Be deterministic: the same coordinates always yield the same document
#[async_trait]
pub trait DescriptorRepository: Send + Sync {
    /// Fetch the descriptor text for `coordinates`.
    async fn fetch_descriptor(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> Result<Arc<str>, RepositoryError>;
}

/// Repository used when the network is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRepository;

#[async_trait]
impl DescriptorRepository for OfflineRepository {
    async fn fetch_descriptor(
        &self,
        _coordinates: &ArtifactCoordinates,
    ) -> Result<Arc<str>, RepositoryError> {
        Err(RepositoryError::Offline)
    }
}

/// Build the repository stack described by the configuration
pub fn build_repository(
    repository: &RepositoryConfig,
    cache: &CacheConfig,
) -> Result<Arc<dyn DescriptorRepository>, RepositoryError> {
    if repository.offline {
        return Ok(Arc::new(OfflineRepository));
    }

    let client = MavenRepositoryClient::from_config(repository)?;
    if cache.enabled {
        Ok(Arc::new(CachedRepository::from_config(client, cache)))
    } else {
        Ok(Arc::new(client))
    }
}

/// Reject coordinates that could alter the request path
pub(crate) fn validate_coordinates(
    coordinates: &ArtifactCoordinates,
) -> Result<(), RepositoryError> {
    let invalid = |reason: &str| RepositoryError::InvalidCoordinates {
        coordinates: coordinates.clone(),
        reason: reason.to_string(),
    };

    if !coordinates.is_concrete() {
        return Err(invalid("coordinates must be non-empty and placeholder-free"));
    }

    for part in [
        &coordinates.group_id,
        &coordinates.artifact_id,
        &coordinates.version,
    ] {
        if part.contains("..")
            || part
                .chars()
                .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%' | '@' | ':') || c.is_whitespace())
        {
            return Err(invalid("coordinates contain path or URL syntax"));
        }
    }

    Ok(())
}
