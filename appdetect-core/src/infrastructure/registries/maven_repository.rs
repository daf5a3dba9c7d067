//! HTTPS client for a Maven-layout descriptor repository

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{DescriptorRepository, validate_coordinates};
use crate::application::errors::RepositoryError;
use crate::config::RepositoryConfig;
use crate::domain::ArtifactCoordinates;

/// Fetches `<group path>/<artifact>/<version>/<artifact>-<version>.pom` documents
/// from a single allow-listed repository.
pub struct MavenRepositoryClient {
    client: Client,
    base_url: String,
    allowed_hosts: Vec<String>,
}

impl MavenRepositoryClient {
    /// Create a client for `base_url`. The base URL host must itself be allow-listed.
    pub fn new(
        base_url: impl Into<String>,
        allowed_hosts: Vec<String>,
        timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Http {
                message: format!("failed to build HTTP client: {}", e),
                status: None,
            })?;

        let repository = Self {
            client,
            base_url,
            allowed_hosts,
        };

        let base = Url::parse(&repository.base_url).map_err(|e| RepositoryError::InvalidUrl {
            url: repository.base_url.clone(),
            message: e.to_string(),
        })?;
        repository.check_allowed(&base)?;

        Ok(repository)
    }

    pub fn from_config(config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        Self::new(
            config.base_url.clone(),
            config.allowed_hosts.clone(),
            config.request_timeout(),
        )
    }

    /// Canonical location of the descriptor for `coordinates`
    pub fn descriptor_url(&self, coordinates: &ArtifactCoordinates) -> Result<Url, RepositoryError> {
        validate_coordinates(coordinates)?;

        let raw = format!("{}/{}", self.base_url, coordinates.descriptor_path());
        let url = Url::parse(&raw).map_err(|e| RepositoryError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;

        self.check_allowed(&url)?;
        Ok(url)
    }

    fn check_allowed(&self, url: &Url) -> Result<(), RepositoryError> {
        if !matches!(url.scheme(), "https" | "http") {
            return Err(RepositoryError::InvalidUrl {
                url: url.to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let host = url.host_str().unwrap_or_default();
        if self.allowed_hosts.iter().any(|allowed| allowed == host) {
            Ok(())
        } else {
            Err(RepositoryError::HostNotAllowed {
                host: host.to_string(),
            })
        }
    }
}

#[async_trait]
impl DescriptorRepository for MavenRepositoryClient {
    async fn fetch_descriptor(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> Result<Arc<str>, RepositoryError> {
        let url = self.descriptor_url(coordinates)?;

        debug!(coordinates = %coordinates, url = %url, "Fetching remote descriptor");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RepositoryError::Http {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound {
                coordinates: coordinates.clone(),
            });
        }
        if !status.is_success() {
            return Err(RepositoryError::Http {
                message: format!("unexpected status fetching {}", coordinates),
                status: Some(status.as_u16()),
            });
        }

        let body = response.text().await.map_err(|e| RepositoryError::Http {
            message: e.to_string(),
            status: Some(status.as_u16()),
        })?;

        Ok(Arc::from(body))
    }
}
