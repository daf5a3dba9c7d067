//! In-memory descriptor repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use appdetect_core::application::errors::RepositoryError;
use appdetect_core::domain::ArtifactCoordinates;
use appdetect_core::infrastructure::registries::DescriptorRepository;

/// Serves descriptors from a map keyed by `g:a:v` and counts requests
#[derive(Default)]
pub struct InMemoryRepository {
    descriptors: HashMap<String, Arc<str>>,
    requests: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, group_id: &str, artifact_id: &str, version: &str, xml: &str) -> Self {
        self.descriptors.insert(
            format!("{}:{}:{}", group_id, artifact_id, version),
            Arc::from(xml),
        );
        self
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DescriptorRepository for InMemoryRepository {
    async fn fetch_descriptor(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> Result<Arc<str>, RepositoryError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.descriptors
            .get(&coordinates.to_string())
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                coordinates: coordinates.clone(),
            })
    }
}
