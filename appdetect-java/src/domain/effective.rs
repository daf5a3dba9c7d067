//! Effective descriptor

use serde::Serialize;
use std::path::PathBuf;

use appdetect_core::domain::{ArtifactCoordinates, Dependency, Descriptor, ParentReference, Plugin};

use super::{ManagedDependencyMap, PropertyMap};

/// A descriptor after profile, parent and import absorption
///
/// Produced fresh by every top-level resolution and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveDescriptor {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub parent: Option<ParentReference>,
    pub modules: Vec<String>,
    pub properties: PropertyMap,
    pub managed_dependencies: ManagedDependencyMap,
    pub dependencies: Vec<Dependency>,
    pub plugins: Vec<Plugin>,
    pub path: Option<PathBuf>,
}

impl EffectiveDescriptor {
    pub fn coordinates(&self) -> ArtifactCoordinates {
        ArtifactCoordinates::new(&self.group_id, &self.artifact_id, &self.version)
    }

    pub fn dependency(&self, group_id: &str, artifact_id: &str) -> Option<&Dependency> {
        self.dependencies
            .iter()
            .find(|d| d.matches(group_id, artifact_id))
    }

    pub fn has_dependency(&self, group_id: &str, artifact_id: &str) -> bool {
        self.dependency(group_id, artifact_id).is_some()
    }

    pub fn has_plugin(&self, group_id: &str, artifact_id: &str) -> bool {
        self.plugins.iter().any(|p| p.matches(group_id, artifact_id))
    }

    /// Multi-module root projects list their children in `<modules>`
    pub fn is_aggregator(&self) -> bool {
        !self.modules.is_empty()
    }

    /// Plain descriptor view. Profiles are already absorbed, so none are emitted.
    pub fn to_descriptor(&self) -> Descriptor {
        Descriptor {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            parent: self.parent.clone(),
            modules: self.modules.clone(),
            properties: self.properties.to_properties(),
            dependencies: self.dependencies.clone(),
            managed_dependencies: self.managed_dependencies.to_dependencies(),
            plugins: self.plugins.clone(),
            profiles: Vec::new(),
            path: self.path.clone(),
        }
    }
}
