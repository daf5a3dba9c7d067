//! Descriptor entities

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::value_objects::{ArtifactCoordinates, DependencyScope};

/// A single `<properties>` entry, kept in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A declared dependency or `dependencyManagement` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    /// May be empty or a `${...}` placeholder until resolved
    pub version: String,
    pub scope: DependencyScope,
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        scope: DependencyScope,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            scope,
        }
    }

    /// Same `groupId:artifactId`, ignoring version and scope
    pub fn same_artifact(&self, other: &Dependency) -> bool {
        self.group_id == other.group_id && self.artifact_id == other.artifact_id
    }

    pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }

    pub fn has_version(&self) -> bool {
        !self.version.trim().is_empty()
    }
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.scope
        )
    }
}

/// A `<build><plugins><plugin>` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Plugin {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    pub fn same_artifact(&self, other: &Plugin) -> bool {
        self.group_id == other.group_id && self.artifact_id == other.artifact_id
    }

    pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }
}

/// Reference to the descriptor this one inherits from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParentReference {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Declared `<relativePath>`; empty means the default `../pom.xml`
    pub relative_path: String,
}

impl ParentReference {
    /// A parent only counts when both group and artifact are declared
    pub fn is_declared(&self) -> bool {
        !self.group_id.trim().is_empty() && !self.artifact_id.trim().is_empty()
    }

    pub fn coordinates(&self) -> ArtifactCoordinates {
        ArtifactCoordinates::new(&self.group_id, &self.artifact_id, &self.version)
    }
}

/// A `<profile>` block. Only `activeByDefault` profiles are ever absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub active_by_default: bool,
    pub properties: Vec<Property>,
    pub dependencies: Vec<Dependency>,
    pub managed_dependencies: Vec<Dependency>,
    pub plugins: Vec<Plugin>,
}

/// One parsed descriptor file, exactly as declared
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Descriptor {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub parent: Option<ParentReference>,
    /// Sub-module names of a multi-module (aggregator) project
    pub modules: Vec<String>,
    pub properties: Vec<Property>,
    pub dependencies: Vec<Dependency>,
    pub managed_dependencies: Vec<Dependency>,
    pub plugins: Vec<Plugin>,
    pub profiles: Vec<Profile>,
    /// Location on disk; `None` for descriptors fetched from a remote repository
    pub path: Option<PathBuf>,
}

impl Descriptor {
    /// Declared parent, if it names both a group and an artifact
    pub fn declared_parent(&self) -> Option<&ParentReference> {
        self.parent.as_ref().filter(|parent| parent.is_declared())
    }

    /// Group identifier, inherited from the parent reference when not declared
    pub fn effective_group_id(&self) -> &str {
        match (&self.parent, self.group_id.trim().is_empty()) {
            (Some(parent), true) => &parent.group_id,
            _ => &self.group_id,
        }
    }

    /// Version, inherited from the parent reference when not declared
    pub fn effective_version(&self) -> &str {
        match (&self.parent, self.version.trim().is_empty()) {
            (Some(parent), true) => &parent.version,
            _ => &self.version,
        }
    }

    pub fn coordinates(&self) -> ArtifactCoordinates {
        ArtifactCoordinates::new(
            self.effective_group_id(),
            &self.artifact_id,
            self.effective_version(),
        )
    }

    /// Multi-module root projects list their children in `<modules>`
    pub fn is_aggregator(&self) -> bool {
        !self.modules.is_empty()
    }
}
