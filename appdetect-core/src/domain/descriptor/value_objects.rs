//! Descriptor value objects

use serde::{Deserialize, Serialize};

/// Dependency scope as declared in a descriptor
///
/// An empty or missing `<scope>` is `compile`, which is how the build tool itself
/// treats it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    /// Bill-of-materials import, only meaningful inside `dependencyManagement`
    Import,
    /// Anything the build tool would reject; kept verbatim so keys stay distinct
    Other(String),
}

impl DependencyScope {
    /// Parse a scope from descriptor text. Blank text yields `Compile`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "compile" => Self::Compile,
            "provided" => Self::Provided,
            "runtime" => Self::Runtime,
            "test" => Self::Test,
            "system" => Self::System,
            "import" => Self::Import,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::System => "system",
            Self::Import => "import",
            Self::Other(value) => value,
        }
    }
}

impl std::fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully qualified artifact coordinates (`groupId:artifactId:version`)
///
/// Used to address descriptors in a remote repository and as the identity key of
/// the resolver's cycle guard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ArtifactCoordinates {
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

    /// Path of the descriptor relative to a repository root, e.g.
    /// `org/springframework/boot/spring-boot-dependencies/3.2.0/spring-boot-dependencies-3.2.0.pom`
    pub fn descriptor_path(&self) -> String {
        format!(
            "{}/{}/{}/{}-{}.pom",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.artifact_id,
            self.version
        )
    }

    /// Whether every component is non-empty and free of placeholders
    pub fn is_concrete(&self) -> bool {
        [&self.group_id, &self.artifact_id, &self.version]
            .iter()
            .all(|part| !part.trim().is_empty() && !part.contains("${"))
    }
}

impl std::fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
