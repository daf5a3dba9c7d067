//! Inferred resources, detection metadata and rationale

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::EffectiveDescriptor;

/// Database engines the rule catalog can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Postgres,
    MySql,
    Redis,
    Mongo,
    Cosmos,
}

impl DatabaseKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Postgres => "PostgreSQL",
            Self::MySql => "MySQL",
            Self::Redis => "Redis",
            Self::Mongo => "MongoDB",
            Self::Cosmos => "Cosmos DB",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identity of an inferred resource, used for deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Database(DatabaseKind),
    ServiceBus,
    EventHubs,
    StorageAccount,
}

/// A managed cloud resource the module depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "resource", rename_all = "snake_case")]
pub enum InferredDependency {
    Database {
        kind: DatabaseKind,
    },
    ServiceBus {
        queues: Vec<String>,
        is_jms: bool,
    },
    EventHubs {
        hub_names: Vec<String>,
        use_kafka: bool,
        spring_boot_version: Option<String>,
    },
    StorageAccount {
        container_names: Vec<String>,
    },
}

impl InferredDependency {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Database { kind } => ResourceKind::Database(*kind),
            Self::ServiceBus { .. } => ResourceKind::ServiceBus,
            Self::EventHubs { .. } => ResourceKind::EventHubs,
            Self::StorageAccount { .. } => ResourceKind::StorageAccount,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Database { kind } => kind.display_name(),
            Self::ServiceBus { .. } => "Azure Service Bus",
            Self::EventHubs { .. } => "Azure Event Hubs",
            Self::StorageAccount { .. } => "Azure Storage Account",
        }
    }

    /// Fold a second detection of the same resource into this one: names are
    /// unioned and flags are or-ed. Returns `false` if the kinds differ.
    pub fn merge(&mut self, other: InferredDependency) -> bool {
        match (self, other) {
            (Self::Database { kind }, Self::Database { kind: other }) => *kind == other,
            (
                Self::ServiceBus { queues, is_jms },
                Self::ServiceBus {
                    queues: other_queues,
                    is_jms: other_jms,
                },
            ) => {
                union_into(queues, other_queues);
                *is_jms |= other_jms;
                true
            }
            (
                Self::EventHubs {
                    hub_names,
                    use_kafka,
                    spring_boot_version,
                },
                Self::EventHubs {
                    hub_names: other_names,
                    use_kafka: other_kafka,
                    spring_boot_version: other_version,
                },
            ) => {
                union_into(hub_names, other_names);
                *use_kafka |= other_kafka;
                if spring_boot_version.is_none() {
                    *spring_boot_version = other_version;
                }
                true
            }
            (
                Self::StorageAccount { container_names },
                Self::StorageAccount {
                    container_names: other_names,
                },
            ) => {
                union_into(container_names, other_names);
                true
            }
            _ => false,
        }
    }
}

fn union_into(target: &mut Vec<String>, incoming: Vec<String>) {
    for name in incoming {
        if !target.contains(&name) {
            target.push(name);
        }
    }
}

/// Facts about the application that are not resources themselves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionMetadata {
    pub application_name: Option<String>,
    pub server_port: Option<u16>,
    pub database_names: BTreeMap<DatabaseKind, String>,
    pub spring_boot_version: Option<String>,
    pub contains_spring_cloud_azure_starter: bool,
    pub contains_spring_cloud_azure_starter_jdbc_postgresql: bool,
    pub contains_spring_cloud_azure_starter_jdbc_mysql: bool,
    pub contains_spring_cloud_eureka_server: bool,
    pub contains_spring_cloud_eureka_client: bool,
    pub contains_spring_cloud_config_server: bool,
    pub contains_spring_cloud_config_client: bool,
    pub contains_spring_frontend: bool,
}

/// Why something was detected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rationale {
    /// What was detected, e.g. `PostgreSQL` or `spring.application.name`
    pub subject: String,
    /// `groupId:artifactId` of the triggering dependency or plugin
    pub dependency: Option<String>,
    /// Configuration key the detection read, if any
    pub config_key: Option<String>,
    pub message: String,
}

impl Rationale {
    /// A resource detected because a dependency is present
    pub fn for_dependency(subject: &str, group_id: &str, artifact_id: &str) -> Self {
        Self::for_dependency_with_condition(subject, group_id, artifact_id, None)
    }

    /// A resource detected because a dependency is present and an extra condition holds
    pub fn for_dependency_with_condition(
        subject: &str,
        group_id: &str,
        artifact_id: &str,
        condition: Option<&str>,
    ) -> Self {
        let extra = condition
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| format!(" and {}", c))
            .unwrap_or_default();
        Self {
            subject: subject.to_string(),
            dependency: Some(format!("{}:{}", group_id, artifact_id)),
            config_key: None,
            message: format!(
                "Detected '{}' because found dependency '{}:{}' in pom.xml file{}.",
                subject, group_id, artifact_id, extra
            ),
        }
    }

    /// A metadata field filled from a configuration key
    pub fn for_config_key(subject: &str, key: &str, value: &str) -> Self {
        Self {
            subject: subject.to_string(),
            dependency: None,
            config_key: Some(key.to_string()),
            message: format!("Metadata updated. {} = {} (from '{}').", subject, value, key),
        }
    }

    /// A metadata field read from a dependency or plugin declaration
    pub fn for_declared_version(
        subject: &str,
        group_id: &str,
        artifact_id: &str,
        value: &str,
    ) -> Self {
        Self {
            subject: subject.to_string(),
            dependency: Some(format!("{}:{}", group_id, artifact_id)),
            config_key: None,
            message: format!(
                "Metadata updated. {} = {} (from '{}:{}' in pom.xml file).",
                subject, value, group_id, artifact_id
            ),
        }
    }

    /// A metadata flag set because a dependency or plugin is present
    pub fn for_metadata_flag(flag: &str, group_id: &str, artifact_id: &str) -> Self {
        Self {
            subject: flag.to_string(),
            dependency: Some(format!("{}:{}", group_id, artifact_id)),
            config_key: None,
            message: format!(
                "Metadata updated. {} = true because found '{}:{}' in pom.xml file.",
                flag, group_id, artifact_id
            ),
        }
    }

    pub fn with_config_key(mut self, key: impl Into<String>) -> Self {
        self.config_key = Some(key.into());
        self
    }
}

/// Everything the rule engine produced for one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InferenceReport {
    pub dependencies: Vec<InferredDependency>,
    pub metadata: DetectionMetadata,
    pub rationale: Vec<Rationale>,
}

impl InferenceReport {
    /// Record a detection, merging it into an existing entry of the same kind
    pub fn record(&mut self, dependency: InferredDependency) {
        let kind = dependency.kind();
        match self.dependencies.iter_mut().find(|d| d.kind() == kind) {
            Some(existing) => {
                existing.merge(dependency);
            }
            None => self.dependencies.push(dependency),
        }
    }

    pub fn find(&self, kind: ResourceKind) -> Option<&InferredDependency> {
        self.dependencies.iter().find(|d| d.kind() == kind)
    }

    pub fn databases(&self) -> impl Iterator<Item = DatabaseKind> + '_ {
        self.dependencies.iter().filter_map(|d| match d {
            InferredDependency::Database { kind } => Some(*kind),
            _ => None,
        })
    }
}

/// A detected Java application module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaProject {
    pub path: PathBuf,
    pub descriptor: EffectiveDescriptor,
    pub dependencies: Vec<InferredDependency>,
    pub metadata: DetectionMetadata,
    pub rationale: Vec<Rationale>,
}

impl JavaProject {
    /// A module whose framework precondition failed has an empty report
    pub fn new(path: PathBuf, descriptor: EffectiveDescriptor, report: Option<InferenceReport>) -> Self {
        let report = report.unwrap_or_default();
        Self {
            path,
            descriptor,
            dependencies: report.dependencies,
            metadata: report.metadata,
            rationale: report.rationale,
        }
    }
}
