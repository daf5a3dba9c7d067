//! Static detection rule catalog

use crate::domain::{DatabaseKind, DetectionMetadata};

/// `groupId:artifactId` pair a rule triggers on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MavenArtifact {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
}

impl MavenArtifact {
    pub const fn new(group_id: &'static str, artifact_id: &'static str) -> Self {
        Self {
            group_id,
            artifact_id,
        }
    }
}

/// A database engine and the dependencies that reveal it; the first present
/// trigger wins.
#[derive(Debug)]
pub struct DatabaseRule {
    pub kind: DatabaseKind,
    pub triggers: &'static [MavenArtifact],
}

pub const SPRING_BOOT_GROUP: &str = "org.springframework.boot";
pub const SPRING_BOOT_STARTER_PARENT: &str = "spring-boot-starter-parent";
pub const SPRING_BOOT_DEPENDENCIES: &str = "spring-boot-dependencies";

pub static DATABASE_RULES: &[DatabaseRule] = &[
    DatabaseRule {
        kind: DatabaseKind::Postgres,
        triggers: &[
            MavenArtifact::new("org.postgresql", "postgresql"),
            MavenArtifact::new("com.azure.spring", "spring-cloud-azure-starter-jdbc-postgresql"),
        ],
    },
    DatabaseRule {
        kind: DatabaseKind::MySql,
        triggers: &[
            MavenArtifact::new("com.mysql", "mysql-connector-j"),
            MavenArtifact::new("com.azure.spring", "spring-cloud-azure-starter-jdbc-mysql"),
        ],
    },
    DatabaseRule {
        kind: DatabaseKind::Redis,
        triggers: &[
            MavenArtifact::new(SPRING_BOOT_GROUP, "spring-boot-starter-data-redis"),
            MavenArtifact::new(SPRING_BOOT_GROUP, "spring-boot-starter-data-redis-reactive"),
        ],
    },
    DatabaseRule {
        kind: DatabaseKind::Mongo,
        triggers: &[
            MavenArtifact::new(SPRING_BOOT_GROUP, "spring-boot-starter-data-mongodb"),
            MavenArtifact::new(SPRING_BOOT_GROUP, "spring-boot-starter-data-mongodb-reactive"),
        ],
    },
    DatabaseRule {
        kind: DatabaseKind::Cosmos,
        triggers: &[MavenArtifact::new(
            "com.azure.spring",
            "spring-cloud-azure-starter-data-cosmos",
        )],
    },
];

// Messaging
pub const SERVICE_BUS_JMS: MavenArtifact =
    MavenArtifact::new("com.azure.spring", "spring-cloud-azure-starter-servicebus-jms");
pub const SERVICE_BUS_STREAM_BINDER: MavenArtifact =
    MavenArtifact::new("com.azure.spring", "spring-cloud-azure-stream-binder-servicebus");
pub const EVENT_HUBS_STREAM_BINDER: MavenArtifact =
    MavenArtifact::new("com.azure.spring", "spring-cloud-azure-stream-binder-eventhubs");
pub const EVENT_HUBS_STARTER: MavenArtifact =
    MavenArtifact::new("com.azure.spring", "spring-cloud-azure-starter-eventhubs");
pub const STREAM_KAFKA: MavenArtifact =
    MavenArtifact::new("org.springframework.cloud", "spring-cloud-starter-stream-kafka");

pub const FRONTEND_PLUGIN: MavenArtifact =
    MavenArtifact::new("com.github.eirslett", "frontend-maven-plugin");

// Configuration keys
pub const EVENT_HUB_NAME_KEY: &str = "spring.cloud.azure.eventhubs.event-hub-name";
pub const CHECKPOINT_CONTAINER_KEY: &str =
    "spring.cloud.azure.eventhubs.processor.checkpoint-store.container-name";
pub const APPLICATION_NAME_KEY: &str = "spring.application.name";
pub const SERVER_PORT_KEY: &str = "server.port";
pub const DATASOURCE_URL_KEY: &str = "spring.datasource.url";
pub const MONGODB_URI_KEY: &str = "spring.data.mongodb.uri";
pub const MONGODB_DATABASE_KEY: &str = "spring.data.mongodb.database";
pub const COSMOS_DATABASE_KEY: &str = "spring.cloud.azure.cosmos.database";

/// Marker in a binding name that identifies a consumer binding, e.g. `consume-in-0`
pub const CONSUMER_BINDING_MARKER: &str = "-in-";

/// A metadata flag set when a dependency is present
pub struct MetadataFlagRule {
    pub flag: &'static str,
    pub trigger: MavenArtifact,
    pub apply: fn(&mut DetectionMetadata),
}

pub static METADATA_FLAG_RULES: &[MetadataFlagRule] = &[
    MetadataFlagRule {
        flag: "contains_spring_cloud_azure_starter",
        trigger: MavenArtifact::new("com.azure.spring", "spring-cloud-azure-starter"),
        apply: |m| m.contains_spring_cloud_azure_starter = true,
    },
    MetadataFlagRule {
        flag: "contains_spring_cloud_azure_starter_jdbc_mysql",
        trigger: MavenArtifact::new("com.azure.spring", "spring-cloud-azure-starter-jdbc-mysql"),
        apply: |m| m.contains_spring_cloud_azure_starter_jdbc_mysql = true,
    },
    MetadataFlagRule {
        flag: "contains_spring_cloud_azure_starter_jdbc_postgresql",
        trigger: MavenArtifact::new(
            "com.azure.spring",
            "spring-cloud-azure-starter-jdbc-postgresql",
        ),
        apply: |m| m.contains_spring_cloud_azure_starter_jdbc_postgresql = true,
    },
    MetadataFlagRule {
        flag: "contains_spring_cloud_config_server",
        trigger: MavenArtifact::new("org.springframework.cloud", "spring-cloud-config-server"),
        apply: |m| m.contains_spring_cloud_config_server = true,
    },
    MetadataFlagRule {
        flag: "contains_spring_cloud_config_client",
        trigger: MavenArtifact::new("org.springframework.cloud", "spring-cloud-starter-config"),
        apply: |m| m.contains_spring_cloud_config_client = true,
    },
    MetadataFlagRule {
        flag: "contains_spring_cloud_eureka_server",
        trigger: MavenArtifact::new(
            "org.springframework.cloud",
            "spring-cloud-starter-netflix-eureka-server",
        ),
        apply: |m| m.contains_spring_cloud_eureka_server = true,
    },
    MetadataFlagRule {
        flag: "contains_spring_cloud_eureka_client",
        trigger: MavenArtifact::new(
            "org.springframework.cloud",
            "spring-cloud-starter-netflix-eureka-client",
        ),
        apply: |m| m.contains_spring_cloud_eureka_client = true,
    },
];
