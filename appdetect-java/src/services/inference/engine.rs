//! Rule engine mapping an effective descriptor and runtime configuration to
//! inferred cloud resources

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use appdetect_core::config::RuntimeConfigSettings;
use appdetect_core::infrastructure::runtime_config::{
    EnvironmentSource, ProcessEnvironment, RuntimeConfig, RuntimeConfigLoader,
};

use super::rules::*;
use super::spring::{
    SpringBootVersion, database_name_from_url, is_spring_boot_application,
    is_valid_database_name, locate_spring_boot_version,
};
use crate::domain::{
    DatabaseKind, EffectiveDescriptor, InferenceReport, InferredDependency, Rationale,
};

/// Applies the detection catalog to one module at a time
pub struct RuleEngine {
    loader: RuntimeConfigLoader,
    environment: Arc<dyn EnvironmentSource>,
}

impl RuleEngine {
    pub fn new(loader: RuntimeConfigLoader, environment: Arc<dyn EnvironmentSource>) -> Self {
        Self {
            loader,
            environment,
        }
    }

    /// Engine reading placeholders from the process environment
    pub fn from_settings(settings: RuntimeConfigSettings) -> Self {
        Self::new(
            RuntimeConfigLoader::new(settings),
            Arc::new(ProcessEnvironment),
        )
    }

    /// Infer the resources of the module rooted at `module_dir`.
    ///
    /// Returns `None` when the module is not a Spring Boot application; no rule
    /// runs in that case.
    pub fn infer(
        &self,
        descriptor: &EffectiveDescriptor,
        module_dir: &Path,
    ) -> Option<InferenceReport> {
        if !is_spring_boot_application(descriptor) {
            debug!(
                artifact = %descriptor.artifact_id,
                "Not a Spring Boot application, skipping inference"
            );
            return None;
        }

        let config = self.loader.load(module_dir, self.environment.as_ref());
        debug!(
            artifact = %descriptor.artifact_id,
            keys = config.len(),
            "Loaded runtime configuration"
        );
        Some(self.infer_with_config(descriptor, &config))
    }

    /// Run every rule against an already loaded configuration
    pub fn infer_with_config(
        &self,
        descriptor: &EffectiveDescriptor,
        config: &RuntimeConfig,
    ) -> InferenceReport {
        let mut inference = Inference {
            descriptor,
            config,
            spring_boot_version: locate_spring_boot_version(descriptor),
            report: InferenceReport::default(),
        };

        inference.detect_databases();
        inference.detect_service_bus();
        inference.detect_event_hubs();
        inference.detect_storage_account();
        inference.detect_metadata();

        info!(
            artifact = %descriptor.artifact_id,
            resources = inference.report.dependencies.len(),
            "Inference completed"
        );
        inference.report
    }
}

struct Inference<'a> {
    descriptor: &'a EffectiveDescriptor,
    config: &'a RuntimeConfig,
    spring_boot_version: Option<SpringBootVersion>,
    report: InferenceReport,
}

impl Inference<'_> {
    fn has(&self, artifact: &MavenArtifact) -> bool {
        self.descriptor
            .has_dependency(artifact.group_id, artifact.artifact_id)
    }

    fn explain(&mut self, rationale: Rationale) {
        info!(
            subject = %rationale.subject,
            dependency = rationale.dependency.as_deref().unwrap_or(""),
            config_key = rationale.config_key.as_deref().unwrap_or(""),
            "{}",
            rationale.message
        );
        self.report.rationale.push(rationale);
    }

    fn found(&mut self, dependency: InferredDependency, trigger: &MavenArtifact) {
        let rationale = Rationale::for_dependency(
            dependency.display_name(),
            trigger.group_id,
            trigger.artifact_id,
        );
        self.report.record(dependency);
        self.explain(rationale);
    }

    /// Distinct stream binding destinations, ordered by binding name
    fn destinations(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for destination in self.config.binding_destinations().into_values() {
            let destination = destination.trim();
            if !destination.is_empty() && !names.iter().any(|n| n == destination) {
                names.push(destination.to_string());
            }
        }
        names
    }

    fn detect_databases(&mut self) {
        for rule in DATABASE_RULES {
            if let Some(trigger) = rule.triggers.iter().find(|t| self.has(t)) {
                self.found(InferredDependency::Database { kind: rule.kind }, trigger);
            }
        }
    }

    fn detect_service_bus(&mut self) {
        if self.has(&SERVICE_BUS_JMS) {
            self.found(
                InferredDependency::ServiceBus {
                    queues: Vec::new(),
                    is_jms: true,
                },
                &SERVICE_BUS_JMS,
            );
        }

        if self.has(&SERVICE_BUS_STREAM_BINDER) {
            let queues = self.destinations();
            self.found(
                InferredDependency::ServiceBus {
                    queues,
                    is_jms: false,
                },
                &SERVICE_BUS_STREAM_BINDER,
            );
        }
    }

    fn detect_event_hubs(&mut self) {
        if self.has(&EVENT_HUBS_STREAM_BINDER) {
            let hub_names = self.destinations();
            self.found(
                InferredDependency::EventHubs {
                    hub_names,
                    use_kafka: false,
                    spring_boot_version: None,
                },
                &EVENT_HUBS_STREAM_BINDER,
            );
        }

        if self.has(&EVENT_HUBS_STARTER) {
            let rationale = Rationale::for_dependency(
                "Azure Event Hubs",
                EVENT_HUBS_STARTER.group_id,
                EVENT_HUBS_STARTER.artifact_id,
            );
            let (hub_names, rationale) = match self.config_value(EVENT_HUB_NAME_KEY) {
                Some(name) => (vec![name], rationale.with_config_key(EVENT_HUB_NAME_KEY)),
                None => (Vec::new(), rationale),
            };
            self.report.record(InferredDependency::EventHubs {
                hub_names,
                use_kafka: false,
                spring_boot_version: None,
            });
            self.explain(rationale);
        }

        if self.has(&STREAM_KAFKA) {
            let hub_names = self.destinations();
            let spring_boot_version = self
                .spring_boot_version
                .as_ref()
                .map(|found| found.version.clone());
            self.found(
                InferredDependency::EventHubs {
                    hub_names,
                    use_kafka: true,
                    spring_boot_version,
                },
                &STREAM_KAFKA,
            );
        }
    }

    fn detect_storage_account(&mut self) {
        if !self.has(&EVENT_HUBS_STREAM_BINDER) {
            return;
        }

        let Some(binding) = self
            .config
            .binding_destinations()
            .into_keys()
            .find(|name| name.contains(CONSUMER_BINDING_MARKER))
            .map(str::to_string)
        else {
            return;
        };

        let mut container_names: Vec<String> = Vec::new();
        for (_, name) in self.config.entries_with_suffix(CHECKPOINT_CONTAINER_KEY) {
            let name = name.trim();
            if !name.is_empty() && !container_names.iter().any(|n| n == name) {
                container_names.push(name.to_string());
            }
        }

        let condition = format!(
            "binding name [{}] contains '{}'",
            binding, CONSUMER_BINDING_MARKER
        );
        let rationale = Rationale::for_dependency_with_condition(
            "Azure Storage Account",
            EVENT_HUBS_STREAM_BINDER.group_id,
            EVENT_HUBS_STREAM_BINDER.artifact_id,
            Some(&condition),
        )
        .with_config_key(CHECKPOINT_CONTAINER_KEY);
        self.report
            .record(InferredDependency::StorageAccount { container_names });
        self.explain(rationale);
    }

    fn config_value(&self, key: &str) -> Option<String> {
        match self.config.get(key).map(str::trim) {
            Some(value) if !value.is_empty() => Some(value.to_string()),
            _ => {
                debug!(key, "Configuration property not present");
                None
            }
        }
    }

    fn set_database_name(&mut self, kind: DatabaseKind, name: String, key: &str, overwrite: bool) {
        if !overwrite && self.report.metadata.database_names.contains_key(&kind) {
            return;
        }
        let subject = format!("DatabaseName[{}]", kind.display_name());
        self.explain(Rationale::for_config_key(&subject, key, &name));
        self.report.metadata.database_names.insert(kind, name);
    }

    fn detect_metadata(&mut self) {
        if let Some(name) = self.config_value(APPLICATION_NAME_KEY) {
            self.explain(Rationale::for_config_key(
                "ApplicationName",
                APPLICATION_NAME_KEY,
                &name,
            ));
            self.report.metadata.application_name = Some(name);
        }

        if let Some(port) = self.config_value(SERVER_PORT_KEY) {
            match port.parse::<u16>() {
                Ok(parsed) => {
                    self.explain(Rationale::for_config_key(
                        "ServerPort",
                        SERVER_PORT_KEY,
                        &port,
                    ));
                    self.report.metadata.server_port = Some(parsed);
                }
                Err(_) => debug!(value = %port, "Server port is not a number"),
            }
        }

        if let Some(name) = self.config_value(COSMOS_DATABASE_KEY) {
            if is_valid_database_name(&name) {
                self.set_database_name(DatabaseKind::Cosmos, name, COSMOS_DATABASE_KEY, false);
            }
        }

        if let Some(name) = self.config_value(MONGODB_DATABASE_KEY) {
            if is_valid_database_name(&name) {
                self.set_database_name(DatabaseKind::Mongo, name, MONGODB_DATABASE_KEY, false);
            }
        }

        // The URI names the database the driver actually connects to
        if let Some(uri) = self.config_value(MONGODB_URI_KEY) {
            if let Some(name) = database_name_from_url(&uri) {
                self.set_database_name(DatabaseKind::Mongo, name, MONGODB_URI_KEY, true);
            }
        }

        if let Some(url) = self.config_value(DATASOURCE_URL_KEY) {
            let kind = if url.starts_with("jdbc:postgresql") {
                Some(DatabaseKind::Postgres)
            } else if url.starts_with("jdbc:mysql") {
                Some(DatabaseKind::MySql)
            } else {
                None
            };
            if let (Some(kind), Some(name)) = (kind, database_name_from_url(&url)) {
                self.set_database_name(kind, name, DATASOURCE_URL_KEY, true);
            }
        }

        for rule in METADATA_FLAG_RULES {
            if self.has(&rule.trigger) {
                (rule.apply)(&mut self.report.metadata);
                self.explain(Rationale::for_metadata_flag(
                    rule.flag,
                    rule.trigger.group_id,
                    rule.trigger.artifact_id,
                ));
            }
        }

        if self
            .descriptor
            .has_plugin(FRONTEND_PLUGIN.group_id, FRONTEND_PLUGIN.artifact_id)
        {
            self.report.metadata.contains_spring_frontend = true;
            self.explain(Rationale::for_metadata_flag(
                "contains_spring_frontend",
                FRONTEND_PLUGIN.group_id,
                FRONTEND_PLUGIN.artifact_id,
            ));
        }

        if let Some(found) = self.spring_boot_version.clone() {
            self.explain(Rationale::for_declared_version(
                "spring_boot_version",
                &found.group_id,
                &found.artifact_id,
                &found.version,
            ));
            self.report.metadata.spring_boot_version = Some(found.version);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManagedDependencyMap, PropertyMap, ResourceKind};
    use appdetect_core::domain::{Dependency, DependencyScope, ParentReference, Plugin};
    use std::collections::HashMap;

    fn engine() -> RuleEngine {
        RuleEngine::new(
            RuntimeConfigLoader::default(),
            Arc::new(HashMap::<String, String>::new()),
        )
    }

    fn boot_descriptor(dependencies: &[(&str, &str)]) -> EffectiveDescriptor {
        EffectiveDescriptor {
            group_id: "com.example".to_string(),
            artifact_id: "app".to_string(),
            version: "1.0.0".to_string(),
            parent: Some(ParentReference {
                group_id: SPRING_BOOT_GROUP.to_string(),
                artifact_id: SPRING_BOOT_STARTER_PARENT.to_string(),
                version: "3.2.1".to_string(),
                relative_path: String::new(),
            }),
            modules: Vec::new(),
            properties: PropertyMap::default(),
            managed_dependencies: ManagedDependencyMap::default(),
            dependencies: dependencies
                .iter()
                .map(|(g, a)| Dependency::new(*g, *a, "1.0", DependencyScope::Compile))
                .collect(),
            plugins: Vec::new(),
            path: None,
        }
    }

    fn config(pairs: &[(&str, &str)]) -> RuntimeConfig {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_non_boot_module_is_skipped() {
        let mut descriptor = boot_descriptor(&[("org.postgresql", "postgresql")]);
        descriptor.parent = None;
        let dir = std::env::temp_dir();
        assert!(engine().infer(&descriptor, &dir).is_none());
    }

    #[test]
    fn test_boot_plugin_satisfies_precondition() {
        let mut descriptor = boot_descriptor(&[]);
        descriptor.parent = None;
        descriptor.plugins.push(Plugin::new(
            SPRING_BOOT_GROUP,
            "spring-boot-maven-plugin",
            "3.2.1",
        ));
        assert!(is_spring_boot_application(&descriptor));
    }

    #[test]
    fn test_databases_in_catalog_order_without_duplicates() {
        let descriptor = boot_descriptor(&[
            (SPRING_BOOT_GROUP, "spring-boot-starter-data-redis"),
            ("com.azure.spring", "spring-cloud-azure-starter-jdbc-postgresql"),
            ("org.postgresql", "postgresql"),
        ]);
        let report = engine().infer_with_config(&descriptor, &RuntimeConfig::default());

        assert_eq!(
            report.databases().collect::<Vec<_>>(),
            vec![DatabaseKind::Postgres, DatabaseKind::Redis]
        );
        assert_eq!(
            report.rationale[0].dependency.as_deref(),
            Some("org.postgresql:postgresql")
        );
    }

    #[test]
    fn test_service_bus_jms_and_binder_merge() {
        let descriptor = boot_descriptor(&[
            (SERVICE_BUS_JMS.group_id, SERVICE_BUS_JMS.artifact_id),
            (
                SERVICE_BUS_STREAM_BINDER.group_id,
                SERVICE_BUS_STREAM_BINDER.artifact_id,
            ),
        ]);
        let config = config(&[
            ("spring.cloud.stream.bindings.consume-in-0.destination", "orders"),
            ("spring.cloud.stream.bindings.supply-out-0.destination", "orders"),
        ]);
        let report = engine().infer_with_config(&descriptor, &config);

        assert_eq!(report.dependencies.len(), 1);
        assert_eq!(
            report.find(ResourceKind::ServiceBus),
            Some(&InferredDependency::ServiceBus {
                queues: vec!["orders".to_string()],
                is_jms: true,
            })
        );
    }

    #[test]
    fn test_event_hubs_starter_without_name() {
        let descriptor = boot_descriptor(&[(
            EVENT_HUBS_STARTER.group_id,
            EVENT_HUBS_STARTER.artifact_id,
        )]);
        let report = engine().infer_with_config(&descriptor, &RuntimeConfig::default());

        assert_eq!(
            report.find(ResourceKind::EventHubs),
            Some(&InferredDependency::EventHubs {
                hub_names: Vec::new(),
                use_kafka: false,
                spring_boot_version: None,
            })
        );
        let rationale = report
            .rationale
            .iter()
            .find(|r| r.subject == "Azure Event Hubs")
            .unwrap();
        assert_eq!(rationale.config_key, None);
    }

    #[test]
    fn test_event_hubs_starter_names_key_it_read() {
        let descriptor = boot_descriptor(&[(
            EVENT_HUBS_STARTER.group_id,
            EVENT_HUBS_STARTER.artifact_id,
        )]);
        let config = config(&[(EVENT_HUB_NAME_KEY, "clicks")]);
        let report = engine().infer_with_config(&descriptor, &config);

        assert_eq!(
            report.find(ResourceKind::EventHubs),
            Some(&InferredDependency::EventHubs {
                hub_names: vec!["clicks".to_string()],
                use_kafka: false,
                spring_boot_version: None,
            })
        );
        let rationale = report
            .rationale
            .iter()
            .find(|r| r.subject == "Azure Event Hubs")
            .unwrap();
        assert_eq!(rationale.config_key.as_deref(), Some(EVENT_HUB_NAME_KEY));
    }

    #[test]
    fn test_spring_boot_version_is_explained() {
        let report = engine().infer_with_config(&boot_descriptor(&[]), &RuntimeConfig::default());

        let rationale = report
            .rationale
            .iter()
            .find(|r| r.subject == "spring_boot_version")
            .unwrap();
        assert_eq!(
            rationale.dependency.as_deref(),
            Some("org.springframework.boot:spring-boot-starter-parent")
        );
        assert!(rationale.message.contains("3.2.1"));
    }

    #[test]
    fn test_kafka_carries_spring_boot_version() {
        let descriptor = boot_descriptor(&[(STREAM_KAFKA.group_id, STREAM_KAFKA.artifact_id)]);
        let config = config(&[("spring.cloud.stream.bindings.in-in-0.destination", "telemetry")]);
        let report = engine().infer_with_config(&descriptor, &config);

        assert_eq!(
            report.find(ResourceKind::EventHubs),
            Some(&InferredDependency::EventHubs {
                hub_names: vec!["telemetry".to_string()],
                use_kafka: true,
                spring_boot_version: Some("3.2.1".to_string()),
            })
        );
        assert_eq!(report.metadata.spring_boot_version.as_deref(), Some("3.2.1"));
    }

    #[test]
    fn test_storage_requires_consumer_binding() {
        let descriptor = boot_descriptor(&[(
            EVENT_HUBS_STREAM_BINDER.group_id,
            EVENT_HUBS_STREAM_BINDER.artifact_id,
        )]);
        let producer_only = config(&[(
            "spring.cloud.stream.bindings.supply-out-0.destination",
            "audit",
        )]);
        let report = engine().infer_with_config(&descriptor, &producer_only);
        assert!(report.find(ResourceKind::StorageAccount).is_none());

        let with_consumer = config(&[
            ("spring.cloud.stream.bindings.consume-in-0.destination", "orders"),
            (CHECKPOINT_CONTAINER_KEY, "checkpoints"),
        ]);
        let report = engine().infer_with_config(&descriptor, &with_consumer);
        assert_eq!(
            report.find(ResourceKind::StorageAccount),
            Some(&InferredDependency::StorageAccount {
                container_names: vec!["checkpoints".to_string()],
            })
        );
        assert!(report.rationale.iter().any(|r| r
            .message
            .ends_with("and binding name [consume-in-0] contains '-in-'.")));
    }

    #[test]
    fn test_metadata_from_configuration() {
        let descriptor = boot_descriptor(&[(
            "org.springframework.cloud",
            "spring-cloud-starter-netflix-eureka-client",
        )]);
        let config = config(&[
            (APPLICATION_NAME_KEY, "orders-service"),
            (SERVER_PORT_KEY, "8081"),
            (DATASOURCE_URL_KEY, "jdbc:postgresql://db:5432/orders-db?ssl=true"),
            (MONGODB_DATABASE_KEY, "declared"),
            (MONGODB_URI_KEY, "mongodb://host:27017/from-uri"),
            (COSMOS_DATABASE_KEY, "Invalid_Name"),
        ]);
        let metadata = engine().infer_with_config(&descriptor, &config).metadata;

        assert_eq!(metadata.application_name.as_deref(), Some("orders-service"));
        assert_eq!(metadata.server_port, Some(8081));
        assert_eq!(
            metadata.database_names.get(&DatabaseKind::Postgres).map(String::as_str),
            Some("orders-db")
        );
        assert_eq!(
            metadata.database_names.get(&DatabaseKind::Mongo).map(String::as_str),
            Some("from-uri")
        );
        assert!(!metadata.database_names.contains_key(&DatabaseKind::Cosmos));
        assert!(metadata.contains_spring_cloud_eureka_client);
        assert!(!metadata.contains_spring_cloud_eureka_server);
    }

    #[test]
    fn test_unparseable_port_is_ignored() {
        let descriptor = boot_descriptor(&[]);
        let config = config(&[(SERVER_PORT_KEY, "${PORT}")]);
        let metadata = engine().infer_with_config(&descriptor, &config).metadata;
        assert_eq!(metadata.server_port, None);
    }

    #[test]
    fn test_frontend_plugin_flag() {
        let mut descriptor = boot_descriptor(&[]);
        descriptor.plugins.push(Plugin::new(
            FRONTEND_PLUGIN.group_id,
            FRONTEND_PLUGIN.artifact_id,
            "1.15.0",
        ));
        let report = engine().infer_with_config(&descriptor, &RuntimeConfig::default());
        assert!(report.metadata.contains_spring_frontend);
        assert!(report.dependencies.is_empty());
    }
}
