//! Integration tests for the runtime configuration loader

mod common;

use common::*;
use std::collections::HashMap;

use appdetect_core::config::RuntimeConfigSettings;
use appdetect_core::infrastructure::runtime_config::RuntimeConfigLoader;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_properties_and_yaml_are_merged() {
    let dir = create_temp_dir();
    write_resource(dir.path(), "application.properties", sample_application_properties());
    write_resource(dir.path(), "application.yml", sample_application_yaml());

    let config = RuntimeConfigLoader::default().load(dir.path(), &env(&[]));

    assert_eq!(config.get("spring.application.name"), Some("orders"));
    assert_eq!(
        config.get("spring.cloud.stream.bindings.consume-in-0.destination"),
        Some("orders-hub")
    );
    assert_eq!(
        config.get("management.endpoints.web.exposure.include[1]"),
        Some("info")
    );
    assert_eq!(config.binding_destinations().len(), 2);
}

#[test]
fn test_profile_overlay_takes_precedence() {
    let dir = create_temp_dir();
    write_resource(dir.path(), "application.properties", sample_application_properties());
    write_resource(dir.path(), "application-cloud.properties", sample_cloud_profile_properties());

    let config = RuntimeConfigLoader::default().load(dir.path(), &env(&[("DB_NAME", "prod_orders")]));

    assert_eq!(config.get("server.port"), Some("9090"));
    assert_eq!(
        config.get("spring.datasource.url"),
        Some("jdbc:postgresql://db:5432/prod_orders")
    );
    // untouched base keys survive
    assert_eq!(config.get("spring.application.name"), Some("orders"));
}

#[test]
fn test_multiple_active_profiles_apply_in_order() {
    let dir = create_temp_dir();
    write_resource(dir.path(), "application.yml", "spring:\n  profiles:\n    active: a, b\nx: base\n");
    write_resource(dir.path(), "application-a.yml", "x: from-a\ny: from-a\n");
    write_resource(dir.path(), "application-b.properties", "x=from-b\n");

    let config = RuntimeConfigLoader::default().load(dir.path(), &env(&[]));

    assert_eq!(config.get("x"), Some("from-b"));
    assert_eq!(config.get("y"), Some("from-a"));
}

#[test]
fn test_active_profile_from_environment_placeholder() {
    let dir = create_temp_dir();
    write_resource(
        dir.path(),
        "application.properties",
        "spring.profiles.active=${SPRING_PROFILES_ACTIVE:local}\nport=1\n",
    );
    write_resource(dir.path(), "application-local.properties", "port=2\n");
    write_resource(dir.path(), "application-prod.properties", "port=3\n");

    let loader = RuntimeConfigLoader::default();
    assert_eq!(loader.load(dir.path(), &env(&[])).get("port"), Some("2"));
    assert_eq!(
        loader
            .load(dir.path(), &env(&[("SPRING_PROFILES_ACTIVE", "prod")]))
            .get("port"),
        Some("3")
    );
}

#[test]
fn test_env_placeholders_with_defaults() {
    let dir = create_temp_dir();
    write_resource(dir.path(), "application.properties", sample_application_properties());

    let loader = RuntimeConfigLoader::default();
    assert_eq!(loader.load(dir.path(), &env(&[])).get("server.port"), Some("8080"));
    assert_eq!(
        loader.load(dir.path(), &env(&[("PORT", "7000")])).get("server.port"),
        Some("7000")
    );
}

#[test]
fn test_malformed_file_is_skipped() {
    let dir = create_temp_dir();
    write_resource(dir.path(), "application.properties", "a=1\n");
    write_resource(dir.path(), "application.yml", "b: [unclosed\n");
    write_resource(dir.path(), "application.yaml", "c: 3\n");

    let config = RuntimeConfigLoader::default().load(dir.path(), &env(&[]));

    assert_eq!(config.get("a"), Some("1"));
    assert_eq!(config.get("b"), None);
    assert_eq!(config.get("c"), Some("3"));
}

#[test]
fn test_custom_resource_location() {
    let dir = create_temp_dir();
    write_file(dir.path(), "config/bootstrap.properties", "spring.application.name=gateway\n");

    let loader = RuntimeConfigLoader::new(RuntimeConfigSettings {
        resource_dir: "config".to_string(),
        base_name: "bootstrap".to_string(),
        ..RuntimeConfigSettings::default()
    });
    let config = loader.load(dir.path(), &env(&[]));

    assert_eq!(config.get("spring.application.name"), Some("gateway"));
}
