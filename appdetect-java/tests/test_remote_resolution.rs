//! End-to-end resolution against a mocked remote repository

mod common;

use common::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appdetect_core::infrastructure::cache::MemoryCache;
use appdetect_core::infrastructure::registries::{CachedRepository, MavenRepositoryClient};
use appdetect_java::{DatabaseKind, InferredDependency};

const BOOT: &str = "org.springframework.boot";

fn boot_dependencies_pom() -> String {
    project(
        BOOT,
        "spring-boot-dependencies",
        "3.2.1",
        &[
            properties(&[("postgresql.version", "42.6.0")]),
            dependency_management(&[
                dependency(BOOT, "spring-boot-starter-web", "${project.version}", ""),
                dependency("org.postgresql", "postgresql", "${postgresql.version}", ""),
            ]),
        ]
        .concat(),
    )
}

fn starter_parent_pom() -> String {
    project(
        "",
        "spring-boot-starter-parent",
        "",
        &parent(BOOT, "spring-boot-dependencies", "3.2.1", None),
    )
}

async fn mount(server: &MockServer, artifact_id: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/maven2/org/springframework/boot/{0}/3.2.1/{0}-3.2.1.pom",
            artifact_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

fn service_pom(artifact_id: &str) -> String {
    project(
        "com.example",
        artifact_id,
        "1.0.0",
        &[
            parent(BOOT, "spring-boot-starter-parent", "3.2.1", Some("")),
            dependencies(&[
                dependency(BOOT, "spring-boot-starter-web", "", ""),
                dependency("org.postgresql", "postgresql", "", "runtime"),
            ]),
        ]
        .concat(),
    )
}

#[tokio::test]
async fn test_modules_share_cached_remote_parents() {
    let server = MockServer::start().await;
    mount(&server, "spring-boot-starter-parent", starter_parent_pom()).await;
    mount(&server, "spring-boot-dependencies", boot_dependencies_pom()).await;

    let client = MavenRepositoryClient::new(
        format!("{}/maven2", server.uri()),
        vec!["127.0.0.1".to_string()],
        Duration::from_secs(5),
    )
    .expect("Failed to create client");
    let repository = Arc::new(CachedRepository::new(client, MemoryCache::new(64, 300)));

    let dir = create_temp_dir();
    let dirs: Vec<PathBuf> = ["orders", "billing"]
        .iter()
        .map(|name| {
            let module = dir.path().join(name);
            write_file(&module, "pom.xml", &service_pom(name));
            module
        })
        .collect();

    let results = analyzer(repository).analyze_modules(&dirs).await;
    assert_eq!(results.len(), 2);

    for (module, outcome) in results {
        let project = outcome
            .unwrap_or_else(|e| panic!("{} failed: {}", module.display(), e))
            .expect("service module");

        let postgres = project
            .descriptor
            .dependency("org.postgresql", "postgresql")
            .unwrap();
        assert_eq!(postgres.version, "42.6.0");
        assert_eq!(
            project
                .descriptor
                .dependency(BOOT, "spring-boot-starter-web")
                .unwrap()
                .version,
            "3.2.1"
        );
        assert_eq!(project.metadata.spring_boot_version.as_deref(), Some("3.2.1"));
        assert_eq!(
            project.dependencies,
            vec![InferredDependency::Database {
                kind: DatabaseKind::Postgres
            }]
        );
    }
    // Each remote descriptor was requested once across both modules (see `expect(1)`)
}
