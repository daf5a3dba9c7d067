//! Test data fixtures for appdetect-java

/// `<dependency>` element; empty fields are omitted
pub fn dependency(group_id: &str, artifact_id: &str, version: &str, scope: &str) -> String {
    let mut xml = format!(
        "<dependency><groupId>{}</groupId><artifactId>{}</artifactId>",
        group_id, artifact_id
    );
    if !version.is_empty() {
        xml.push_str(&format!("<version>{}</version>", version));
    }
    if !scope.is_empty() {
        xml.push_str(&format!("<scope>{}</scope>", scope));
    }
    xml.push_str("</dependency>");
    xml
}

pub fn dependencies(entries: &[String]) -> String {
    format!("<dependencies>{}</dependencies>", entries.concat())
}

pub fn dependency_management(entries: &[String]) -> String {
    format!(
        "<dependencyManagement>{}</dependencyManagement>",
        dependencies(entries)
    )
}

pub fn parent(group_id: &str, artifact_id: &str, version: &str, relative_path: Option<&str>) -> String {
    let relative = relative_path
        .map(|p| format!("<relativePath>{}</relativePath>", p))
        .unwrap_or_default();
    format!(
        "<parent><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version>{}</parent>",
        group_id, artifact_id, version, relative
    )
}

pub fn properties(pairs: &[(&str, &str)]) -> String {
    let body: String = pairs
        .iter()
        .map(|(k, v)| format!("<{0}>{1}</{0}>", k, v))
        .collect();
    format!("<properties>{}</properties>", body)
}

pub fn active_profile(id: &str, body: &str) -> String {
    format!(
        "<profiles><profile><id>{}</id><activation><activeByDefault>true</activeByDefault></activation>{}</profile></profiles>",
        id, body
    )
}

/// A `<project>` with the given identity and extra sections
pub fn project(group_id: &str, artifact_id: &str, version: &str, body: &str) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>");
    if !group_id.is_empty() {
        xml.push_str(&format!("<groupId>{}</groupId>", group_id));
    }
    xml.push_str(&format!("<artifactId>{}</artifactId>", artifact_id));
    if !version.is_empty() {
        xml.push_str(&format!("<version>{}</version>", version));
    }
    xml.push_str(body);
    xml.push_str("</project>");
    xml
}

/// Spring Boot service with a database, an Event Hubs binder and a frontend build
pub fn spring_boot_service_pom() -> String {
    let body = [
        parent(
            "org.springframework.boot",
            "spring-boot-starter-parent",
            "3.2.1",
            Some(""),
        ),
        dependencies(&[
            dependency("org.springframework.boot", "spring-boot-starter-web", "3.2.1", ""),
            dependency("org.postgresql", "postgresql", "42.7.1", "runtime"),
            dependency(
                "com.azure.spring",
                "spring-cloud-azure-stream-binder-eventhubs",
                "5.8.0",
                "",
            ),
            dependency("com.azure.spring", "spring-cloud-azure-starter", "5.8.0", ""),
        ]),
        "<build><plugins><plugin><groupId>com.github.eirslett</groupId>\
         <artifactId>frontend-maven-plugin</artifactId><version>1.15.0</version>\
         </plugin></plugins></build>"
            .to_string(),
    ]
    .concat();
    project("com.example", "orders", "1.0.0", &body)
}

pub fn spring_boot_service_yaml() -> &'static str {
    r#"spring:
  application:
    name: orders-service
  datasource:
    url: jdbc:postgresql://${DB_HOST:localhost}:5432/orders-db
  cloud:
    stream:
      bindings:
        consume-in-0:
          destination: orders-hub
        supply-out-0:
          destination: audit-hub
    azure:
      eventhubs:
        processor:
          checkpoint-store:
            container-name: orders-checkpoints
server:
  port: ${PORT:8080}
"#
}
