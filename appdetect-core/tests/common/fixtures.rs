//! Test data fixtures for appdetect-core

/// A descriptor exercising every section the parser understands
pub fn sample_pom_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>org.springframework.boot</groupId>
    <artifactId>spring-boot-starter-parent</artifactId>
    <version>3.2.0</version>
    <relativePath/>
  </parent>
  <groupId>com.example</groupId>
  <artifactId>orders</artifactId>
  <version>1.0.0</version>
  <properties>
    <java.version>17</java.version>
    <azure.version>5.8.0</azure.version>
  </properties>
  <dependencies>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-web</artifactId>
    </dependency>
    <dependency>
      <groupId>org.postgresql</groupId>
      <artifactId>postgresql</artifactId>
      <scope>runtime</scope>
    </dependency>
  </dependencies>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>com.azure.spring</groupId>
        <artifactId>spring-cloud-azure-dependencies</artifactId>
        <version>${azure.version}</version>
        <type>pom</type>
        <scope>import</scope>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <build>
    <plugins>
      <plugin>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-maven-plugin</artifactId>
      </plugin>
    </plugins>
  </build>
</project>"#
}

/// A minimal published descriptor as served by a remote repository
pub fn remote_pom_xml(group_id: &str, artifact_id: &str, version: &str) -> String {
    format!(
        r#"<project>
  <groupId>{}</groupId>
  <artifactId>{}</artifactId>
  <version>{}</version>
</project>"#,
        group_id, artifact_id, version
    )
}

pub fn sample_application_properties() -> &'static str {
    r#"# base configuration
spring.application.name=orders
server.port=${PORT:8080}
spring.profiles.active=cloud
spring.datasource.url=jdbc:postgresql://localhost:5432/orders_db
"#
}

pub fn sample_application_yaml() -> &'static str {
    r#"spring:
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
            container-name: checkpoints
management:
  endpoints:
    web:
      exposure:
        include:
          - health
          - info
"#
}

pub fn sample_cloud_profile_properties() -> &'static str {
    "server.port=9090\nspring.datasource.url=jdbc:postgresql://${DB_HOST:db}:5432/${DB_NAME}\n"
}
