use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn appdetect() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_appdetect"));
    cmd.env("RUST_LOG", "off").arg("--offline");
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

const SERVICE_POM: &str = r#"<project>
  <groupId>com.example</groupId>
  <artifactId>orders</artifactId>
  <version>1.0.0</version>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>com.example</groupId>
        <artifactId>lib</artifactId>
        <version>2.0.0</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>lib</artifactId>
    </dependency>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-web</artifactId>
      <version>3.2.1</version>
    </dependency>
    <dependency>
      <groupId>org.postgresql</groupId>
      <artifactId>postgresql</artifactId>
      <version>42.7.1</version>
    </dependency>
  </dependencies>
</project>"#;

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_appdetect"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("detect"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_appdetect"));
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("appdetect 0.1.0"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_appdetect"));
    cmd.assert().failure().code(2);
}

#[test]
fn test_resolve_text_output() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "pom.xml", SERVICE_POM);

    appdetect()
        .arg("resolve")
        .arg(dir.path().join("pom.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example:orders:1.0.0"))
        .stdout(predicate::str::contains("com.example:lib:2.0.0:compile"));
}

#[test]
fn test_resolve_json_output() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "pom.xml", SERVICE_POM);

    let assert = appdetect()
        .args(["resolve", "--format", "json"])
        .arg(dir.path().join("pom.xml"))
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["artifact_id"], "orders");
    assert_eq!(json["dependencies"][0]["version"], "2.0.0");
}

#[test]
fn test_resolve_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    appdetect()
        .arg("resolve")
        .arg(dir.path().join("pom.xml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_detect_reports_database() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "orders/pom.xml", SERVICE_POM);
    write(
        dir.path(),
        "orders/src/main/resources/application.properties",
        "spring.application.name=orders-service\n",
    );

    appdetect()
        .arg("detect")
        .arg(dir.path().join("orders"))
        .assert()
        .success()
        .stdout(predicate::str::contains("PostgreSQL"))
        .stdout(predicate::str::contains("application name: orders-service"));
}

#[test]
fn test_detect_failure_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "orders/pom.xml", SERVICE_POM);
    std::fs::create_dir_all(dir.path().join("empty")).unwrap();

    appdetect()
        .args(["detect", "--format", "json"])
        .arg(dir.path().join("orders"))
        .arg(dir.path().join("empty"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"status\": \"application\""))
        .stdout(predicate::str::contains("\"status\": \"failed\""));
}
