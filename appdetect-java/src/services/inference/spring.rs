//! Spring Boot specific helpers

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::{SPRING_BOOT_DEPENDENCIES, SPRING_BOOT_GROUP, SPRING_BOOT_STARTER_PARENT};
use crate::domain::EffectiveDescriptor;

static DATABASE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("database name pattern is valid")
});

/// Whether the module is a Spring Boot application.
///
/// True when the parent is the Boot starter parent, the managed table imports the
/// Boot BOM, or any dependency or plugin comes from the Boot group.
pub fn is_spring_boot_application(descriptor: &EffectiveDescriptor) -> bool {
    let boot_parent = descriptor.parent.as_ref().is_some_and(|parent| {
        parent.group_id == SPRING_BOOT_GROUP && parent.artifact_id == SPRING_BOOT_STARTER_PARENT
    });

    boot_parent
        || descriptor
            .managed_dependencies
            .contains_artifact(SPRING_BOOT_GROUP, SPRING_BOOT_DEPENDENCIES)
        || descriptor
            .dependencies
            .iter()
            .any(|d| d.group_id == SPRING_BOOT_GROUP)
        || descriptor
            .plugins
            .iter()
            .any(|p| p.group_id == SPRING_BOOT_GROUP)
}

/// A detected Spring Boot version and the artifact it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpringBootVersion {
    pub version: String,
    pub group_id: String,
    pub artifact_id: String,
}

/// Spring Boot version: the starter parent's version, else the Boot BOM's managed
/// version, else the version of the first Boot dependency.
pub fn detect_spring_boot_version(descriptor: &EffectiveDescriptor) -> Option<String> {
    locate_spring_boot_version(descriptor).map(|found| found.version)
}

/// Like [`detect_spring_boot_version`], also naming the artifact the version came from
pub fn locate_spring_boot_version(
    descriptor: &EffectiveDescriptor,
) -> Option<SpringBootVersion> {
    let found = |group_id: &str, artifact_id: &str, version: &str| {
        let version = version.trim();
        (!version.is_empty() && !version.contains("${")).then(|| SpringBootVersion {
            version: version.to_string(),
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
        })
    };

    if let Some(parent) = descriptor
        .parent
        .as_ref()
        .filter(|p| p.artifact_id == SPRING_BOOT_STARTER_PARENT)
    {
        if let Some(version) = found(&parent.group_id, &parent.artifact_id, &parent.version) {
            return Some(version);
        }
    }

    descriptor
        .managed_dependencies
        .iter()
        .find(|d| d.artifact_id == SPRING_BOOT_DEPENDENCIES)
        .and_then(|d| found(&d.group_id, &d.artifact_id, &d.version))
        .or_else(|| {
            descriptor
                .dependencies
                .iter()
                .find(|d| d.group_id == SPRING_BOOT_GROUP)
                .and_then(|d| found(&d.group_id, &d.artifact_id, &d.version))
        })
}

/// 3 to 63 characters of lowercase letters and digits, in dash-separated groups
pub fn is_valid_database_name(name: &str) -> bool {
    (3..=63).contains(&name.len()) && DATABASE_NAME.is_match(name)
}

/// Database name from the last path segment of a connection URL, query removed
pub fn database_name_from_url(url: &str) -> Option<String> {
    let (_, tail) = url.rsplit_once('/')?;
    let name = tail.split('?').next().unwrap_or_default();
    is_valid_database_name(name).then(|| name.to_string())
}
