//! Property tables and `${name}` placeholder substitution

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use tracing::warn;

use appdetect_core::domain::{Dependency, Descriptor, Plugin};

use crate::domain::PropertyMap;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

pub const PROJECT_GROUP_ID: &str = "project.groupId";
pub const PROJECT_VERSION: &str = "project.version";

/// Property table of `descriptor`: declared properties (first declaration wins)
/// plus `project.groupId` and `project.version`, which fall back to the parent's.
pub fn build_property_map(descriptor: &Descriptor) -> PropertyMap {
    let mut properties = PropertyMap::from_properties(&descriptor.properties);
    properties.insert_if_absent(PROJECT_GROUP_ID, descriptor.effective_group_id());
    properties.insert_if_absent(PROJECT_VERSION, descriptor.effective_version());
    properties
}

/// Replace every `${name}` whose name is in `properties`. Unknown names stay as written.
pub fn substitute(value: &str, properties: &PropertyMap) -> String {
    if !value.contains("${") {
        return value.to_string();
    }
    PLACEHOLDER
        .replace_all(value, |caps: &Captures| {
            properties
                .get(caps[1].trim())
                .map(str::to_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

pub fn contains_placeholder(value: &str) -> bool {
    PLACEHOLDER.is_match(value)
}

#[derive(Debug, Clone)]
enum Expansion {
    Done(String),
    Cyclic,
}

/// Substitute property references inside property values until nothing changes.
///
/// Values that take part in, or depend on, a reference cycle keep their declared
/// text. A warning names each of them.
pub fn resolve_self_references(properties: &mut PropertyMap) {
    if !properties.iter().any(|(_, value)| value.contains("${")) {
        return;
    }

    let snapshot = properties.clone();
    let mut expansions: HashMap<String, Expansion> = HashMap::new();

    for (name, _) in snapshot.iter() {
        let mut visiting = Vec::new();
        expand(name, &snapshot, &mut expansions, &mut visiting);
    }

    for (name, _) in snapshot.iter() {
        match expansions.get(name) {
            Some(Expansion::Done(value)) => properties.insert(name, value.as_str()),
            Some(Expansion::Cyclic) => {
                warn!(property = %name, "Property reference cycle, keeping declared value");
            }
            None => {}
        }
    }
}

fn expand(
    name: &str,
    table: &PropertyMap,
    expansions: &mut HashMap<String, Expansion>,
    visiting: &mut Vec<String>,
) -> Option<Expansion> {
    if let Some(done) = expansions.get(name) {
        return Some(done.clone());
    }
    let raw = table.get(name)?;
    if visiting.iter().any(|v| v == name) {
        return Some(Expansion::Cyclic);
    }

    visiting.push(name.to_string());
    let mut cyclic = false;
    let value = PLACEHOLDER
        .replace_all(raw, |caps: &Captures| {
            match expand(caps[1].trim(), table, expansions, visiting) {
                Some(Expansion::Done(value)) => value,
                Some(Expansion::Cyclic) => {
                    cyclic = true;
                    caps[0].to_string()
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned();
    visiting.pop();

    let expansion = if cyclic {
        Expansion::Cyclic
    } else {
        Expansion::Done(value)
    };
    expansions.insert(name.to_string(), expansion.clone());
    Some(expansion)
}

pub fn substitute_group_ids(dependencies: &mut [Dependency], properties: &PropertyMap) {
    for dependency in dependencies {
        dependency.group_id = substitute(&dependency.group_id, properties);
    }
}

pub fn substitute_plugin_group_ids(plugins: &mut [Plugin], properties: &PropertyMap) {
    for plugin in plugins {
        plugin.group_id = substitute(&plugin.group_id, properties);
    }
}

pub fn substitute_versions(dependencies: &mut [Dependency], properties: &PropertyMap) {
    for dependency in dependencies {
        dependency.version = substitute(&dependency.version, properties);
    }
}

pub fn substitute_plugin_versions(plugins: &mut [Plugin], properties: &PropertyMap) {
    for plugin in plugins {
        plugin.version = substitute(&plugin.version, properties);
    }
}
