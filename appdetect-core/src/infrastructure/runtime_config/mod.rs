/*
 Infrastructure: Runtime Configuration Loader

 Reads a module's layered application configuration into one flat map:

   <resource_dir>/<base>.properties
   <resource_dir>/<base>.yml
   <resource_dir>/<base>.yaml
   <resource_dir>/<base>-<profile>.{properties,yml,yaml}   for each active profile

 Later files overwrite earlier keys. The active profiles come from the merged base
 files (comma separated). Missing files contribute nothing; malformed files are
 skipped with a warning.
*/

pub mod placeholders;
pub mod properties;
pub mod yaml;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::application::errors::RuntimeConfigError;
use crate::config::RuntimeConfigSettings;

pub use placeholders::{EnvironmentSource, ProcessEnvironment, resolve_placeholders};
pub use properties::parse_properties;
pub use yaml::flatten_yaml;

const EXTENSIONS: [&str; 3] = ["properties", "yml", "yaml"];

const BINDINGS_PREFIX: &str = "spring.cloud.stream.bindings.";
const DESTINATION_SUFFIX: &str = ".destination";

/// Flat, read-only view of a module's runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuntimeConfig {
    values: BTreeMap<String, String>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries whose key ends with `suffix`, in key order
    pub fn entries_with_suffix<'a>(
        &'a self,
        suffix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.iter().filter(move |(key, _)| key.ends_with(suffix))
    }

    /// `spring.cloud.stream.bindings.<binding>.destination` entries keyed by binding name
    pub fn binding_destinations(&self) -> BTreeMap<&str, &str> {
        self.iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(BINDINGS_PREFIX)
                    .and_then(|rest| rest.strip_suffix(DESTINATION_SUFFIX))
                    .map(|binding| (binding, value))
            })
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Overwrite with `entries`, in order
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.values.extend(entries);
    }
}

impl FromIterator<(String, String)> for RuntimeConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut config = Self::new();
        config.extend(iter);
        config
    }
}

/// Loads [`RuntimeConfig`] for a module directory
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfigLoader {
    settings: RuntimeConfigSettings,
}

impl RuntimeConfigLoader {
    pub fn new(settings: RuntimeConfigSettings) -> Self {
        Self { settings }
    }

    /// Load the layered configuration of the module rooted at `module_dir`.
    ///
    /// Never fails: absent or unreadable configuration is an empty map.
    pub fn load(&self, module_dir: &Path, env: &dyn EnvironmentSource) -> RuntimeConfig {
        let resource_dir = module_dir.join(&self.settings.resource_dir);
        let mut config = RuntimeConfig::new();

        self.load_layer(&resource_dir, &self.settings.base_name, &mut config);

        for profile in self.active_profiles(&config, env) {
            let stem = format!("{}-{}", self.settings.base_name, profile);
            self.load_layer(&resource_dir, &stem, &mut config);
        }

        let resolved = resolve_all(&config, env);
        debug!(
            path = %module_dir.display(),
            keys = resolved.len(),
            "Loaded runtime configuration"
        );
        resolved
    }

    fn active_profiles(&self, config: &RuntimeConfig, env: &dyn EnvironmentSource) -> Vec<String> {
        let Some(raw) = config.get(&self.settings.profile_key) else {
            return Vec::new();
        };

        let value = resolve_placeholders(raw, env, |name| config.get(name).map(str::to_string));
        let mut profiles: Vec<String> = Vec::new();
        for profile in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if !profiles.iter().any(|p| p == profile) {
                profiles.push(profile.to_string());
            }
        }
        profiles
    }

    fn load_layer(&self, dir: &Path, stem: &str, config: &mut RuntimeConfig) {
        for extension in EXTENSIONS {
            let path = dir.join(format!("{}.{}", stem, extension));
            match read_file(&path) {
                Ok(Some(entries)) => {
                    debug!(path = %path.display(), entries = entries.len(), "Read configuration file");
                    config.extend(entries);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping malformed configuration file");
                }
            }
        }
    }
}

fn read_file(path: &Path) -> Result<Option<Vec<(String, String)>>, RuntimeConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let entries = match path.extension().and_then(|e| e.to_str()) {
        Some("properties") => parse_properties(&content)?,
        _ => flatten_yaml(&content)?,
    };
    Ok(Some(entries))
}

/// Resolve placeholders in every value against the environment and the raw
/// (unresolved) values of other keys.
fn resolve_all(config: &RuntimeConfig, env: &dyn EnvironmentSource) -> RuntimeConfig {
    config
        .iter()
        .map(|(key, value)| {
            let resolved = resolve_placeholders(value, env, |name| {
                (name != key)
                    .then(|| config.get(name))
                    .flatten()
                    .map(str::to_string)
            });
            (key.to_string(), resolved)
        })
        .collect()
}
