//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub repository: RepositoryConfig,
    pub cache: CacheConfig,
    pub runtime_config: RuntimeConfigSettings,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// Remote descriptor repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository root, e.g. `https://repo.maven.apache.org/maven2`
    pub base_url: String,
    /// Hosts a descriptor may be fetched from. Anything else is rejected before the request.
    pub allowed_hosts: Vec<String>,
    /// Timeout for a single descriptor download (in seconds)
    pub request_timeout_seconds: u64,
    /// Never touch the network; parents and BOMs not on disk stay unresolved
    pub offline: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://repo.maven.apache.org/maven2".to_string(),
            allowed_hosts: vec!["repo.maven.apache.org".to_string()],
            request_timeout_seconds: 10,
            offline: false,
        }
    }
}

impl RepositoryConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Remote descriptor cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Maximum number of cached descriptors
    pub max_entries: u64,
    /// Time-to-live of a cached descriptor (in seconds)
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 1024,
            ttl_seconds: 3600,
        }
    }
}

/// Where and how a module's runtime configuration files are looked up
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfigSettings {
    /// Directory relative to the module root
    pub resource_dir: String,
    /// File stem of the base configuration file
    pub base_name: String,
    /// Key naming the active profile(s), comma separated
    pub profile_key: String,
}

impl Default for RuntimeConfigSettings {
    fn default() -> Self {
        Self {
            resource_dir: "src/main/resources".to_string(),
            base_name: "application".to_string(),
            profile_key: "spring.profiles.active".to_string(),
        }
    }
}

/// Module analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum number of modules analyzed concurrently
    pub max_concurrent_modules: usize,
    /// Descriptor file name looked up in each module directory
    pub descriptor_file_name: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_concurrent_modules: 4,
            descriptor_file_name: "pom.xml".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `json`, `pretty` or `compact`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_with(None)
    }

    /// Load configuration, layering an explicit file over the default sources
    pub fn load_from(path: &Path) -> Result<Self, ConfigLoadError> {
        Self::load_with(Some(path))
    }

    fn load_with(explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder.add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // Environment variables last (highest priority)
        builder = builder.add_source(
            config::Environment::with_prefix("APPDETECT")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("repository.allowed_hosts")
                .try_parsing(true),
        );

        let config: Config = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
