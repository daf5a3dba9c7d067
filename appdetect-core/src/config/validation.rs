//! Configuration validation module

use crate::config::{
    AnalysisConfig, CacheConfig, Config, LoggingConfig, RepositoryConfig, RuntimeConfigSettings,
};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Repository configuration error: {message}")]
    Repository { message: String },

    #[error("Cache configuration error: {message}")]
    Cache { message: String },

    #[error("Runtime configuration error: {message}")]
    RuntimeConfig { message: String },

    #[error("Analysis configuration error: {message}")]
    Analysis { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },
}

impl ValidationError {
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn runtime_config(message: impl Into<String>) -> Self {
        Self::RuntimeConfig {
            message: message.into(),
        }
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl Validate for RepositoryConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let url = url::Url::parse(&self.base_url).map_err(|e| {
            ValidationError::repository(format!("Invalid base_url '{}': {}", self.base_url, e))
        })?;

        let host = url.host_str().ok_or_else(|| {
            ValidationError::repository(format!("base_url '{}' has no host", self.base_url))
        })?;

        if !self.allowed_hosts.iter().any(|allowed| allowed == host) {
            return Err(ValidationError::repository(format!(
                "base_url host '{}' is not in allowed_hosts {:?}",
                host, self.allowed_hosts
            )));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::repository(
                "Request timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.max_entries == 0 {
            return Err(ValidationError::cache(
                "max_entries must be greater than 0 when the cache is enabled",
            ));
        }
        if self.enabled && self.ttl_seconds == 0 {
            return Err(ValidationError::cache(
                "Cache TTL must be greater than 0 seconds",
            ));
        }
        Ok(())
    }
}

impl Validate for RuntimeConfigSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.base_name.trim().is_empty() {
            return Err(ValidationError::runtime_config("base_name cannot be empty"));
        }
        if self.profile_key.trim().is_empty() {
            return Err(ValidationError::runtime_config("profile_key cannot be empty"));
        }
        Ok(())
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_concurrent_modules == 0 {
            return Err(ValidationError::analysis(
                "max_concurrent_modules must be greater than 0",
            ));
        }
        if self.descriptor_file_name.trim().is_empty() {
            return Err(ValidationError::analysis(
                "descriptor_file_name cannot be empty",
            ));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "json" | "pretty" | "compact" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "Unknown log format '{}', expected json, pretty or compact",
                other
            ))),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.repository.validate()?;
        self.cache.validate()?;
        self.runtime_config.validate()?;
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
