//! `${NAME}` / `${NAME:default}` placeholder substitution for runtime configuration values

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::([^}]*))?\}").expect("placeholder pattern is valid")
});

/// Source of environment variables used to resolve placeholders
pub trait EnvironmentSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvironmentSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Substitute every placeholder in `value`.
///
/// Lookup order is the environment, then `fallback` (other keys of the same
/// configuration), then the inline default. A placeholder with none of those is
/// left as written.
pub fn resolve_placeholders<F>(value: &str, env: &dyn EnvironmentSource, fallback: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains("${") {
        return value.to_string();
    }

    PLACEHOLDER
        .replace_all(value, |caps: &Captures| {
            let name = caps[1].trim();
            env.var(name)
                .or_else(|| fallback(name))
                .or_else(|| caps.get(2).map(|default| default.as_str().to_string()))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
