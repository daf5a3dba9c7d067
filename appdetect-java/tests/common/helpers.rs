//! Test helper functions for appdetect-java

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use appdetect_core::config::AnalysisConfig;
use appdetect_core::infrastructure::registries::{DescriptorRepository, OfflineRepository};
use appdetect_core::infrastructure::runtime_config::RuntimeConfigLoader;
use appdetect_java::{EffectiveDescriptorResolver, JavaModuleAnalyzer, RuleEngine};

/// Create a temporary directory for testing
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write `content` to `relative` under `root`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(&path, content).expect("Failed to write temp file");
    path
}

/// Write a runtime configuration file into a module's default resource directory
pub fn write_resource(module: &Path, file_name: &str, content: &str) -> PathBuf {
    write_file(module, &format!("src/main/resources/{}", file_name), content)
}

pub fn offline_resolver() -> EffectiveDescriptorResolver {
    EffectiveDescriptorResolver::new(Arc::new(OfflineRepository))
}

/// Rule engine whose placeholder environment is exactly `vars`
pub fn engine_with_env(vars: &[(&str, &str)]) -> RuleEngine {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    RuleEngine::new(RuntimeConfigLoader::default(), Arc::new(env))
}

pub fn analyzer(repository: Arc<dyn DescriptorRepository>) -> JavaModuleAnalyzer {
    JavaModuleAnalyzer::new(
        EffectiveDescriptorResolver::new(repository),
        engine_with_env(&[]),
        &AnalysisConfig::default(),
    )
}
