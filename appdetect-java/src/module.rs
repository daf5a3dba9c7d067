//! Per-module analysis: resolve the descriptor, then infer resources

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use appdetect_core::Config;
use appdetect_core::application::errors::{AnalysisError, RepositoryError};
use appdetect_core::config::AnalysisConfig;
use appdetect_core::infrastructure::registries::build_repository;

use crate::domain::JavaProject;
use crate::services::{EffectiveDescriptorResolver, RuleEngine};

/// Outcome of analyzing one module directory
pub type ModuleOutcome = Result<Option<JavaProject>, AnalysisError>;

/// Analyzes Java module directories
///
/// Modules are independent; the shared repository and its cache are the only
/// state they have in common.
pub struct JavaModuleAnalyzer {
    resolver: EffectiveDescriptorResolver,
    engine: RuleEngine,
    descriptor_file_name: String,
    max_concurrent_modules: usize,
}

impl JavaModuleAnalyzer {
    pub fn new(
        resolver: EffectiveDescriptorResolver,
        engine: RuleEngine,
        analysis: &AnalysisConfig,
    ) -> Self {
        Self {
            resolver,
            engine,
            descriptor_file_name: analysis.descriptor_file_name.clone(),
            max_concurrent_modules: analysis.max_concurrent_modules.max(1),
        }
    }

    /// Wire the repository, cache and rule engine from configuration
    pub fn from_config(config: &Config) -> Result<Self, RepositoryError> {
        let repository = build_repository(&config.repository, &config.cache)?;
        Ok(Self::new(
            EffectiveDescriptorResolver::new(repository),
            RuleEngine::from_settings(config.runtime_config.clone()),
            &config.analysis,
        ))
    }

    /// Analyze the module rooted at `module_dir`.
    ///
    /// Aggregator modules yield `Ok(None)`. A module that is not a Spring Boot
    /// application yields a project with no inferred resources.
    pub async fn analyze(&self, module_dir: &Path) -> ModuleOutcome {
        let descriptor_path = module_dir.join(&self.descriptor_file_name);
        if !descriptor_path.is_file() {
            return Err(AnalysisError::MissingDescriptor {
                path: module_dir.to_path_buf(),
            });
        }

        let effective = self.resolver.resolve(&descriptor_path).await?;
        if effective.is_aggregator() {
            debug!(
                module = %module_dir.display(),
                modules = effective.modules.len(),
                "Aggregator module, no application to analyze"
            );
            return Ok(None);
        }

        let report = self.engine.infer(&effective, module_dir);
        Ok(Some(JavaProject::new(
            module_dir.to_path_buf(),
            effective,
            report,
        )))
    }

    /// Analyze several modules with bounded concurrency. Results come back in
    /// input order; one module's failure does not affect the others.
    pub async fn analyze_modules(&self, module_dirs: &[PathBuf]) -> Vec<(PathBuf, ModuleOutcome)> {
        info!(
            modules = module_dirs.len(),
            max_concurrent = self.max_concurrent_modules,
            "Analyzing modules"
        );

        let mut results: Vec<(usize, PathBuf, ModuleOutcome)> =
            stream::iter(module_dirs.iter().enumerate().map(|(idx, dir)| async move {
                let outcome = self.analyze(dir).await;
                (idx, dir.clone(), outcome)
            }))
            .buffer_unordered(self.max_concurrent_modules)
            .collect()
            .await;
        results.sort_by_key(|(idx, _, _)| *idx);

        let failed = results.iter().filter(|(_, _, r)| r.is_err()).count();
        if failed > 0 {
            warn!(failed, "Some modules could not be analyzed");
        }

        results
            .into_iter()
            .map(|(_, dir, outcome)| (dir, outcome))
            .collect()
    }
}
