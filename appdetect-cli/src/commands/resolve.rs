//! Resolve Command - print the effective descriptor of a pom.xml

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use appdetect_core::Config;
use appdetect_core::infrastructure::registries::build_repository;
use appdetect_java::{EffectiveDescriptor, EffectiveDescriptorResolver};

use crate::exit_codes;
use crate::output::{Output, OutputFormat};

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the descriptor file
    pub pom: PathBuf,
}

pub async fn run(config: &Config, output: &Output, args: &ResolveArgs) -> Result<i32> {
    let repository = build_repository(&config.repository, &config.cache)
        .context("Failed to create descriptor repository")?;
    let resolver = EffectiveDescriptorResolver::new(repository);

    let effective = match resolver.resolve(&args.pom).await {
        Ok(effective) => effective,
        Err(e) => {
            output.error(&format!("{}: {}", args.pom.display(), e));
            return Ok(exit_codes::ANALYSIS_FAILED);
        }
    };

    match output.format() {
        OutputFormat::Json => output.json(&effective)?,
        OutputFormat::Text => print_descriptor(output, &effective),
    }
    Ok(exit_codes::SUCCESS)
}

fn print_descriptor(output: &Output, effective: &EffectiveDescriptor) {
    output.header(&effective.coordinates().to_string());

    if let Some(parent) = &effective.parent {
        output.print(&format!("parent: {}", parent.coordinates()));
    }
    if effective.is_aggregator() {
        output.print(&format!("modules: {}", effective.modules.join(", ")));
    }

    if !effective.properties.is_empty() {
        output.section("Properties");
        for (name, value) in effective.properties.iter() {
            output.item(&format!("{} = {}", name, value));
        }
    }

    if !effective.managed_dependencies.is_empty() {
        output.section("Managed dependencies");
        for dependency in effective.managed_dependencies.iter() {
            output.item(&dependency.to_string());
        }
    }

    output.section("Dependencies");
    for dependency in &effective.dependencies {
        output.item(&dependency.to_string());
    }

    if !effective.plugins.is_empty() {
        output.section("Plugins");
        for plugin in &effective.plugins {
            output.item(&format!(
                "{}:{}:{}",
                plugin.group_id, plugin.artifact_id, plugin.version
            ));
        }
    }
}
