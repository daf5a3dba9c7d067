//! Detect Command - infer cloud resources for module directories

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use appdetect_core::Config;
use appdetect_java::{InferredDependency, JavaModuleAnalyzer, JavaProject};

use crate::exit_codes;
use crate::output::{Output, OutputFormat};

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Module directories, each containing a pom.xml
    #[arg(required = true)]
    pub modules: Vec<PathBuf>,
}

/// Result for one module
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModuleReport {
    Application { project: Box<JavaProject> },
    Aggregator { path: PathBuf },
    Failed { path: PathBuf, error: String },
}

pub async fn run(config: &Config, output: &Output, args: &DetectArgs) -> Result<i32> {
    let analyzer =
        JavaModuleAnalyzer::from_config(config).context("Failed to create module analyzer")?;

    let reports: Vec<ModuleReport> = analyzer
        .analyze_modules(&args.modules)
        .await
        .into_iter()
        .map(|(path, outcome)| match outcome {
            Ok(Some(project)) => ModuleReport::Application {
                project: Box::new(project),
            },
            Ok(None) => ModuleReport::Aggregator { path },
            Err(e) => ModuleReport::Failed {
                path,
                error: e.to_string(),
            },
        })
        .collect();

    match output.format() {
        OutputFormat::Json => output.json(&reports)?,
        OutputFormat::Text => {
            for report in &reports {
                print_report(output, report);
            }
        }
    }

    let failed = reports
        .iter()
        .filter(|r| matches!(r, ModuleReport::Failed { .. }))
        .count();
    for report in &reports {
        if let ModuleReport::Failed { path, error } = report {
            output.error(&format!("{}: {}", path.display(), error));
        }
    }

    if failed > 0 {
        Ok(exit_codes::ANALYSIS_FAILED)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn print_report(output: &Output, report: &ModuleReport) {
    match report {
        ModuleReport::Aggregator { path } => {
            output.header(&path.display().to_string());
            output.print("Multi-module root, nothing to detect");
        }
        ModuleReport::Failed { path, .. } => {
            output.header(&path.display().to_string());
            output.print("Analysis failed");
        }
        ModuleReport::Application { project } => print_project(output, project),
    }
}

fn print_project(output: &Output, project: &JavaProject) {
    output.header(&format!(
        "{} ({})",
        project.path.display(),
        project.descriptor.coordinates()
    ));

    output.section("Resources");
    if project.dependencies.is_empty() {
        output.item("none");
    }
    for dependency in &project.dependencies {
        output.item(&describe(dependency));
    }

    let metadata = &project.metadata;
    output.section("Metadata");
    if let Some(name) = &metadata.application_name {
        output.item(&format!("application name: {}", name));
    }
    if let Some(port) = metadata.server_port {
        output.item(&format!("server port: {}", port));
    }
    if let Some(version) = &metadata.spring_boot_version {
        output.item(&format!("Spring Boot version: {}", version));
    }
    for (kind, name) in &metadata.database_names {
        output.item(&format!("{} database: {}", kind, name));
    }

    if !project.rationale.is_empty() {
        output.section("Rationale");
        for rationale in &project.rationale {
            output.item(&rationale.message);
        }
    }
}

fn describe(dependency: &InferredDependency) -> String {
    let names = |label: &str, values: &[String]| {
        if values.is_empty() {
            String::new()
        } else {
            format!(" ({}: {})", label, values.join(", "))
        }
    };

    match dependency {
        InferredDependency::Database { .. } => dependency.display_name().to_string(),
        InferredDependency::ServiceBus { queues, is_jms } => format!(
            "{}{}{}",
            dependency.display_name(),
            if *is_jms { " [JMS]" } else { "" },
            names("queues", queues)
        ),
        InferredDependency::EventHubs {
            hub_names,
            use_kafka,
            ..
        } => format!(
            "{}{}{}",
            dependency.display_name(),
            if *use_kafka { " [Kafka]" } else { "" },
            names("event hubs", hub_names)
        ),
        InferredDependency::StorageAccount { container_names } => format!(
            "{}{}",
            dependency.display_name(),
            names("containers", container_names)
        ),
    }
}
