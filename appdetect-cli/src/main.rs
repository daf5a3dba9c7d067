//! appdetect - infer the cloud resources a Java service needs from its build
//! descriptor and runtime configuration

mod commands;
mod exit_codes;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use appdetect_core::{Config, init_tracing};

use crate::commands::{detect::DetectArgs, resolve::ResolveArgs};
use crate::output::{Output, OutputFormat};

/// Detects the managed cloud resources Spring Boot services depend on, without
/// running the build tool.
#[derive(Parser, Debug)]
#[command(name = "appdetect", version, about)]
pub struct Cli {
    /// Configuration file layered over the default sources
    #[arg(long, global = true, env = "APPDETECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Never contact the remote descriptor repository
    #[arg(long, global = true)]
    pub offline: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective descriptor of a pom.xml
    Resolve(ResolveArgs),
    /// Infer cloud resources for one or more module directories
    Detect(DetectArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.logging).context("Failed to initialize logging")?;

    tracing::debug!(
        offline = config.repository.offline,
        base_url = %config.repository.base_url,
        "Configuration loaded"
    );

    let output = Output::new(cli.format);
    let code = match &cli.command {
        Commands::Resolve(args) => commands::resolve::run(&config, &output, args).await?,
        Commands::Detect(args) => commands::detect::run(&config, &output, args).await?,
    };

    std::process::exit(code);
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };

    if cli.offline {
        config.repository.offline = true;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    Ok(config)
}
