//! Output formatting

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Writes results to stdout and problems to stderr
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn header(&self, title: &str) {
        println!("\n{}", title);
        println!("{}", "=".repeat(title.chars().count()));
    }

    pub fn section(&self, title: &str) {
        println!("\n{}:", title);
    }

    pub fn item(&self, text: &str) {
        println!("  - {}", text);
    }

    pub fn print(&self, text: &str) {
        println!("{}", text);
    }

    pub fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}
