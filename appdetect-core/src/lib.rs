//! appdetect Core - Foundation crate for JVM application detection
//!
//! This crate provides the shared pieces used by the analysis crates:
//!
//! # Modules
//!
//! - [`config`] - Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] - The parsed build descriptor model (`pom.xml`)
//! - [`application`] - Shared error types
//! - [`infrastructure`] - Descriptor parser, remote descriptor repository, cache and
//!   runtime configuration loader
//! - [`logging`] - Structured logging with tracing
//!
//! # Architecture
//!
//! ```text
//! appdetect-core/
//! ├── domain/           # Descriptor entities and value objects
//! ├── application/      # Error types
//! ├── infrastructure/   # External integrations
//! │   ├── parsers/      # pom.xml parser
//! │   ├── registries/   # Remote descriptor repository client
//! │   ├── cache/        # moka-backed descriptor cache
//! │   └── runtime_config/ # application.properties / application.yml loader
//! └── config/           # Configuration management
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use appdetect_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `APPDETECT__` prefix with double underscore separators:
//!
//! ```bash
//! APPDETECT__REPOSITORY__OFFLINE=true
//! APPDETECT__CACHE__TTL_SECONDS=600
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
