//! appdetect Java - Effective descriptor resolution and resource inference
//!
//! This crate turns a Java module's `pom.xml` into an effective descriptor without
//! running the build tool, and infers the managed cloud resources the module uses
//! from its dependencies and runtime configuration.
//!
//! # Features
//!
//! - **Effective Descriptor** - Default profiles, local and remote parents and BOM imports
//!   absorbed into one descriptor, with placeholders and managed versions filled in
//! - **Resource Inference** - Databases, Service Bus, Event Hubs and Storage accounts
//!   detected from Spring Boot dependencies and `application.*` files
//! - **Rationale** - Every detection comes with a structured explanation
//! - **Concurrent Modules** - Many modules analyzed with a configurable bound
//!
//! # Usage
//!
//! ```rust,ignore
//! use appdetect_java::JavaModuleAnalyzer;
//! use appdetect_core::Config;
//!
//! let analyzer = JavaModuleAnalyzer::from_config(&Config::load()?)?;
//! if let Some(project) = analyzer.analyze(Path::new("services/orders")).await? {
//!     println!("{:?}", project.dependencies);
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! appdetect-java/
//! ├── domain/         # EffectiveDescriptor, PropertyMap, InferredDependency
//! ├── services/
//! │   ├── resolution/ # Property substitution, managed versions, resolver
//! │   └── inference/  # Rule catalog and engine
//! └── module.rs       # JavaModuleAnalyzer
//! ```

pub mod domain;
pub mod module;
pub mod services;

pub use domain::*;
pub use module::JavaModuleAnalyzer;
pub use services::{EffectiveDescriptorResolver, RuleEngine};
