//! Infrastructure Layer - External integrations
//!
//! - [`parsers`] - `pom.xml` descriptor parser (quick-xml)
//! - [`registries`] - remote descriptor repository client (reqwest)
//! - [`cache`] - in-memory memoization of remote descriptors (moka)
//! - [`runtime_config`] - application property/YAML loader

pub mod cache;
pub mod parsers;
pub mod registries;
pub mod runtime_config;
