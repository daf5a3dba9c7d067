//! Effective descriptor resolution
//!
//! - [`properties`] - property tables and `${name}` substitution
//! - [`managed`] - managed version lookup for declared dependencies
//! - [`resolver`] - profile, parent and import absorption

pub mod managed;
pub mod properties;
pub mod resolver;

pub use resolver::EffectiveDescriptorResolver;
