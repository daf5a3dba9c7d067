//! Domain Layer - Build descriptor model
//!
//! This module contains the entities and value objects that describe a parsed
//! Maven project descriptor (`pom.xml`), independent of how it was read.

pub mod descriptor;

pub use descriptor::*;
