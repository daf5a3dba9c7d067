//! Project descriptor model
//!
//! A [`Descriptor`] is the structured form of one `pom.xml` file as declared, before
//! any inheritance, profile or import absorption has happened.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
