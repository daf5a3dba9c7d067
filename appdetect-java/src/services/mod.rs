//! Resolution and inference services

pub mod inference;
pub mod resolution;

pub use inference::*;
pub use resolution::*;
