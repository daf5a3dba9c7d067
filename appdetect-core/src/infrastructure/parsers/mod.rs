//! Descriptor parsers

pub mod maven;

pub use maven::MavenParser;
