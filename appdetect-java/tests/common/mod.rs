//! Common test utilities for appdetect-java
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;
pub mod repository;

pub use fixtures::*;
pub use helpers::*;
pub use repository::*;
