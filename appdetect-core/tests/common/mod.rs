//! Common test utilities for appdetect-core
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
