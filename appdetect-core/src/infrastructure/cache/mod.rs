//! Caching implementations
//!
//! In-memory memoization of remote descriptor downloads, so that a parent or BOM
//! shared by many modules is fetched once per detection run.

pub mod memory_cache;

pub use memory_cache::MemoryCache;
