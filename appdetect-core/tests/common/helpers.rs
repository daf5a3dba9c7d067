//! Test helper functions for appdetect-core

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write `content` to `relative` under `root`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(&path, content).expect("Failed to write temp file");
    path
}

/// Write a runtime configuration file into the default resource directory
pub fn write_resource(root: &Path, file_name: &str, content: &str) -> PathBuf {
    write_file(root, &format!("src/main/resources/{}", file_name), content)
}
