//! Test utilities for arcshim
//!
//! This crate provides shared testing utilities used across the arcshim workspace.

pub mod fixtures;

pub use fixtures::{
    STUB_EXIT_CODE, install_stub_executable, stub_script, tar_gz_archive, zip_archive,
};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the crate root
///
/// This keeps all test temporary files in a single gitignored location
/// that is easy to clean up manually if needed.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use arcshim_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
