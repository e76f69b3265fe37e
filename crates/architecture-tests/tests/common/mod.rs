//! Workspace discovery shared by the architecture tests.

use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[allow(dead_code)]
/// Every `.rs` file under `crates/`, skipping build output.
pub fn rust_files() -> Vec<PathBuf> {
    walkdir::WalkDir::new(workspace_root().join("crates"))
        .into_iter()
        .filter_entry(|e| e.file_name() != "target")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

#[allow(dead_code)]
/// Production part of a source file: everything before its test module.
pub fn non_test_source(content: &str) -> &str {
    content
        .find("#[cfg(test)]")
        .map_or(content, |idx| &content[..idx])
}

#[allow(dead_code)]
/// True for integration tests and out-of-line unit test files.
pub fn is_test_file(path: &Path) -> bool {
    let path = path.to_string_lossy();
    path.contains("/tests/") || path.ends_with("_tests.rs") || path.ends_with("/tests.rs")
}
