use std::fs;
use std::path::PathBuf;

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

/// Canonical path of `relative_path` under the workspace root, e.g. the default dashboard output
/// directory. Fails if the path does not exist.
pub fn resolve_project_relative_path(relative_path: &str) -> Result<PathBuf, std::io::Error> {
    fs::canonicalize(workspace_root().join(relative_path))
}

// Member crates live in `<root>/crates/<name>`.
fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).expect("Cannot navigate up").into()
}
