//! Filesystem operations
//!
//! Handles directory creation and removal for build trees.

use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
///
/// Returns `true` if something was removed, `false` if the path did not exist.
pub fn remove_dir_all(path: &Path) -> Result<bool, FilesystemError> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(true)
}

/// List subdirectories of `dir` whose name starts with `prefix`, sorted
///
/// A missing `dir` yields an empty list.
pub fn subdirs_with_prefix(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, FilesystemError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let read_err = |e: std::io::Error| FilesystemError::Read {
        path: dir.to_path_buf(),
        error: e.to_string(),
    };

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(prefix));
        if matches && path.is_dir() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Check whether a directory is missing or has no entries
pub fn is_missing_or_empty(path: &Path) -> bool {
    std::fs::read_dir(path).map_or(true, |mut entries| entries.next().is_none())
}
