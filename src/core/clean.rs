//! Clean logic
//!
//! Removes native build outputs. Removing something that is already gone is
//! recorded as skipped, so every clean is idempotent.

use std::path::{Path, PathBuf};

use crate::core::build_config::BuildConfig;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Result of clean operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanResult {
    /// Directories that were removed
    pub removed: Vec<PathBuf>,
    /// Directories that didn't exist (skipped)
    pub skipped: Vec<PathBuf>,
}

impl CleanResult {
    /// Remove `dir` and record the outcome
    fn remove(&mut self, dir: &Path) -> Result<(), FilesystemError> {
        if filesystem::remove_dir_all(dir)? {
            tracing::info!("Removed {}", dir.display());
            self.removed.push(dir.to_path_buf());
        } else {
            self.skipped.push(dir.to_path_buf());
        }
        Ok(())
    }
}

/// Remove the active variant's build directory
pub fn clean_variant(config: &BuildConfig) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();
    result.remove(&config.variant_build_dir())?;
    Ok(result)
}

/// Remove every variant build directory of the port
///
/// With `clean_mpy_cross`, the cross-compiler's build directory goes too.
pub fn clean_all(config: &BuildConfig, clean_mpy_cross: bool) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();

    let variant_dirs = filesystem::subdirs_with_prefix(&config.port_dir(), "build-")?;
    if variant_dirs.is_empty() {
        result.skipped.push(config.variant_build_dir());
    }
    for dir in &variant_dirs {
        result.remove(dir)?;
    }

    if clean_mpy_cross {
        result.remove(&config.mpy_cross_build_dir())?;
    }

    Ok(result)
}
