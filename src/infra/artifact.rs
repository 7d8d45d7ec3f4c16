//! Best-effort artifact copies
//!
//! Copies build outputs from the native build tree to the top-level output
//! directory. A missing source is a valid outcome, not an error.

use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::FilesystemError;
use crate::infra::filesystem;

/// A completed artifact copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCopy {
    /// Source path in the build tree
    pub source: PathBuf,
    /// Destination path in the output directory
    pub destination: PathBuf,
    /// Bytes copied
    pub bytes: u64,
    /// SHA-256 of the destination file (hex)
    pub sha256: String,
}

/// Copy `source` to `destination` if `source` exists
///
/// Creates the destination's parent directory. Returns `Ok(None)` when the
/// source is absent.
pub fn copy_if_present(
    source: &Path,
    destination: &Path,
) -> Result<Option<ArtifactCopy>, FilesystemError> {
    if !source.is_file() {
        tracing::debug!("Artifact {} not produced, skipping copy", source.display());
        return Ok(None);
    }

    if let Some(parent) = destination.parent() {
        filesystem::create_dir_all(parent)?;
    }

    let bytes = std::fs::copy(source, destination).map_err(|e| FilesystemError::CopyFile {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        error: e.to_string(),
    })?;
    let sha256 = sha256_file(destination)?;

    tracing::info!(
        "Copied {} -> {} ({bytes} bytes, sha256 {sha256})",
        source.display(),
        destination.display()
    );

    Ok(Some(ArtifactCopy {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        bytes,
        sha256,
    }))
}

/// Compute the SHA-256 of a file as lowercase hex
pub fn sha256_file(path: &Path) -> Result<String, FilesystemError> {
    let read_err = |e: std::io::Error| FilesystemError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(read_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
