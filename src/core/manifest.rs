//! Frozen-module manifest generation
//!
//! Produces the MicroPython `manifest.py` that tells the native build which
//! LVGL API and driver modules to freeze into the firmware. A caller-supplied
//! frozen manifest is merged in: its text leads the output unchanged, and a
//! generated statement is appended only when the frozen text does not
//! already contain it as a line of its own.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ManifestError;

/// Header written at the top of every generated manifest
pub const MANIFEST_HEADER: &str = "# Generated by lvport. Edits are overwritten on the next build.";

/// A frozen baseline followed by generated statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    frozen: String,
    entries: Vec<String>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Use existing manifest source as the frozen baseline
    ///
    /// The text is kept as written. Multi-line statements and indented
    /// blocks are Python and must reach the build untouched.
    pub fn parse(content: &str) -> Self {
        let mut frozen = content.to_string();
        if !frozen.is_empty() && !frozen.ends_with('\n') {
            frozen.push('\n');
        }
        Self {
            frozen,
            entries: Vec::new(),
        }
    }

    /// Append a single-line statement unless an equal one is present
    ///
    /// Returns `true` if the entry was added.
    pub fn push(&mut self, entry: &str) -> bool {
        let entry = entry.trim();
        if entry.is_empty() || self.contains(entry) {
            return false;
        }
        self.entries.push(entry.to_string());
        true
    }

    /// Whether `entry` is a whole line of the baseline or a generated entry
    pub fn contains(&self, entry: &str) -> bool {
        let entry = entry.trim();
        self.frozen.lines().any(|line| line.trim() == entry)
            || self.entries.iter().any(|e| e == entry)
    }

    /// Frozen baseline text
    pub fn frozen(&self) -> &str {
        &self.frozen
    }

    /// Generated entries in order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Render as manifest file text
    pub fn render(&self) -> String {
        let mut out = String::from(MANIFEST_HEADER);
        out.push('\n');
        out.push_str(&self.frozen);
        for entry in &self.entries {
            out.push_str(entry);
            out.push('\n');
        }
        out
    }
}

/// What to bind into the firmware
#[derive(Debug, Clone, Copy)]
pub struct ManifestRequest<'a> {
    /// Freeze the Python-level LVGL API drivers
    pub lvgl_api: bool,
    /// Display drivers
    pub displays: &'a [String],
    /// Input device drivers
    pub indevs: &'a [String],
    /// Baseline manifest to merge with
    pub frozen_manifest: Option<&'a Path>,
}

fn driver_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"))
}

fn validate_drivers(kind: &'static str, names: &[String]) -> Result<(), ManifestError> {
    match names.iter().find(|n| !driver_name().is_match(n)) {
        Some(name) => Err(ManifestError::InvalidDriverName {
            kind,
            name: name.clone(),
        }),
        None => Ok(()),
    }
}

/// Read a frozen manifest if it exists
///
/// A missing file yields `Ok(None)`.
pub fn read_frozen(path: &Path) -> Result<Option<Manifest>, ManifestError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| ManifestError::ReadFrozen {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(Some(Manifest::parse(&content)))
}

fn module_entry(name: &str, base_path: &Path) -> String {
    format!("module(\"{name}.py\", base_path=\"{}\")", base_path.display())
}

/// Build the merged manifest for `script_dir`
pub fn generate(script_dir: &Path, request: &ManifestRequest<'_>) -> Result<Manifest, ManifestError> {
    validate_drivers("display", request.displays)?;
    validate_drivers("indev", request.indevs)?;

    let mut manifest = match request.frozen_manifest {
        Some(path) => read_frozen(path)?.unwrap_or_else(|| {
            tracing::warn!("Frozen manifest {} not found, ignoring", path.display());
            Manifest::new()
        }),
        None => Manifest::new(),
    };

    let api_drivers = script_dir.join("api_drivers");

    if request.lvgl_api {
        manifest.push(&format!(
            "package(\"lvgl_api_drivers\", base_path=\"{}\")",
            api_drivers.display()
        ));
    }

    if !request.displays.is_empty() {
        manifest.push(&module_entry(
            "display_driver_framework",
            &api_drivers.join("frozen/display"),
        ));
        for display in request.displays {
            manifest.push(&module_entry(
                display,
                &api_drivers.join("common_api_drivers/display").join(display),
            ));
        }
    }

    if !request.indevs.is_empty() {
        manifest.push(&module_entry(
            "pointer_framework",
            &api_drivers.join("frozen/indev"),
        ));
        for indev in request.indevs {
            manifest.push(&module_entry(
                indev,
                &api_drivers.join("common_api_drivers/indev").join(indev),
            ));
        }
    }

    Ok(manifest)
}

/// Write `manifest` to `path`
///
/// Writes a temporary sibling first and renames it into place, so a failed
/// write never leaves a truncated manifest behind.
pub fn write(path: &Path, manifest: &Manifest) -> Result<PathBuf, ManifestError> {
    let write_err = |e: std::io::Error| ManifestError::Write {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = path.with_extension("py.tmp");
    std::fs::write(&tmp, manifest.render()).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    tracing::info!(
        "Wrote manifest {} ({} generated entries)",
        path.display(),
        manifest.entries().len()
    );
    Ok(path.to_path_buf())
}
