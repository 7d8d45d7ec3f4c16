//! Project settings
//!
//! Reads optional defaults from `lvport.toml` in the project root. Command
//! line flags override anything set here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::build_config::{BuildConfig, BuildPaths};
use crate::error::{ArgumentError, SettingsError};

/// Contents of `lvport.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Path overrides
    #[serde(default)]
    pub paths: PathSettings,

    /// Build defaults
    #[serde(default)]
    pub build: BuildSettings,

    /// Manifest defaults
    #[serde(default)]
    pub manifest: ManifestSettings,
}

/// Path overrides, relative to the project root unless absolute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathSettings {
    /// MicroPython checkout
    pub micropython: Option<PathBuf>,
    /// LVGL checkout
    pub lvgl: Option<PathBuf>,
    /// SDL checkout
    pub sdl: Option<PathBuf>,
    /// Source updates working tree
    pub updates: Option<PathBuf>,
    /// Output directory
    pub output: Option<PathBuf>,
}

/// Build defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSettings {
    /// Default variant
    pub variant: Option<String>,
    /// Default parallel jobs
    pub jobs: Option<usize>,
    /// Default board
    pub board: Option<String>,
    /// Default LVGL compiler flags
    pub lv_cflags: Option<String>,
}

/// Manifest defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestSettings {
    /// Freeze the LVGL API drivers
    pub lvgl_api: Option<bool>,
    /// Display drivers
    #[serde(default)]
    pub displays: Vec<String>,
    /// Input drivers
    #[serde(default)]
    pub indevs: Vec<String>,
    /// Baseline manifest to merge with
    pub frozen_manifest: Option<PathBuf>,
}

impl Settings {
    /// Load `lvport.toml` from `root`
    ///
    /// A missing file gives the default settings.
    pub fn load(root: &Path) -> Result<Self, SettingsError> {
        let path = root.join(defaults::SETTINGS_FILE);
        if !path.exists() {
            tracing::debug!("No {} in {}, using defaults", defaults::SETTINGS_FILE, root.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| SettingsError::Read {
            path: path.clone(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|e| SettingsError::Parse {
            path,
            error: e.to_string(),
        })
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve the path layout below `root`
    pub fn build_paths(&self, root: &Path) -> BuildPaths {
        let resolve = |configured: &Option<PathBuf>, default: PathBuf| {
            configured.as_ref().map_or(default, |p| root.join(p))
        };
        let defaults = BuildPaths::rooted_at(root);
        BuildPaths {
            micropython: resolve(&self.paths.micropython, defaults.micropython),
            lvgl: resolve(&self.paths.lvgl, defaults.lvgl),
            sdl: resolve(&self.paths.sdl, defaults.sdl),
            updates: resolve(&self.paths.updates, defaults.updates),
            output: resolve(&self.paths.output, defaults.output),
            root: defaults.root,
        }
    }

    /// Build an unclaimed configuration, letting CLI values win
    pub fn build_config(
        &self,
        root: &Path,
        variant: Option<&str>,
        jobs: Option<usize>,
    ) -> Result<BuildConfig, ArgumentError> {
        let mut config = BuildConfig::with_paths(self.build_paths(root));
        if let Some(variant) = variant.or(self.build.variant.as_deref()) {
            config = config.with_variant(variant)?;
        }
        if let Some(jobs) = jobs.or(self.build.jobs) {
            config = config.with_jobs(jobs);
        }
        Ok(config)
    }
}
