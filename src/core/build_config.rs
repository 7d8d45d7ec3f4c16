//! Build configuration
//!
//! One [`BuildConfig`] is built at startup and moved into the port that
//! runs the pipeline. The port name starts as the reference port's and can
//! be claimed exactly once by a specialization; after the port owns the
//! configuration it is only reachable by shared reference, so every step
//! sees the same port name and variant.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::config::defaults;
use crate::error::{ArgumentError, PreconditionError};

fn variant_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"))
}

/// Project path layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    /// Project root (script directory of the driver)
    pub root: PathBuf,
    /// MicroPython checkout, the native build root
    pub micropython: PathBuf,
    /// LVGL checkout
    pub lvgl: PathBuf,
    /// SDL checkout
    pub sdl: PathBuf,
    /// Port-specific source updates working tree
    pub updates: PathBuf,
    /// Top-level output directory
    pub output: PathBuf,
}

impl BuildPaths {
    /// Default layout below `root`
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            micropython: root.join(defaults::MICROPYTHON_DIR),
            lvgl: root.join(defaults::LVGL_DIR),
            sdl: root.join(defaults::SDL_DIR),
            updates: root.join(defaults::UPDATES_DIR),
            output: root.join(defaults::OUTPUT_DIR),
        }
    }
}

/// Configuration shared by every pipeline step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    port_name: String,
    claimed: bool,
    variant: String,
    jobs: usize,
    paths: BuildPaths,
}

impl BuildConfig {
    /// Unclaimed configuration with the default layout below `root`
    pub fn new(root: &Path) -> Self {
        Self::with_paths(BuildPaths::rooted_at(root))
    }

    /// Unclaimed configuration with an explicit layout
    pub fn with_paths(paths: BuildPaths) -> Self {
        Self {
            port_name: defaults::DEFAULT_PORT.to_string(),
            claimed: false,
            variant: defaults::DEFAULT_VARIANT.to_string(),
            jobs: num_cpus::get(),
            paths,
        }
    }

    /// Set the build variant
    ///
    /// The variant names a directory under the port, so only a single plain
    /// path component is accepted.
    pub fn with_variant(mut self, variant: &str) -> Result<Self, ArgumentError> {
        if !variant_name().is_match(variant) {
            return Err(ArgumentError::InvalidVariant {
                variant: variant.to_string(),
            });
        }
        self.variant = variant.to_string();
        Ok(self)
    }

    /// Set the number of parallel jobs (at least one)
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Claim the port identity
    ///
    /// Irreversible: a second claim fails, whatever the name.
    pub fn claim(mut self, port_name: &str) -> Result<Self, PreconditionError> {
        if self.claimed {
            return Err(PreconditionError::AlreadyClaimed {
                current: self.port_name,
                requested: port_name.to_string(),
            });
        }
        tracing::debug!("Port identity claimed: {} -> {port_name}", self.port_name);
        self.port_name = port_name.to_string();
        self.claimed = true;
        Ok(self)
    }

    /// Active port name
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Whether a specialization has claimed the identity
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Active variant
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Parallel jobs passed to make and cmake
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Path layout
    pub fn paths(&self) -> &BuildPaths {
        &self.paths
    }

    /// Native port directory (`<micropython>/ports/<base-port>`)
    pub fn port_dir(&self) -> PathBuf {
        self.paths
            .micropython
            .join("ports")
            .join(defaults::BASE_PORT)
    }

    /// Output directory of the active variant
    pub fn variant_build_dir(&self) -> PathBuf {
        self.port_dir().join(format!("build-{}", self.variant))
    }

    /// Cross-compiler source directory
    pub fn mpy_cross_dir(&self) -> PathBuf {
        self.paths.micropython.join("mpy-cross")
    }

    /// Cross-compiler build output directory
    pub fn mpy_cross_build_dir(&self) -> PathBuf {
        self.mpy_cross_dir().join("build")
    }

    /// Working tree for this port's original sources
    pub fn originals_dir(&self) -> PathBuf {
        self.paths.updates.join("originals").join(&self.port_name)
    }
}
