//! Build ports
//!
//! A port is one way of driving the native build. [`BuildPort`] is the full
//! set of pipeline steps. [`unix::UnixPort`] is the reference port and
//! implements every step; specializations such as [`macos::MacOsPort`] hold
//! a `UnixPort` delegate and forward, wrap or replace individual steps.
//!
//! Steps that the reference pipeline calls from inside another step (only
//! `build_sdl` today) are dispatched through the outermost port, so a
//! replaced step is honoured even when reached through a forwarded one.

pub mod macos;
pub mod unix;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::args::BuildArgs;
use crate::core::build_config::BuildConfig;
use crate::core::clean::CleanResult;
use crate::core::commands::{BuildCommand, CommandSet};
use crate::error::{ArgumentError, CompileError, FilesystemError, ManifestError, PortError};

/// Driver-supplied context for command and manifest steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineContext {
    /// Working directory of the driver (project root for the CLI)
    pub script_dir: PathBuf,
    /// Opaque value handed through to the command set untouched
    pub passthrough: Option<String>,
}

impl PipelineContext {
    /// Context for `script_dir` with no pass-through value
    pub fn new(script_dir: &Path) -> Self {
        Self {
            script_dir: script_dir.to_path_buf(),
            passthrough: None,
        }
    }

    /// Path of the generated manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.script_dir.join(defaults::MANIFEST_PATH)
    }
}

/// The build pipeline
pub trait BuildPort {
    /// Configuration every step reads
    fn config(&self) -> &BuildConfig;

    /// Validate raw driver tokens
    fn parse_args(
        &self,
        extra_args: &[String],
        lv_cflags: &str,
        board: Option<&str>,
    ) -> Result<BuildArgs, ArgumentError>;

    /// Assemble the commands for a build
    fn build_commands(&self, ctx: &PipelineContext, args: &BuildArgs) -> CommandSet;

    /// Write the frozen-module manifest, returning its path
    fn build_manifest(
        &self,
        ctx: &PipelineContext,
        lvgl_api: bool,
        displays: &[String],
        indevs: &[String],
        frozen_manifest: Option<&Path>,
    ) -> Result<PathBuf, ManifestError>;

    /// Run a command set produced by `build_commands`
    fn compile(&self, commands: &CommandSet) -> Result<(), PortError>;

    /// Build the bytecode cross-compiler
    fn mpy_cross(&self) -> Result<(), CompileError>;

    /// Remove the active variant's build output
    fn clean(&self) -> Result<CleanResult, FilesystemError>;

    /// Remove all build output of the port
    fn force_clean(&self, clean_mpy_cross: bool) -> Result<CleanResult, FilesystemError>;

    /// Make sure required source checkouts exist
    fn submodules(&self) -> Result<(), CompileError>;

    /// Add the commands that build the bundled SDL library
    fn build_sdl(&self, addl_commands: &mut Vec<BuildCommand>);
}

/// Ports the CLI can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PortKind {
    /// Reference port for Linux and other Unix hosts
    Unix,
    /// macOS desktop port
    #[value(name = "macOS", alias = "macos")]
    MacOs,
}

impl PortKind {
    /// Port name as claimed in the configuration
    pub fn name(self) -> &'static str {
        match self {
            PortKind::Unix => defaults::DEFAULT_PORT,
            PortKind::MacOs => defaults::MACOS_PORT,
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
