//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;
pub mod plan;
pub mod tools;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::output::OutputConfig;
use crate::core::pipeline::BuildRequest;
use crate::core::port::macos::MacOsPort;
use crate::core::port::unix::UnixPort;
use crate::core::port::{BuildPort, PortKind};
use crate::core::settings::Settings;
use crate::infra::runner::{CommandRunner, DryRunRunner, SystemRunner};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full build pipeline
    Build {
        #[command(flatten)]
        port: PortArgs,

        #[command(flatten)]
        build: BuildFlags,

        /// Also build mpy-cross before compiling
        #[arg(long)]
        mpy_cross: bool,

        /// Record commands instead of running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the commands a build would run
    Plan {
        #[command(flatten)]
        port: PortArgs,

        #[command(flatten)]
        build: BuildFlags,
    },

    /// Remove build artifacts
    Clean {
        #[command(flatten)]
        port: PortArgs,

        /// Remove every variant's build output
        #[arg(short, long)]
        force: bool,

        /// With --force, also remove the mpy-cross build
        #[arg(long, requires = "force")]
        mpy_cross: bool,
    },

    /// Check out missing source submodules
    Submodules {
        #[command(flatten)]
        port: PortArgs,

        /// Record commands instead of running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Build the bytecode cross-compiler
    MpyCross {
        #[command(flatten)]
        port: PortArgs,

        /// Record commands instead of running them
        #[arg(long)]
        dry_run: bool,
    },
}

/// Port selection shared by every command
#[derive(Args, Debug, Clone)]
pub struct PortArgs {
    /// Target port
    #[arg(value_enum)]
    pub port: PortKind,

    /// Build variant (e.g. standard, debug)
    #[arg(long)]
    pub variant: Option<String>,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Build inputs shared by `build` and `plan`
#[derive(Args, Debug, Clone, Default)]
pub struct BuildFlags {
    /// Board identifier
    #[arg(short, long)]
    pub board: Option<String>,

    /// Extra compiler flags for LVGL
    #[arg(long, allow_hyphen_values = true)]
    pub lv_cflags: Option<String>,

    /// Display driver to freeze (repeatable)
    #[arg(long = "display", value_name = "DRIVER")]
    pub displays: Vec<String>,

    /// Input driver to freeze (repeatable)
    #[arg(long = "indev", value_name = "DRIVER")]
    pub indevs: Vec<String>,

    /// Manifest to merge into the generated one
    #[arg(long, value_name = "PATH")]
    pub frozen_manifest: Option<PathBuf>,

    /// Freeze the Python-level LVGL API drivers
    #[arg(long)]
    pub lvgl_api: bool,

    /// Extra make arguments (after `--`)
    #[arg(last = true)]
    pub extra: Vec<String>,
}

impl BuildFlags {
    /// Merge CLI flags with project settings into a request
    pub fn to_request(&self, settings: &Settings, project_dir: &Path) -> BuildRequest {
        let or_settings = |cli: &[String], file: &[String]| {
            if cli.is_empty() {
                file.to_vec()
            } else {
                cli.to_vec()
            }
        };

        BuildRequest {
            extra_args: self.extra.clone(),
            lv_cflags: self
                .lv_cflags
                .clone()
                .or_else(|| settings.build.lv_cflags.clone())
                .unwrap_or_default(),
            board: self.board.clone().or_else(|| settings.build.board.clone()),
            lvgl_api: self.lvgl_api || settings.manifest.lvgl_api.unwrap_or(false),
            displays: or_settings(&self.displays, &settings.manifest.displays),
            indevs: or_settings(&self.indevs, &settings.manifest.indevs),
            frozen_manifest: self
                .frozen_manifest
                .clone()
                .or_else(|| settings.manifest.frozen_manifest.clone())
                .map(|p| project_dir.join(p)),
            mpy_cross: false,
        }
    }
}

/// Pick the runner for a command
pub fn runner(output: OutputConfig, dry_run: bool) -> Box<dyn CommandRunner> {
    if dry_run {
        Box::new(DryRunRunner::new())
    } else if output.capture_native_output() {
        Box::new(SystemRunner::captured())
    } else {
        Box::new(SystemRunner::streaming())
    }
}

/// Load settings and construct the selected port
pub fn open_port(
    project_dir: &Path,
    args: &PortArgs,
    runner: Box<dyn CommandRunner>,
) -> Result<(Settings, Box<dyn BuildPort>)> {
    let settings = Settings::load(project_dir)?;
    let config = settings.build_config(project_dir, args.variant.as_deref(), args.jobs)?;

    let port: Box<dyn BuildPort> = match args.port {
        PortKind::Unix => Box::new(UnixPort::new(config, runner)?),
        PortKind::MacOs => Box::new(MacOsPort::new(config, runner)?),
    };
    tracing::debug!(
        "Selected port {} (variant {})",
        port.config().port_name(),
        port.config().variant()
    );

    Ok((settings, port))
}

impl Commands {
    /// Execute the command
    pub fn run(self, project_dir: &Path, output: OutputConfig) -> Result<()> {
        let result = match self {
            Self::Build {
                port,
                build,
                mpy_cross,
                dry_run,
            } => {
                let options = build::BuildOptions {
                    flags: build,
                    mpy_cross,
                    dry_run,
                };
                build::execute(project_dir, &port, &options, output)
            }
            Self::Plan { port, build } => plan::execute(project_dir, &port, &build, output),
            Self::Clean {
                port,
                force,
                mpy_cross,
            } => clean::execute(project_dir, &port, force, mpy_cross, output),
            Self::Submodules { port, dry_run } => {
                tools::execute_submodules(project_dir, &port, dry_run, output)
            }
            Self::MpyCross { port, dry_run } => {
                tools::execute_mpy_cross(project_dir, &port, dry_run, output)
            }
        };
        result.with_context(|| format!("lvport failed in {}", project_dir.display()))
    }
}
