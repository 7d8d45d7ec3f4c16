//! Pipeline driver
//!
//! Runs the steps of a [`BuildPort`] in their fixed order:
//!
//! submodules -> preflight -> parse_args -> build_commands
//! -> build_manifest -> [mpy_cross] -> compile
//!
//! Nothing is retried; the first failing step ends the run.

use std::path::PathBuf;

use crate::core::args::BuildArgs;
use crate::core::commands::CommandSet;
use crate::core::port::{BuildPort, PipelineContext};
use crate::error::{PortError, PreconditionError};

/// Inputs for one build
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Raw make tokens
    pub extra_args: Vec<String>,
    /// LVGL compiler flags
    pub lv_cflags: String,
    /// Board identifier
    pub board: Option<String>,
    /// Freeze the LVGL API drivers
    pub lvgl_api: bool,
    /// Display drivers
    pub displays: Vec<String>,
    /// Input drivers
    pub indevs: Vec<String>,
    /// Baseline manifest to merge with
    pub frozen_manifest: Option<PathBuf>,
    /// Also build mpy-cross before compiling
    pub mpy_cross: bool,
}

/// What a completed build produced
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Parsed arguments
    pub args: BuildArgs,
    /// Commands that were compiled
    pub commands: CommandSet,
    /// Manifest written for the build
    pub manifest: PathBuf,
}

/// Check the native port tree is present
///
/// Read-only. Ports that skip `submodules` rely on another port having
/// checked the sources out; this turns a missing tree into a clear error
/// instead of a make failure.
pub fn preflight<P: BuildPort + ?Sized>(port: &P) -> Result<(), PreconditionError> {
    let port_dir = port.config().port_dir();
    if port_dir.is_dir() {
        return Ok(());
    }
    Err(PreconditionError::SourceTreeMissing {
        path: port_dir,
        port: port.config().port_name().to_string(),
    })
}

/// Parse arguments and assemble commands without running anything
pub fn plan<P: BuildPort + ?Sized>(
    port: &P,
    ctx: &PipelineContext,
    request: &BuildRequest,
) -> Result<(BuildArgs, CommandSet), PortError> {
    let args = port.parse_args(&request.extra_args, &request.lv_cflags, request.board.as_deref())?;
    let commands = port.build_commands(ctx, &args);
    Ok((args, commands))
}

/// Run the full pipeline
pub fn run<P: BuildPort + ?Sized>(
    port: &P,
    ctx: &PipelineContext,
    request: &BuildRequest,
) -> Result<BuildReport, PortError> {
    let config = port.config();
    tracing::info!(
        "Building port {} (variant {})",
        config.port_name(),
        config.variant()
    );

    port.submodules()?;
    preflight(port)?;

    let (args, commands) = plan(port, ctx, request)?;
    tracing::debug!("Planned {} commands", commands.len());

    let manifest = port.build_manifest(
        ctx,
        request.lvgl_api,
        &request.displays,
        &request.indevs,
        request.frozen_manifest.as_deref(),
    )?;

    if request.mpy_cross {
        port.mpy_cross()?;
    }

    port.compile(&commands)?;

    Ok(BuildReport {
        args,
        commands,
        manifest,
    })
}
