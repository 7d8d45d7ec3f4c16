//! Standalone pipeline steps
//!
//! Implements `lvport submodules` and `lvport mpy-cross`.

use std::path::Path;

use anyhow::{Context, Result};

use super::{open_port, runner, PortArgs};
use crate::cli::output::OutputConfig;

/// Execute the submodules command
pub fn execute_submodules(
    project_dir: &Path,
    port_args: &PortArgs,
    dry_run: bool,
    output: OutputConfig,
) -> Result<()> {
    let (_settings, port) = open_port(project_dir, port_args, runner(output, dry_run))?;

    let spinner = output.spinner("Checking out submodules...");
    let result = port.submodules();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result.with_context(|| "Failed to check out submodules")?;

    output.success(&format!("Submodules ready for {}", port.config().port_name()));
    Ok(())
}

/// Execute the mpy-cross command
pub fn execute_mpy_cross(
    project_dir: &Path,
    port_args: &PortArgs,
    dry_run: bool,
    output: OutputConfig,
) -> Result<()> {
    let (_settings, port) = open_port(project_dir, port_args, runner(output, dry_run))?;

    let spinner = output.spinner("Building mpy-cross...");
    let result = port.mpy_cross();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result.with_context(|| "Failed to build mpy-cross")?;

    output.success("Built mpy-cross");
    Ok(())
}
