//! Build command implementation
//!
//! Implements `lvport build`: runs the full pipeline for one port.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{open_port, runner, BuildFlags, PortArgs};
use crate::cli::output::OutputConfig;
use crate::core::commands::CommandSet;
use crate::core::pipeline;
use crate::core::port::PipelineContext;

/// Build options
pub struct BuildOptions {
    /// Build inputs
    pub flags: BuildFlags,
    /// Also build mpy-cross
    pub mpy_cross: bool,
    /// Record commands instead of running them
    pub dry_run: bool,
}

#[derive(Serialize)]
struct BuildSummary<'a> {
    port: &'a str,
    variant: &'a str,
    dry_run: bool,
    manifest: &'a Path,
    commands: &'a CommandSet,
}

/// Execute the build command
pub fn execute(
    project_dir: &Path,
    port_args: &PortArgs,
    options: &BuildOptions,
    output: OutputConfig,
) -> Result<()> {
    let (settings, port) = open_port(project_dir, port_args, runner(output, options.dry_run))?;
    let mut request = options.flags.to_request(&settings, project_dir);
    request.mpy_cross = options.mpy_cross;

    let ctx = PipelineContext::new(project_dir);
    let config = port.config();

    let spinner = output.spinner(&format!(
        "Building {} ({})...",
        config.port_name(),
        config.variant()
    ));
    let result = pipeline::run(port.as_ref(), &ctx, &request);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = result.with_context(|| format!("Build of port {} failed", config.port_name()))?;

    let summary = BuildSummary {
        port: config.port_name(),
        variant: config.variant(),
        dry_run: options.dry_run,
        manifest: &report.manifest,
        commands: &report.commands,
    };
    if output.json(&summary)? {
        return Ok(());
    }

    if options.dry_run {
        output.warning("Dry run, commands not executed:");
        for command in &report.commands.commands {
            output.info(&format!("  {command}"));
        }
    }
    output.success(&format!(
        "Built {} ({}), manifest {}",
        config.port_name(),
        config.variant(),
        report.manifest.display()
    ));

    Ok(())
}
