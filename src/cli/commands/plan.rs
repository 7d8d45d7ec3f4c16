//! Plan command implementation
//!
//! Implements `lvport plan`: parses arguments and prints the command set
//! without running the native build. Opening the port still creates its
//! `micropy_updates/originals/<port>` directory.

use std::path::Path;

use anyhow::Result;

use super::{open_port, runner, BuildFlags, PortArgs};
use crate::cli::output::OutputConfig;
use crate::core::pipeline;
use crate::core::port::PipelineContext;

/// Execute the plan command
pub fn execute(
    project_dir: &Path,
    port_args: &PortArgs,
    flags: &BuildFlags,
    output: OutputConfig,
) -> Result<()> {
    let (settings, port) = open_port(project_dir, port_args, runner(output, true))?;
    let request = flags.to_request(&settings, project_dir);
    let ctx = PipelineContext::new(project_dir);

    let (_args, commands) = pipeline::plan(port.as_ref(), &ctx, &request)?;

    if output.json(&commands)? {
        return Ok(());
    }

    if !output.quiet {
        for command in &commands.commands {
            println!("{command}");
        }
    }
    Ok(())
}
