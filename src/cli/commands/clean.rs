//! CLI implementation for `lvport clean` command
//!
//! This module handles the CLI interface for cleaning build artifacts.

use std::path::Path;

use anyhow::{Context, Result};

use super::{open_port, runner, PortArgs};
use crate::cli::output::OutputConfig;

/// Execute the clean command
pub fn execute(
    project_dir: &Path,
    port_args: &PortArgs,
    force: bool,
    mpy_cross: bool,
    output: OutputConfig,
) -> Result<()> {
    let (_settings, port) = open_port(project_dir, port_args, runner(output, true))?;

    let result = if force {
        port.force_clean(mpy_cross)
    } else {
        port.clean()
    }
    .with_context(|| "Failed to clean build artifacts")?;

    if output.json(&serde_json::json!({
        "removed": result.removed,
        "skipped": result.skipped,
    }))? {
        return Ok(());
    }

    // Report what was cleaned
    if result.removed.is_empty() {
        output.success("Nothing to clean");
    } else {
        output.success("Cleaned build artifacts:");
        for dir in &result.removed {
            output.info(&format!("  Removed {}", dir.display()));
        }
    }

    Ok(())
}
