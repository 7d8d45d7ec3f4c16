//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress spinners and
//! status lines, and for choosing between human and JSON output.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// How results are shown to the user
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress status lines
    pub quiet: bool,
    /// Emit JSON on stdout
    pub json: bool,
    /// Verbosity level (0 = warnings, 1 = info, 2+ = debug)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create an output configuration from CLI flags
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Default `tracing` filter directive for the verbosity level
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }

    /// Whether native build output should be captured behind a spinner
    ///
    /// Verbose runs stream native logs; interactive non-verbose runs show a
    /// spinner instead; quiet and JSON runs capture silently.
    pub fn capture_native_output(&self) -> bool {
        self.quiet || self.json || self.verbose == 0
    }

    /// Start a spinner if the terminal is interactive and output is human
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        let interactive = std::io::stderr().is_terminal();
        (interactive && !self.quiet && !self.json && self.verbose == 0)
            .then(|| create_spinner(message))
    }

    /// Print a success line
    pub fn success(&self, message: &str) {
        if !self.quiet && !self.json {
            println!("{} {message}", status::SUCCESS);
        }
    }

    /// Print an informational line
    pub fn info(&self, message: &str) {
        if !self.quiet && !self.json {
            println!("{} {message}", status::INFO);
        }
    }

    /// Print a warning line to stderr
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {message}", status::WARNING);
        }
    }

    /// Print `value` as pretty JSON when JSON output is on
    ///
    /// Returns `true` if something was printed.
    pub fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<bool> {
        if !self.json {
            return Ok(false);
        }
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(true)
    }
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}
