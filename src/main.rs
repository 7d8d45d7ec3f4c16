//! lvport CLI - build orchestrator for LVGL-enabled MicroPython
//!
//! Entry point for the lvport command-line application.

use clap::Parser;

use lvport::cli::output::display_error;
use lvport::cli::Cli;

fn main() {
    let cli = Cli::parse();
    let output = cli.output_config();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output.log_level().into()),
        )
        .init();

    // Run the command and handle errors
    if let Err(e) = cli.run() {
        display_error(&e);
        std::process::exit(1);
    }
}
