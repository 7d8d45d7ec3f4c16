//! lvport - build orchestrator for LVGL-enabled MicroPython runtimes
//!
//! Drives the MicroPython native build for one port at a time. The unix port
//! defines every build step; platform ports reuse it and replace only the
//! steps that differ.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Pipeline steps, ports and configuration
//! - [`infra`] - Infrastructure layer (processes, filesystem, artifact copies)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
