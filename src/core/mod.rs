//! Core build logic
//!
//! The pipeline steps and the ports that implement them. Process spawning
//! and file copies go through [`crate::infra`].
//!
//! # Submodules
//!
//! - [`build_config`] - Port identity, variant and path layout
//! - [`args`] - Build argument parsing
//! - [`commands`] - Command sets handed to the native build
//! - [`manifest`] - Frozen-module manifest generation and merging
//! - [`clean`] - Build output removal
//! - [`port`] - The pipeline trait, the unix reference port and specializations
//! - [`pipeline`] - Step ordering for a full build
//! - [`settings`] - `lvport.toml` project settings

pub mod args;
pub mod build_config;
pub mod clean;
pub mod commands;
pub mod manifest;
pub mod pipeline;
pub mod port;
pub mod settings;
