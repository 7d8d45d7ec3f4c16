//! Error types for lvport
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Build argument errors raised by `parse_args`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Empty or whitespace-only token
    #[error("Build argument {position} is empty")]
    EmptyToken { position: usize },

    /// `KEY=VALUE` token with a malformed key
    #[error("Invalid build variable '{token}': names must match [A-Z_][A-Z0-9_]*")]
    InvalidVariable { token: String },

    /// Same variable given twice with different values
    #[error("Build variable '{key}' given twice with different values ('{first}' and '{second}')")]
    ConflictingVariable {
        key: String,
        first: String,
        second: String,
    },

    /// Variable the pipeline sets itself
    #[error("Build variable '{key}' is set by the pipeline and cannot be overridden")]
    ReservedVariable { key: String },

    /// VARIANT token disagrees with the configured variant
    #[error("VARIANT={requested} conflicts with the configured variant '{configured}'")]
    VariantMismatch {
        requested: String,
        configured: String,
    },

    /// Variant name that is not a plain directory-safe word
    #[error("Invalid build variant '{variant}': names must match [A-Za-z0-9_-]+")]
    InvalidVariant { variant: String },

    /// BOARD token disagrees with the board parameter
    #[error("BOARD={from_args} conflicts with board '{board}'")]
    BoardMismatch { from_args: String, board: String },
}

/// Manifest generation errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Display or input driver name that cannot be a module name
    #[error("Invalid {kind} driver name '{name}'")]
    InvalidDriverName { kind: &'static str, name: String },

    /// Frozen manifest exists but could not be read
    #[error("Failed to read frozen manifest '{path}': {error}")]
    ReadFrozen { path: PathBuf, error: String },

    /// Manifest could not be written
    #[error("Failed to write manifest '{path}': {error}")]
    Write { path: PathBuf, error: String },
}

/// Failures reported by the native build system
#[derive(Error, Debug)]
pub enum CompileError {
    /// Program not on PATH
    #[error("Build tool '{program}' not found in PATH")]
    ToolNotFound { program: String },

    /// Process could not be started
    #[error("Failed to run '{command}': {error}")]
    Spawn { command: String, error: String },

    /// Process exited unsuccessfully
    #[error("Command failed ({}): {command}\n{stderr}", exit_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"))
}

/// Ordering and identity violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// Port identity claimed twice
    #[error("Port identity already claimed as '{current}', cannot claim '{requested}'")]
    AlreadyClaimed { current: String, requested: String },

    /// Command set built under a different configuration
    #[error(
        "Command set was built for {found_port}/{found_variant}, \
         but the active configuration is {expected_port}/{expected_variant}"
    )]
    StaleCommandSet {
        expected_port: String,
        expected_variant: String,
        found_port: String,
        found_variant: String,
    },

    /// Source checkout expected from a sibling port is absent
    #[error("Source tree '{path}' is missing; port '{port}' expects it to be checked out already")]
    SourceTreeMissing { path: PathBuf, port: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to read directory or file
    #[error("Failed to read '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Project settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read settings file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Failed to parse settings file
    #[error("Failed to parse settings file '{path}': {error}")]
    Parse { path: PathBuf, error: String },
}

/// Top-level lvport error type
#[derive(Error, Debug)]
pub enum PortError {
    /// Argument error
    #[error("Argument error: {0}")]
    Argument(#[from] ArgumentError),

    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Compile error
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Precondition error
    #[error("Precondition error: {0}")]
    Precondition(#[from] PreconditionError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Settings error
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}
