//! Configuration constants
//!
//! Built-in defaults for paths, port names and artifact names.

pub mod defaults;
