//! Infrastructure layer
//!
//! Process spawning, directory handling and artifact copies.

pub mod artifact;
pub mod filesystem;
pub mod runner;
