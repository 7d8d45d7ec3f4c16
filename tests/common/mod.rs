//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use lvport::core::commands::BuildCommand;
use lvport::error::CompileError;
use lvport::infra::runner::CommandRunner;
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a project with a MicroPython unix port checkout in place
    pub fn with_port_tree() -> Self {
        let project = Self::new();
        project.create_file("lib/micropython/ports/unix/Makefile", "# unix port\n");
        project.create_file("lib/micropython/mpy-cross/Makefile", "# mpy-cross\n");
        project.create_file("lib/lvgl/lvgl.h", "");
        project.create_file("lib/SDL/CMakeLists.txt", "");
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run the lvport binary in the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_lvport"));
        cmd.current_dir(self.path());
        cmd.env_remove("LVPORT_DIR");
        cmd.env_remove("RUST_LOG");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute lvport")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Stand-in for the native build system
///
/// Records every command. When `make` runs against a port directory it
/// writes the configured output files, the way a real build would.
#[derive(Default)]
pub struct FakeBuildSystem {
    /// Files written on each `make -C <port dir>` run
    pub outputs: Vec<(PathBuf, Vec<u8>)>,
    /// Program whose invocation fails
    pub fail_on: Option<String>,
    executed: RefCell<Vec<BuildCommand>>,
}

impl FakeBuildSystem {
    /// Fake that produces nothing and never fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce `path` with `contents` when the firmware make runs
    pub fn producing(mut self, path: &Path, contents: &[u8]) -> Self {
        self.outputs.push((path.to_path_buf(), contents.to_vec()));
        self
    }

    /// Fail when `program` is run
    pub fn failing_on(mut self, program: &str) -> Self {
        self.fail_on = Some(program.to_string());
        self
    }

    /// Commands run so far
    pub fn commands(&self) -> Vec<BuildCommand> {
        self.executed.borrow().clone()
    }
}

impl CommandRunner for FakeBuildSystem {
    fn run(&self, command: &BuildCommand) -> Result<(), CompileError> {
        self.executed.borrow_mut().push(command.clone());

        if self.fail_on.as_deref() == Some(command.program.as_str()) {
            return Err(CompileError::CommandFailed {
                command: command.to_string(),
                code: Some(2),
                stderr: "fake failure".to_string(),
            });
        }

        let is_port_make = command.program == "make"
            && command
                .args
                .get(1)
                .is_some_and(|dir| dir.ends_with("ports/unix"));
        if is_port_make {
            for (path, contents) in &self.outputs {
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, contents).unwrap();
            }
        }
        Ok(())
    }
}
