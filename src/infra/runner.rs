//! External build system invocation
//!
//! [`CommandRunner`] is the seam between the pipeline and the native build
//! tools. [`SystemRunner`] spawns real processes; [`DryRunRunner`] only
//! records what would have run.

use std::cell::RefCell;
use std::process::Command;

use crate::core::commands::BuildCommand;
use crate::error::CompileError;

/// Runs build commands to completion
pub trait CommandRunner {
    /// Run one command, blocking until it exits
    fn run(&self, command: &BuildCommand) -> Result<(), CompileError>;

    /// Whether commands actually execute and produce outputs
    fn executes(&self) -> bool {
        true
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, command: &BuildCommand) -> Result<(), CompileError> {
        (**self).run(command)
    }

    fn executes(&self) -> bool {
        (**self).executes()
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &BuildCommand) -> Result<(), CompileError> {
        (**self).run(command)
    }

    fn executes(&self) -> bool {
        (**self).executes()
    }
}

/// Lines of stderr kept in a [`CompileError::CommandFailed`]
const STDERR_TAIL_LINES: usize = 40;

/// Spawns commands with `std::process::Command`
///
/// Streaming runners inherit stdout/stderr so native build logs reach the
/// terminal; capturing runners collect them and keep the tail of stderr for
/// error reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner {
    capture: bool,
}

impl SystemRunner {
    /// Runner that streams native output
    pub fn streaming() -> Self {
        Self { capture: false }
    }

    /// Runner that captures native output
    pub fn captured() -> Self {
        Self { capture: true }
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &BuildCommand) -> Result<(), CompileError> {
        let program = which::which(&command.program).map_err(|_| CompileError::ToolNotFound {
            program: command.program.clone(),
        })?;

        tracing::debug!("Running: {command}");

        let mut cmd = Command::new(program);
        cmd.args(&command.args).envs(&command.env);
        if let Some(ref cwd) = command.cwd {
            cmd.current_dir(cwd);
        }

        let spawn_err = |e: std::io::Error| CompileError::Spawn {
            command: command.to_string(),
            error: e.to_string(),
        };

        let (status, stderr) = if self.capture {
            let output = cmd.output().map_err(spawn_err)?;
            (output.status, stderr_tail(&output.stderr))
        } else {
            (cmd.status().map_err(spawn_err)?, String::new())
        };

        if !status.success() {
            return Err(CompileError::CommandFailed {
                command: command.to_string(),
                code: status.code(),
                stderr,
            });
        }

        Ok(())
    }
}

/// Records commands instead of running them
#[derive(Debug, Default)]
pub struct DryRunRunner {
    executed: RefCell<Vec<BuildCommand>>,
}

impl DryRunRunner {
    /// Create an empty dry-run runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far
    pub fn commands(&self) -> Vec<BuildCommand> {
        self.executed.borrow().clone()
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, command: &BuildCommand) -> Result<(), CompileError> {
        tracing::info!("[dry-run] {command}");
        self.executed.borrow_mut().push(command.clone());
        Ok(())
    }

    fn executes(&self) -> bool {
        false
    }
}
