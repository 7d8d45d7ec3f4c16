//! Build commands handed to the native build system
//!
//! A [`CommandSet`] is the ordered list of processes the compile step runs.
//! It remembers the port and variant it was assembled for so that it cannot
//! be compiled under a different configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A single shell-invocable command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCommand {
    /// Program to run (e.g. "make", "cmake", "git")
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Working directory, if not the current one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    /// Extra environment variables
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl BuildCommand {
    /// Create a command with no arguments
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add an environment variable
    #[must_use]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Whether any argument equals `arg`
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{key}={} ", shell_quote(value))?;
        }
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Quote a word for POSIX sh if it needs it
fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Ordered commands for one build, tagged with the configuration that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSet {
    /// Port name active when the set was assembled
    pub port_name: String,
    /// Variant active when the set was assembled
    pub variant: String,
    /// Opaque driver context, carried through unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passthrough: Option<String>,
    /// Commands in execution order
    pub commands: Vec<BuildCommand>,
}

impl CommandSet {
    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether there are no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over commands running `program`
    pub fn by_program<'a>(&'a self, program: &'a str) -> impl Iterator<Item = &'a BuildCommand> {
        self.commands.iter().filter(move |c| c.program == program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_when_needed() {
        let cmd = BuildCommand::new("make")
            .arg("-C")
            .arg("lib/micropython/ports/unix")
            .arg("LV_CFLAGS=-DLV_USE_LOG=1 -O2");
        assert_eq!(
            cmd.to_string(),
            "make -C lib/micropython/ports/unix 'LV_CFLAGS=-DLV_USE_LOG=1 -O2'"
        );
    }

    #[test]
    fn test_display_escapes_single_quotes() {
        let cmd = BuildCommand::new("echo").arg("it's");
        assert_eq!(cmd.to_string(), r"echo 'it'\''s'");
    }

    #[test]
    fn test_display_includes_env() {
        let cmd = BuildCommand::new("make").env("CC", "clang");
        assert_eq!(cmd.to_string(), "CC=clang make");
    }

    #[test]
    fn test_has_arg() {
        let cmd = BuildCommand::new("make").args(["VARIANT=standard", "-j4"]);
        assert!(cmd.has_arg("-j4"));
        assert!(!cmd.has_arg("-j8"));
    }

    #[test]
    fn test_command_set_json_shape() {
        let set = CommandSet {
            port_name: "unix".to_string(),
            variant: "standard".to_string(),
            passthrough: None,
            commands: vec![BuildCommand::new("make").arg("all")],
        };
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["port_name"], "unix");
        assert_eq!(json["commands"][0]["program"], "make");
        assert!(json.get("passthrough").is_none());
        assert!(json["commands"][0].get("cwd").is_none());
    }
}
