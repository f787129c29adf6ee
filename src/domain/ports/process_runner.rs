//! ProcessRunner port - abstraction over external-process invocation
//!
//! Every git, go, systemctl and sudo call goes through this trait so the
//! deploy use case can be exercised against scripted results.

use crate::domain::value_objects::CommandSpec;
use crate::error::{DeployError, DeployResult};

/// Captured outcome of one external command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code (`None` if the process was killed by a signal)
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands
pub trait ProcessRunner {
    /// Run the command to completion and capture its output.
    ///
    /// Only failure to start the process is an error here; a non-zero exit is
    /// reported through `CommandOutput::code`.
    fn execute(&self, command: &CommandSpec) -> DeployResult<CommandOutput>;

    /// Run the command, honoring its required-success flag.
    fn run(&self, command: &CommandSpec) -> DeployResult<CommandOutput> {
        let output = self.execute(command)?;
        if command.is_checked() && !output.success() {
            return Err(DeployError::CommandFailed {
                command: command.to_string(),
                code: output.code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }
        Ok(output)
    }
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for &T {
    fn execute(&self, command: &CommandSpec) -> DeployResult<CommandOutput> {
        (**self).execute(command)
    }
}
