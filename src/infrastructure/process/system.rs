//! Process runner backed by `std::process::Command`

use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::ports::{CommandOutput, ProcessRunner};
use crate::domain::value_objects::CommandSpec;
use crate::error::{DeployError, DeployResult};

/// Runs commands as blocking child processes, capturing stdout and stderr.
///
/// No timeout is applied; a hung child blocks the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn execute(&self, spec: &CommandSpec) -> DeployResult<CommandOutput> {
        debug!(
            program = spec.program(),
            args = ?spec.get_args(),
            cwd = ?spec.cwd(),
            "running command"
        );

        let mut command = Command::new(spec.program());
        command
            .args(spec.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = spec.cwd() {
            command.current_dir(cwd);
        }

        let output = command.output().map_err(|source| DeployError::Spawn {
            command: spec.to_string(),
            source,
        })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(command = %spec, code = ?result.code, "command finished");
        Ok(result)
    }
}
