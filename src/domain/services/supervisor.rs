//! systemd supervisor control
//!
//! Reloads unit definitions, restarts the unit and queries its status. The
//! status query is diagnostic only and never fails the run.

use tracing::{info, warn};

use crate::domain::ports::{CommandOutput, ProcessRunner};
use crate::domain::services::preflight::{SUDO, SYSTEMCTL};
use crate::domain::value_objects::{CommandSpec, SupervisorScope};
use crate::error::DeployResult;

/// `systemctl` bound to one scope
#[derive(Debug, Clone, Copy)]
pub struct Systemd {
    scope: SupervisorScope,
}

impl Systemd {
    pub fn new(scope: SupervisorScope) -> Self {
        Self { scope }
    }

    /// `[sudo] systemctl [--user] <args...>`
    pub fn command<'s>(&self, args: impl IntoIterator<Item = &'s str>) -> CommandSpec {
        let base = match self.scope {
            SupervisorScope::User => CommandSpec::new(SYSTEMCTL).arg("--user"),
            SupervisorScope::System { sudo: true } => CommandSpec::new(SUDO).arg(SYSTEMCTL),
            SupervisorScope::System { sudo: false } => CommandSpec::new(SYSTEMCTL),
        };
        base.args(args)
    }

    /// daemon-reload, restart, then a best-effort status query.
    ///
    /// Returns the status output, or `None` if the query could not run at all.
    pub fn restart<R: ProcessRunner>(
        &self,
        runner: &R,
        service: &str,
    ) -> DeployResult<Option<CommandOutput>> {
        info!(service, scope = %self.scope, "restarting service");
        runner.run(&self.command(["daemon-reload"]))?;
        runner.run(&self.command(["restart", service]))?;

        let status = self
            .command(["status", service, "--no-pager"])
            .unchecked();
        match runner.run(&status) {
            Ok(output) => {
                if !output.success() {
                    warn!(service, code = ?output.code, "status query reported failure");
                }
                Ok(Some(output))
            }
            Err(err) => {
                warn!(service, error = %err, "status query could not run");
                Ok(None)
            }
        }
    }
}
