//! Deploy Use Case
//!
//! Orchestrates one run:
//! 1. Preflight the required tools
//! 2. Make sure the working copy exists (clone if a URL was given)
//! 3. Compare local HEAD with the fetched remote branch
//! 4. Pull when it moved; stop early when it did not (unless forced)
//! 5. Build, install atomically and restart the service
//!
//! Every fatal error aborts the remaining steps. An installed binary is never
//! rolled back, even when the restart fails.

use tracing::{debug, info};

use crate::domain::ports::{
    FileSystem, NoopEventSink, PipelineEvent, PipelineEventSink, ProcessRunner, ToolLocator,
};
use crate::domain::services::{
    build_binary, clone_repository, ensure_tools, install_binary, is_working_copy,
    required_tools, GitRepository, Systemd,
};
use crate::domain::value_objects::UpdateStatus;
use crate::error::{DeployError, DeployResult};

use super::options::RunConfig;
use super::result::DeployOutcome;

/// Deploy use case - orchestrates the deployment flow
///
/// Parameterized by its ports so tests can script every external command.
pub struct DeployUseCase<R, F, L>
where
    R: ProcessRunner,
    F: FileSystem,
    L: ToolLocator,
{
    runner: R,
    file_system: F,
    locator: L,
}

impl<R, F, L> DeployUseCase<R, F, L>
where
    R: ProcessRunner,
    F: FileSystem,
    L: ToolLocator,
{
    pub fn new(runner: R, file_system: F, locator: L) -> Self {
        Self {
            runner,
            file_system,
            locator,
        }
    }

    /// Execute the deploy use case silently
    pub fn execute(&self, config: &RunConfig) -> DeployResult<DeployOutcome> {
        self.execute_with_events(config, &NoopEventSink)
    }

    /// Execute the deploy use case with event reporting
    pub fn execute_with_events(
        &self,
        config: &RunConfig,
        events: &dyn PipelineEventSink,
    ) -> DeployResult<DeployOutcome> {
        ensure_tools(&self.locator, &required_tools(config.scope))?;

        self.ensure_repository(config, events)?;

        let repo = GitRepository::new(&self.runner, &config.repo);
        let local = repo.head()?;
        repo.fetch(&config.remote)?;
        let remote = repo.remote_head(&config.remote, &config.branch)?;

        let status = UpdateStatus::between(&local, &remote);
        debug!(local = %local, remote = %remote, ?status, "compared revisions");

        if status.is_changed() {
            events.on_event(PipelineEvent::UpstreamAdvanced {
                remote: config.remote.clone(),
                branch: config.branch.clone(),
                from: local.clone(),
                to: remote,
            });
            repo.pull(&config.remote, &config.branch)?;
        } else {
            events.on_event(PipelineEvent::UpToDate {
                remote: config.remote.clone(),
                branch: config.branch.clone(),
                forced: config.always_build,
            });
            if !config.always_build {
                info!(head = %local, "no upstream changes; nothing to do");
                return Ok(DeployOutcome::UpToDate { head: local });
            }
        }

        events.on_event(PipelineEvent::Building {
            repo: config.repo.clone(),
        });
        let artifact = build_binary(
            &self.runner,
            &self.file_system,
            &self.locator,
            &config.repo,
            &config.build_request(),
        )?;
        events.on_event(PipelineEvent::Built {
            artifact: artifact.clone(),
        });

        let installed = install_binary(
            &self.file_system,
            &artifact,
            &config.work_dir,
            &config.binary_name,
        )?;
        events.on_event(PipelineEvent::Deployed {
            path: installed.path.clone(),
            digest: installed.digest.clone(),
        });

        events.on_event(PipelineEvent::Restarting {
            service: config.service.clone(),
            scope: config.scope,
        });
        let supervisor = Systemd::new(config.scope);
        if let Some(report) = supervisor.restart(&self.runner, &config.service)? {
            let output = status_text(&report.stdout, &report.stderr);
            if !output.is_empty() {
                events.on_event(PipelineEvent::ServiceStatus { output });
            }
        }

        let head = match repo.head() {
            Ok(head) => Some(head),
            Err(err) => {
                debug!(error = %err, "could not read HEAD after deploy");
                None
            }
        };
        events.on_event(PipelineEvent::Finished { head: head.clone() });

        Ok(DeployOutcome::Deployed {
            previous: local,
            head,
            binary: installed.path,
            digest: installed.digest,
            forced: !status.is_changed(),
        })
    }

    fn ensure_repository(
        &self,
        config: &RunConfig,
        events: &dyn PipelineEventSink,
    ) -> DeployResult<()> {
        if is_working_copy(&self.file_system, &config.repo) {
            return Ok(());
        }
        let Some(url) = config.url.as_deref() else {
            return Err(DeployError::RepositoryMissing {
                path: config.repo.clone(),
            });
        };
        events.on_event(PipelineEvent::Cloning {
            url: url.to_string(),
            branch: config.branch.clone(),
            path: config.repo.clone(),
        });
        clone_repository(
            &self.runner,
            &self.file_system,
            url,
            &config.branch,
            &config.remote,
            &config.repo,
        )
    }
}

/// systemctl prints status on stdout; keep stderr too when present
fn status_text(stdout: &str, stderr: &str) -> String {
    let stdout = stdout.trim_end();
    let stderr = stderr.trim_end();
    match (stdout.is_empty(), stderr.is_empty()) {
        (_, true) => stdout.to_string(),
        (true, false) => stderr.to_string(),
        (false, false) => format!("{stdout}\n{stderr}"),
    }
}
