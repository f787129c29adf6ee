//! Git working copy operations
//!
//! Thin wrappers around `git` subcommands run through the `ProcessRunner`
//! port. Each method is one (or, for pull, at most two) invocations.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::ports::{FileSystem, ProcessRunner};
use crate::domain::services::preflight::GIT;
use crate::domain::value_objects::{CommandSpec, Revision};
use crate::error::{DeployError, DeployResult};

/// A local working copy
pub struct GitRepository<'a, R: ProcessRunner> {
    runner: &'a R,
    path: PathBuf,
}

impl<'a, R: ProcessRunner> GitRepository<'a, R> {
    pub fn new(runner: &'a R, path: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            path: path.into(),
        }
    }

    fn git(&self) -> CommandSpec {
        CommandSpec::new(GIT).current_dir(&self.path)
    }

    /// Current local HEAD
    pub fn head(&self) -> DeployResult<Revision> {
        let output = self
            .runner
            .run(&self.git().args(["rev-parse", "HEAD"]))
            .map_err(|err| match err {
                DeployError::CommandFailed { .. } => DeployError::NotARepository {
                    path: self.path.clone(),
                },
                other => other,
            })?;
        Ok(Revision::new(output.stdout))
    }

    /// Refresh remote-tracking refs, pruning stale ones
    pub fn fetch(&self, remote: &str) -> DeployResult<()> {
        self.runner
            .run(&self.git().args(["fetch", "--prune", remote]))?;
        Ok(())
    }

    /// Head of `<remote>/<branch>` as last fetched
    pub fn remote_head(&self, remote: &str, branch: &str) -> DeployResult<Revision> {
        let output = self
            .runner
            .run(
                &self
                    .git()
                    .arg("rev-parse")
                    .arg(format!("{remote}/{branch}")),
            )
            .map_err(|err| match err {
                DeployError::CommandFailed { .. } => DeployError::RemoteBranchNotFound {
                    remote: remote.to_string(),
                    branch: branch.to_string(),
                },
                other => other,
            })?;
        Ok(Revision::new(output.stdout))
    }

    /// Advance the working copy to the remote branch.
    ///
    /// Tries a fast-forward first and falls back once to a plain pull, which
    /// may create a merge commit or leave conflicts behind.
    pub fn pull(&self, remote: &str, branch: &str) -> DeployResult<()> {
        let fast_forward = self.git().args(["pull", "--ff-only", remote, branch]);
        match self.runner.run(&fast_forward) {
            Ok(_) => Ok(()),
            Err(DeployError::CommandFailed { stderr, .. }) => {
                warn!(
                    remote,
                    branch,
                    stderr = stderr.trim(),
                    "fast-forward pull rejected; falling back to a merging pull"
                );
                self.runner
                    .run(&self.git().args(["pull", remote, branch]))?;
                Ok(())
            }
            Err(other) => Err(other),
        }
    }
}

/// True when `path` exists and holds git metadata
pub fn is_working_copy<F: FileSystem>(fs: &F, path: &Path) -> bool {
    fs.exists(path) && fs.exists(&path.join(".git"))
}

/// Clone `url` into `path`, checking out `branch` and naming the remote `remote`
pub fn clone_repository<R: ProcessRunner, F: FileSystem>(
    runner: &R,
    fs: &F,
    url: &str,
    branch: &str,
    remote: &str,
    path: &Path,
) -> DeployResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent)?;
    }
    info!(url, branch, path = %path.display(), "cloning repository");
    let clone = CommandSpec::new(GIT)
        .args(["clone", "--branch", branch, "--origin", remote, url])
        .arg(path);
    runner.run(&clone)?;
    Ok(())
}
