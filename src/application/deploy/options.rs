//! Deploy Options
//!
//! The immutable configuration of one run.

use std::path::PathBuf;

use crate::domain::services::BuildRequest;
use crate::domain::value_objects::SupervisorScope;

/// Default branch to track
pub const DEFAULT_BRANCH: &str = "main";
/// Default remote name
pub const DEFAULT_REMOTE: &str = "origin";

/// Fully resolved options for the deploy use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Local working copy
    pub repo: PathBuf,
    /// Clone source, only consulted when `repo` is not a working copy yet
    pub url: Option<String>,
    pub branch: String,
    pub remote: String,
    /// Supervisor unit name
    pub service: String,
    /// File name of the deployed binary inside `work_dir`
    pub binary_name: String,
    /// Destination directory of the deployed binary
    pub work_dir: PathBuf,
    pub scope: SupervisorScope,
    /// Build, deploy and restart even without upstream changes
    pub always_build: bool,
    /// Forwarded to `go build -ldflags` when non-empty
    pub ldflags: String,
    /// Forwarded verbatim after the other build arguments
    pub extra_build_args: Vec<String>,
}

impl RunConfig {
    pub fn new(
        repo: impl Into<PathBuf>,
        service: impl Into<String>,
        binary_name: impl Into<String>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repo: repo.into(),
            url: None,
            branch: DEFAULT_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            service: service.into(),
            binary_name: binary_name.into(),
            work_dir: work_dir.into(),
            scope: SupervisorScope::default(),
            always_build: false,
            ldflags: String::new(),
            extra_build_args: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn with_scope(mut self, scope: SupervisorScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_always_build(mut self, always_build: bool) -> Self {
        self.always_build = always_build;
        self
    }

    pub fn with_ldflags(mut self, ldflags: impl Into<String>) -> Self {
        self.ldflags = ldflags.into();
        self
    }

    pub fn with_extra_build_args(mut self, args: Vec<String>) -> Self {
        self.extra_build_args = args;
        self
    }

    /// Build parameters derived from this configuration
    pub fn build_request(&self) -> BuildRequest {
        BuildRequest::new(self.binary_name.as_str())
            .with_ldflags(self.ldflags.as_str())
            .with_extra_args(self.extra_build_args.clone())
    }
}
