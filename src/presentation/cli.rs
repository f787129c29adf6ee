//! Command-line interface

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::application::deploy::{RunConfig, DEFAULT_BRANCH, DEFAULT_REMOTE};
use crate::config::FileConfig;
use crate::domain::value_objects::SupervisorScope;
use crate::error::{DeployError, DeployResult};

/// Subdirectory of the home directory used when no work dir is configured
const DEFAULT_WORK_SUBDIR: &str = "work";

/// Redeploy - pull, build, swap and restart a Go service when its branch moves
#[derive(Parser, Debug)]
#[command(name = "redeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the git working copy
    #[arg(long, value_name = "PATH")]
    pub repo: PathBuf,

    /// Git URL (required if the working copy is missing)
    #[arg(long)]
    pub url: Option<String>,

    /// Branch to track [default: main]
    #[arg(long)]
    pub branch: Option<String>,

    /// Remote name [default: origin]
    #[arg(long)]
    pub remote: Option<String>,

    /// systemd unit name, e.g. myapp.service
    #[arg(long)]
    pub service: String,

    /// Name of the output binary (and file in the work dir)
    #[arg(long)]
    pub binary_name: String,

    /// Destination directory [default: ~/work]
    #[arg(long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Use systemctl --user for a user service
    #[arg(long)]
    pub user_service: bool,

    /// Run systemctl with sudo (system services only)
    #[arg(long)]
    pub use_sudo: bool,

    /// Build/deploy/restart even if no upstream changes are detected
    #[arg(long)]
    pub always_build: bool,

    /// go build -ldflags string
    #[arg(long, allow_hyphen_values = true)]
    pub ldflags: Option<String>,

    /// Extra argument passed to go build (repeatable)
    #[arg(long = "extra-build-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub extra_build_args: Vec<String>,

    /// Config file [default: ~/.config/redeploy/config.toml if present]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for CI
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter directive used when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Merge flags over the file/env layer into the immutable run configuration.
    ///
    /// `home` feeds the default work dir; `cwd` anchors a relative `--repo`.
    pub fn into_run_config(
        self,
        file: FileConfig,
        home: Option<PathBuf>,
        cwd: &Path,
    ) -> DeployResult<RunConfig> {
        let repo = if self.repo.is_absolute() {
            self.repo
        } else {
            cwd.join(self.repo)
        };

        let work_dir = match self.work_dir.or(file.work_dir) {
            Some(dir) => dir,
            None => home
                .map(|h| h.join(DEFAULT_WORK_SUBDIR))
                .ok_or(DeployError::HomeDirUnavailable)?,
        };

        let user_service = self.user_service || file.user_service.unwrap_or(false);
        let use_sudo = self.use_sudo || file.use_sudo.unwrap_or(false);
        let always_build = self.always_build || file.always_build.unwrap_or(false);

        let extra_build_args = if self.extra_build_args.is_empty() {
            file.extra_build_args.unwrap_or_default()
        } else {
            self.extra_build_args
        };

        let mut config = RunConfig::new(repo, self.service, self.binary_name, work_dir)
            .with_branch(
                self.branch
                    .or(file.branch)
                    .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            )
            .with_remote(
                self.remote
                    .or(file.remote)
                    .unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
            )
            .with_scope(SupervisorScope::from_flags(user_service, use_sudo))
            .with_always_build(always_build)
            .with_ldflags(self.ldflags.or(file.ldflags).unwrap_or_default())
            .with_extra_build_args(extra_build_args);
        if let Some(url) = self.url.or(file.url) {
            config = config.with_url(url);
        }
        Ok(config)
    }
}
