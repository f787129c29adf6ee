//! Go build step
//!
//! Builds the working copy into a single binary inside a fresh temporary
//! directory and verifies the artifact really exists afterwards.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::ports::{FileSystem, ProcessRunner, ToolLocator};
use crate::domain::services::preflight::ensure_tools;
use crate::domain::value_objects::CommandSpec;
use crate::error::{DeployError, DeployResult};

/// Build tool executable
pub const GO: &str = "go";

/// Prefix of the per-run temporary build directory
pub const BUILD_DIR_PREFIX: &str = "go-build-";

/// Parameters of a build, forwarded verbatim to `go build`
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub binary_name: String,
    pub ldflags: String,
    pub extra_args: Vec<String>,
}

impl BuildRequest {
    pub fn new(binary_name: impl Into<String>) -> Self {
        Self {
            binary_name: binary_name.into(),
            ..Self::default()
        }
    }

    pub fn with_ldflags(mut self, ldflags: impl Into<String>) -> Self {
        self.ldflags = ldflags.into();
        self
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// `go build -o <output> [-ldflags <flags>] [extra...]`, run inside `repo`
    pub fn command(&self, repo: &Path, output: &Path) -> CommandSpec {
        let mut cmd = CommandSpec::new(GO)
            .arg("build")
            .arg("-o")
            .arg(output)
            .current_dir(repo);
        if !self.ldflags.is_empty() {
            cmd = cmd.arg("-ldflags").arg(self.ldflags.as_str());
        }
        cmd.args(&self.extra_args)
    }
}

/// Build `repo` and return the path of the produced binary.
///
/// The temporary directory is left in place for the caller.
pub fn build_binary<R, F, L>(
    runner: &R,
    fs: &F,
    locator: &L,
    repo: &Path,
    request: &BuildRequest,
) -> DeployResult<PathBuf>
where
    R: ProcessRunner,
    F: FileSystem,
    L: ToolLocator,
{
    ensure_tools(locator, &[GO])?;

    let build_dir = fs.create_temp_dir(BUILD_DIR_PREFIX)?;
    let output = build_dir.join(&request.binary_name);
    info!(repo = %repo.display(), output = %output.display(), "building");

    runner.run(&request.command(repo, &output))?;

    if !fs.exists(&output) {
        return Err(DeployError::ArtifactMissing { path: output });
    }
    Ok(output)
}
