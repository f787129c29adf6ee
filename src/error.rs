//! Error types for Redeploy
//!
//! Uses `thiserror` for library errors. Every fatal condition of a run maps to
//! exactly one variant; the binary converts the variant into an exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for Redeploy operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for Redeploy operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// A required executable is not on `PATH`
    #[error("'{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    /// Working copy is absent and no clone URL was supplied
    #[error("repository not found at {path}; provide --url to clone it")]
    RepositoryMissing { path: PathBuf },

    /// `rev-parse HEAD` failed inside the working copy
    #[error("unable to determine local HEAD in {path}; is this a valid git repository?")]
    NotARepository { path: PathBuf },

    /// The remote-tracking branch does not resolve after fetching
    #[error("remote branch {remote}/{branch} not found")]
    RemoteBranchNotFound { remote: String, branch: String },

    /// An external command exited unsuccessfully
    #[error("command failed with exit code {}: {command}", display_code(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// An external command could not be started at all
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The build tool reported success but produced nothing
    #[error("build succeeded but output binary not found at {path}")]
    ArtifactMissing { path: PathBuf },

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Home directory could not be determined for the default work dir
    #[error("could not determine user home directory; pass --work-dir explicitly")]
    HomeDirUnavailable,
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl DeployError {
    /// Process exit code for a run that ended with this error.
    ///
    /// A failed external command propagates its own code; every other failure
    /// exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
