//! Redeploy - pull, build, swap and restart a single service
//!
//! Redeploy checks whether a remote git branch has moved, rebuilds a Go binary
//! from the working copy when it has, installs the binary with an atomic
//! rename, and restarts the systemd unit that runs it.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeployOutcome, DeployUseCase, RunConfig};
pub use config::FileConfig;
pub use domain::value_objects::{CommandSpec, Revision, SupervisorScope, UpdateStatus};
pub use error::{DeployError, DeployResult};
