//! Domain Services
//!
//! One module per pipeline step. Every service talks to the outside world
//! only through the ports it is handed.

pub mod build;
pub mod git;
pub mod install;
pub mod preflight;
pub mod supervisor;

#[cfg(test)]
pub(crate) mod testing;

pub use build::{build_binary, BuildRequest};
pub use git::{clone_repository, is_working_copy, GitRepository};
pub use install::{install_binary, staging_path, InstalledBinary};
pub use preflight::{ensure_tools, required_tools};
pub use supervisor::Systemd;
