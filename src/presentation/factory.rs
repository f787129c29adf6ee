//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::DeployUseCase;
use crate::infrastructure::{LocalFs, PathToolLocator, SystemProcessRunner};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<SystemProcessRunner, LocalFs, PathToolLocator>;

/// Create a deploy use case backed by real processes, disk and `PATH`
pub fn create_deploy_use_case() -> ConcreteDeployUseCase {
    DeployUseCase::new(SystemProcessRunner::new(), LocalFs::new(), PathToolLocator)
}
