//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (value objects, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - preflight, sync, build, install and restart in one run

pub mod deploy;

pub use deploy::{DeployOutcome, DeployUseCase, RunConfig};
