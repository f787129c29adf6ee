//! Deploy Module
//!
//! Orchestrates one pull-build-swap-restart cycle.
//!
//! ## Structure
//!
//! - `options` - Resolved run configuration (`RunConfig`)
//! - `result` - Outcome of a successful run (`DeployOutcome`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use redeploy::application::deploy::{DeployUseCase, RunConfig};
//!
//! let use_case = DeployUseCase::new(runner, fs, locator);
//! let outcome = use_case.execute(&RunConfig::new(repo, "app.service", "app", work_dir), &sink)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{RunConfig, DEFAULT_BRANCH, DEFAULT_REMOTE};
pub use result::DeployOutcome;
pub use use_case::DeployUseCase;
