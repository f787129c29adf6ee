//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod command;
mod revision;
mod scope;

pub use command::CommandSpec;
pub use revision::{Revision, UpdateStatus};
pub use scope::SupervisorScope;
