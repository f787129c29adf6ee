//! Domain Layer
//!
//! The deployment vocabulary of Redeploy, free of direct process or disk access.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (Revision, CommandSpec, SupervisorScope)
//! - `services/` - Step logic (preflight, git, build, install, supervisor)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Every external effect goes through a port
//! 2. **Ports & Adapters** - Tests swap the real runner and file system for mocks

pub mod ports;
pub mod services;
pub mod value_objects;
