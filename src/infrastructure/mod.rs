//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `process/` - Child-process runner and PATH lookup
//! - `events/` - Console and NDJSON event sinks

pub mod events;
pub mod fs;
pub mod process;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use process::{PathToolLocator, SystemProcessRunner};
