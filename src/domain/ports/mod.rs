//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod pipeline_events;
pub mod process_runner;
pub mod tool_locator;

pub use file_system::{FileSystem, FsError, FsResult};
pub use pipeline_events::{NoopEventSink, PipelineEvent, PipelineEventSink};
pub use process_runner::{CommandOutput, ProcessRunner};
pub use tool_locator::ToolLocator;
