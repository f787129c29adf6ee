//! Event Sink Implementations
//!
//! Provides concrete implementations of PipelineEventSink:
//! - ConsoleEventSink: Human-readable progress
//! - JsonEventSink: NDJSON output for CI/automation

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::JsonEventSink;
