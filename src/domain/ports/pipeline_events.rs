//! Pipeline Event Port
//!
//! Provides an observable interface for a deploy run.
//! Enables console progress, NDJSON event streams, and silent test runs.

use std::path::PathBuf;

use crate::domain::value_objects::{Revision, SupervisorScope};

/// Event emitted during a deploy run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// Working copy is missing and is being cloned
    Cloning {
        url: String,
        branch: String,
        path: PathBuf,
    },

    /// Remote branch moved; pulling
    UpstreamAdvanced {
        remote: String,
        branch: String,
        from: Revision,
        to: Revision,
    },

    /// Remote branch did not move
    UpToDate {
        remote: String,
        branch: String,
        forced: bool,
    },

    /// Build started
    Building { repo: PathBuf },

    /// Build produced the artifact
    Built { artifact: PathBuf },

    /// New binary is in place
    Deployed { path: PathBuf, digest: String },

    /// Supervisor reload/restart started
    Restarting {
        service: String,
        scope: SupervisorScope,
    },

    /// Output of the status query (diagnostic only)
    ServiceStatus { output: String },

    /// Run completed; `head` is the best-effort post-run HEAD
    Finished { head: Option<Revision> },
}

/// Trait for receiving pipeline events
///
/// Implementations:
/// - ConsoleEventSink: human-readable progress on stdout
/// - JsonEventSink: NDJSON event stream for automation
/// - NoopEventSink: silent operation
pub trait PipelineEventSink {
    /// Handle a pipeline event
    fn on_event(&self, event: PipelineEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PipelineEventSink for NoopEventSink {
    fn on_event(&self, _event: PipelineEvent) {}
}
