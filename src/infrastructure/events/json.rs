//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{PipelineEvent, PipelineEventSink};

/// Event sink that outputs NDJSON events
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON object for one event
pub fn event_json(event: &PipelineEvent) -> serde_json::Value {
    match event {
        PipelineEvent::Cloning { url, branch, path } => serde_json::json!({
            "event": "cloning",
            "url": url,
            "branch": branch,
            "path": path.display().to_string(),
        }),

        PipelineEvent::UpstreamAdvanced {
            remote,
            branch,
            from,
            to,
        } => serde_json::json!({
            "event": "upstream_advanced",
            "remote": remote,
            "branch": branch,
            "from": from.as_str(),
            "to": to.as_str(),
        }),

        PipelineEvent::UpToDate {
            remote,
            branch,
            forced,
        } => serde_json::json!({
            "event": "up_to_date",
            "remote": remote,
            "branch": branch,
            "forced": forced,
        }),

        PipelineEvent::Building { repo } => serde_json::json!({
            "event": "building",
            "repo": repo.display().to_string(),
        }),

        PipelineEvent::Built { artifact } => serde_json::json!({
            "event": "built",
            "artifact": artifact.display().to_string(),
        }),

        PipelineEvent::Deployed { path, digest } => serde_json::json!({
            "event": "deployed",
            "path": path.display().to_string(),
            "digest": digest,
        }),

        PipelineEvent::Restarting { service, scope } => serde_json::json!({
            "event": "restarting",
            "service": service,
            "scope": scope.to_string(),
            "sudo": scope.uses_sudo(),
        }),

        PipelineEvent::ServiceStatus { output } => serde_json::json!({
            "event": "service_status",
            "output": output,
        }),

        PipelineEvent::Finished { head } => serde_json::json!({
            "event": "finished",
            "head": head.as_ref().map(|h| h.as_str()),
        }),
    }
}

impl PipelineEventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        self.write_event(event_json(&event));
    }
}
