//! Console Event Sink
//!
//! Prints one line per step on stdout. Status output of the service is
//! passed through verbatim.

use std::io::{self, Write};
use std::sync::Mutex;

use is_terminal::IsTerminal;

use crate::domain::ports::{PipelineEvent, PipelineEventSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Icon {
    Progress,
    Success,
    Idle,
}

impl Icon {
    fn render(self, unicode: bool) -> &'static str {
        match (unicode, self) {
            (true, Icon::Progress) => "● ",
            (true, Icon::Success) => "✓ ",
            (true, Icon::Idle) => "○ ",
            (false, _) => "",
        }
    }
}

/// Event sink for humans
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    unicode: bool,
}

impl ConsoleEventSink {
    /// Write to stdout, with icons when stdout is a terminal
    pub fn stdout() -> Self {
        let unicode = io::stdout().is_terminal();
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
            unicode,
        }
    }

    /// Write to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W, unicode: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            unicode,
        }
    }

    fn line(&self, icon: Option<Icon>, message: &str) {
        let prefix = icon.map(|i| i.render(self.unicode)).unwrap_or("");
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{prefix}{message}");
            let _ = writer.flush();
        }
    }

    fn arrow(&self) -> &'static str {
        if self.unicode {
            "→"
        } else {
            "->"
        }
    }
}

impl PipelineEventSink for ConsoleEventSink {
    fn on_event(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::Cloning { url, branch, path } => self.line(
                Some(Icon::Progress),
                &format!("Cloning {url} (branch {branch}) into {} ...", path.display()),
            ),
            PipelineEvent::UpstreamAdvanced {
                remote,
                branch,
                from,
                to,
            } => self.line(
                Some(Icon::Progress),
                &format!(
                    "Remote {remote}/{branch} advanced: {} {} {}. Pulling...",
                    from.short(),
                    self.arrow(),
                    to.short()
                ),
            ),
            PipelineEvent::UpToDate {
                remote,
                branch,
                forced,
            } => {
                self.line(
                    Some(Icon::Idle),
                    &format!("No upstream changes on {remote}/{branch}."),
                );
                if !forced {
                    self.line(
                        None,
                        "Nothing to do. Use --always-build to force build/deploy/restart.",
                    );
                }
            }
            PipelineEvent::Building { .. } => {
                self.line(Some(Icon::Progress), "Building Go project...")
            }
            // The deploy line right after names the installed path
            PipelineEvent::Built { .. } => {}
            PipelineEvent::Deployed { path, .. } => self.line(
                Some(Icon::Success),
                &format!("Deployed binary to: {}", path.display()),
            ),
            PipelineEvent::Restarting { service, scope } => self.line(
                Some(Icon::Progress),
                &format!("Restarting service: {service} ({scope})"),
            ),
            PipelineEvent::ServiceStatus { output } => self.line(None, &output),
            PipelineEvent::Finished { head } => {
                if let Some(head) = head {
                    self.line(Some(Icon::Success), &format!("Current HEAD: {head}"));
                }
            }
        }
    }
}
