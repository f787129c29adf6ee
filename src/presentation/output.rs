//! Output Rendering
//!
//! Chooses the event sink for a run and renders fatal errors and config
//! warnings in text or JSON form.

use std::io::{self, Write};

use crate::config::ConfigWarning;
use crate::domain::ports::PipelineEventSink;
use crate::error::DeployError;
use crate::infrastructure::{ConsoleEventSink, JsonEventSink};

/// Event sink for the selected output format
pub fn create_event_sink(json: bool) -> Box<dyn PipelineEventSink> {
    if json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stdout())
    }
}

/// Exit code for a terminal error
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<DeployError>()
        .map(DeployError::exit_code)
        .unwrap_or(1)
}

/// Human-readable rendering of a terminal error
pub fn format_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<DeployError>() {
        Some(DeployError::CommandFailed {
            command,
            code,
            stdout,
            stderr,
        }) => {
            let code = code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string());
            format!(
                "Command failed with exit code {code}:\n  {command}\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}\n"
            )
        }
        _ => format!("ERROR: {err}\n"),
    }
}

/// JSON rendering of a terminal error
pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let mut value = serde_json::json!({
        "event": "error",
        "message": err.to_string(),
        "exit_code": exit_code(err),
    });
    if let Some(DeployError::CommandFailed {
        command,
        stdout,
        stderr,
        ..
    }) = err.downcast_ref::<DeployError>()
    {
        value["command"] = serde_json::json!(command);
        value["stdout"] = serde_json::json!(stdout);
        value["stderr"] = serde_json::json!(stderr);
    }
    value
}

/// Print a terminal error: stderr for humans, one NDJSON line on stdout for CI
pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let mut stdout = io::stdout();
        let _ = writeln!(stdout, "{}", error_json(err));
        let _ = stdout.flush();
        return;
    }
    eprint!("{}", format_error(err));
}

/// Report non-fatal config warnings on stderr
pub fn print_config_warnings(warnings: &[ConfigWarning], json: bool) {
    write_config_warnings(&mut io::stderr(), warnings, json);
}

fn write_config_warnings<W: Write>(writer: &mut W, warnings: &[ConfigWarning], json: bool) {
    for warning in warnings {
        if json {
            let value = serde_json::json!({
                "event": "warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
            });
            let _ = writeln!(writer, "{}", value);
        } else {
            let _ = writeln!(writer, "Warning: {}", warning);
        }
    }
}
