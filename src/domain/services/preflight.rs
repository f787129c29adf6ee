//! Preflight checks
//!
//! Resolves every executable a run depends on before anything is invoked.

use tracing::debug;

use crate::domain::ports::ToolLocator;
use crate::domain::value_objects::SupervisorScope;
use crate::error::{DeployError, DeployResult};

/// Version-control client
pub const GIT: &str = "git";
/// Service-supervisor client
pub const SYSTEMCTL: &str = "systemctl";
/// Privilege-elevation wrapper
pub const SUDO: &str = "sudo";

/// Tools that must be present before the run starts.
///
/// The build tool is not listed; it is checked lazily right before a build.
pub fn required_tools(scope: SupervisorScope) -> Vec<&'static str> {
    let mut tools = vec![GIT, SYSTEMCTL];
    if scope.uses_sudo() {
        tools.push(SUDO);
    }
    tools
}

/// Fail on the first tool that does not resolve
pub fn ensure_tools<L: ToolLocator>(locator: &L, tools: &[&str]) -> DeployResult<()> {
    for tool in tools {
        match locator.locate(tool) {
            Some(path) => debug!(tool, path = %path.display(), "resolved tool"),
            None => {
                return Err(DeployError::ToolNotFound {
                    tool: tool.to_string(),
                })
            }
        }
    }
    Ok(())
}
