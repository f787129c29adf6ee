//! PATH lookup via the `which` crate

use std::path::PathBuf;

use crate::domain::ports::ToolLocator;

/// Resolves executables on the current `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct PathToolLocator;

impl ToolLocator for PathToolLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }
}
