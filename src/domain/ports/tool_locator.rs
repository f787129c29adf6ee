//! ToolLocator port - resolves executables on the search path

use std::path::PathBuf;

/// Finds executables by name
pub trait ToolLocator {
    /// Full path of `tool`, or `None` when it cannot be resolved
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}

impl<T: ToolLocator + ?Sized> ToolLocator for &T {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        (**self).locate(tool)
    }
}
