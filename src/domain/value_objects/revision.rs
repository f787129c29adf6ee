//! Revision value object
//!
//! An opaque commit identifier as printed by `git rev-parse`. Revisions are
//! only ever compared for equality; no ordering or parsing is performed.

use std::fmt;

/// Opaque revision pointer (local HEAD, remote branch head)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    /// Length of the abbreviated form used in progress messages
    pub const SHORT_LEN: usize = 8;

    /// Create a revision from raw command output, trimming surrounding whitespace
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Full identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated identifier (first 8 characters)
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(Self::SHORT_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of comparing the local head with the remote branch head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Remote points somewhere else; an update is available
    Changed,
    /// Both pointers are identical
    Unchanged,
}

impl UpdateStatus {
    /// Plain string equality, nothing more
    pub fn between(local: &Revision, remote: &Revision) -> Self {
        if local == remote {
            UpdateStatus::Unchanged
        } else {
            UpdateStatus::Changed
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, UpdateStatus::Changed)
    }
}
