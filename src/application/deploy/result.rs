//! Deploy Result
//!
//! Outcome of a run that finished without a fatal error.

use std::path::PathBuf;

use crate::domain::value_objects::Revision;

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Remote branch did not move and no build was forced
    UpToDate { head: Revision },

    /// A new binary was installed and the service restarted
    Deployed {
        /// Local HEAD before any pull
        previous: Revision,
        /// Local HEAD after the run (best effort)
        head: Option<Revision>,
        /// Installed binary path
        binary: PathBuf,
        /// `sha256:<hex>` of the installed binary
        digest: String,
        /// True when the build ran without upstream changes
        forced: bool,
    },
}

impl DeployOutcome {
    pub fn is_deployed(&self) -> bool {
        matches!(self, DeployOutcome::Deployed { .. })
    }

    /// Best known local HEAD at the end of the run
    pub fn head(&self) -> Option<&Revision> {
        match self {
            DeployOutcome::UpToDate { head } => Some(head),
            DeployOutcome::Deployed { head, .. } => head.as_ref(),
        }
    }
}
