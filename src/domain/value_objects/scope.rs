//! Supervisor scope value object
//!
//! - `User` scope: `systemctl --user`, never elevated
//! - `System` scope: plain `systemctl`, optionally wrapped in `sudo`

/// Which systemd control surface manages the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorScope {
    /// Per-user service manager
    User,
    /// System service manager
    System { sudo: bool },
}

impl SupervisorScope {
    /// Resolve scope from the two CLI flags. User scope ignores elevation.
    pub fn from_flags(user_service: bool, use_sudo: bool) -> Self {
        if user_service {
            SupervisorScope::User
        } else {
            SupervisorScope::System { sudo: use_sudo }
        }
    }

    /// True when every supervisor command is prefixed with `sudo`
    pub fn uses_sudo(&self) -> bool {
        matches!(self, SupervisorScope::System { sudo: true })
    }
}

impl Default for SupervisorScope {
    fn default() -> Self {
        SupervisorScope::System { sudo: false }
    }
}

impl std::fmt::Display for SupervisorScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupervisorScope::User => write!(f, "user"),
            SupervisorScope::System { .. } => write!(f, "system"),
        }
    }
}
