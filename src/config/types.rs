//! Configuration type definitions

use std::path::PathBuf;

use serde::Deserialize;

/// Optional settings read from `config.toml`
///
/// ```toml
/// url = "git@github.com:team/app.git"
/// branch = "release"
/// remote = "origin"
/// work_dir = "/srv/app"
/// use_sudo = true
/// ldflags = "-s -w"
/// extra_build_args = ["-trimpath", "./cmd/app"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub url: Option<String>,
    pub branch: Option<String>,
    pub remote: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub user_service: Option<bool>,
    pub use_sudo: Option<bool>,
    pub always_build: Option<bool>,
    pub ldflags: Option<String>,
    pub extra_build_args: Option<Vec<String>>,
}

impl FileConfig {
    /// Keys accepted in the file, used for typo suggestions
    pub const KEYS: &'static [&'static str] = &[
        "url",
        "branch",
        "remote",
        "work_dir",
        "user_service",
        "use_sudo",
        "always_build",
        "ldflags",
        "extra_build_args",
    ];

    /// Parse TOML content
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
