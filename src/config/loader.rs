//! Configuration loading

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DeployError, DeployResult};

use super::env_validator::{levenshtein, parse_bool, EnvVarValidator};
use super::types::FileConfig;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load a config file, ignoring warnings
pub fn load(path: &Path) -> DeployResult<FileConfig> {
    load_with_warnings(path).map(|(config, _)| config)
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeployResult<(FileConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| DeployError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: FileConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeployError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// `~/.config/redeploy/config.toml` (platform config dir)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("redeploy").join("config.toml"))
}

/// Pick and load the config file.
///
/// An explicit path must exist; the default location is used only if present.
pub fn resolve(explicit: Option<&Path>) -> DeployResult<(FileConfig, Vec<ConfigWarning>)> {
    match explicit {
        Some(path) => load_with_warnings(path),
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => load_with_warnings(&path),
            None => Ok((FileConfig::default(), Vec::new())),
        },
    }
}

/// Apply environment variable overrides (REDEPLOY_* prefix)
pub fn with_env_overrides(config: FileConfig) -> FileConfig {
    with_env_overrides_from(config, |key| std::env::var(key).ok(), &mut std::io::stderr())
}

/// Apply overrides from an arbitrary variable lookup (for testing)
pub fn with_env_overrides_from<F, W>(mut config: FileConfig, lookup: F, warnings: &mut W) -> FileConfig
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    if let Some(url) = lookup("REDEPLOY_URL") {
        config.url = Some(url);
    }
    if let Some(branch) = lookup("REDEPLOY_BRANCH") {
        config.branch = Some(branch);
    }
    if let Some(remote) = lookup("REDEPLOY_REMOTE") {
        config.remote = Some(remote);
    }
    if let Some(work_dir) = lookup("REDEPLOY_WORK_DIR") {
        config.work_dir = Some(PathBuf::from(work_dir));
    }
    if let Some(ldflags) = lookup("REDEPLOY_LDFLAGS") {
        config.ldflags = Some(ldflags);
    }

    let mut flag = |name: &str, slot: &mut Option<bool>| {
        if let Some(raw) = lookup(name) {
            if let Some(value) =
                EnvVarValidator::boolean(name).parse_with_writer(&raw, parse_bool, warnings)
            {
                *slot = Some(value);
            }
        }
    };
    flag("REDEPLOY_USER_SERVICE", &mut config.user_service);
    flag("REDEPLOY_USE_SUDO", &mut config.use_sudo);
    flag("REDEPLOY_ALWAYS_BUILD", &mut config.always_build);

    config
}

/// 1-based line where `key` is assigned (`key = ...`)
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            line.trim_start()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &candidate in FileConfig::KEYS {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
