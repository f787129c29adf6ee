//! Configuration module for Redeploy
//!
//! Implements the configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (REDEPLOY_*)
//! 3. Config file (`--config` or ~/.config/redeploy/config.toml)
//! 4. Built-in defaults (lowest priority)
//!
//! Only optional settings come from files and the environment. The flags
//! that identify what to deploy (`--repo`, `--service`, `--binary-name`)
//! are always given on the command line.

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    default_config_path, load, load_with_warnings, resolve, with_env_overrides,
    with_env_overrides_from, ConfigWarning,
};
pub use types::FileConfig;
