//! Atomic binary install
//!
//! The new binary is staged next to its final name as `<name>.new`, made
//! executable, and renamed over the old one. Readers of the final path see
//! either the complete old file or the complete new file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::ports::FileSystem;
use crate::error::{DeployError, DeployResult};

/// Suffix of the staged copy inside the destination directory
pub const STAGING_SUFFIX: &str = ".new";

/// Where a deployed binary ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledBinary {
    pub path: PathBuf,
    /// `sha256:<hex>` of the installed file
    pub digest: String,
}

/// Staged path for `binary_name` inside `dest_dir`
pub fn staging_path(dest_dir: &Path, binary_name: &str) -> PathBuf {
    dest_dir.join(format!("{binary_name}{STAGING_SUFFIX}"))
}

/// Copy `built` into `dest_dir/binary_name` via a same-directory rename.
pub fn install_binary<F: FileSystem>(
    fs: &F,
    built: &Path,
    dest_dir: &Path,
    binary_name: &str,
) -> DeployResult<InstalledBinary> {
    fs.create_dir_all(dest_dir)?;

    let dest = dest_dir.join(binary_name);
    let staged = staging_path(dest_dir, binary_name);

    fs.copy(built, &staged)?;
    fs.set_executable(&staged)?;
    fs.rename(&staged, &dest)?;

    let digest = fs.hash(&dest)?;
    let expected = fs.hash(built)?;
    if digest != expected {
        return Err(DeployError::Io(std::io::Error::other(format!(
            "installed binary {} does not match build output ({digest} != {expected})",
            dest.display()
        ))));
    }

    info!(path = %dest.display(), %digest, "binary installed");
    Ok(InstalledBinary { path: dest, digest })
}
