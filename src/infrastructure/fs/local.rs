//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn create_temp_dir(&self, prefix: &str) -> FsResult<PathBuf> {
        let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
        Ok(dir.keep())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        // fs::copy carries the permission bits; the mtime is copied by hand
        fs::copy(from, to).map_err(|e| FsError::at(from, e))?;
        let modified = fs::metadata(from)
            .and_then(|meta| meta.modified())
            .map_err(|e| FsError::at(from, e))?;
        fs::File::options()
            .write(true)
            .open(to)
            .and_then(|file| file.set_modified(modified))
            .map_err(|e| FsError::at(to, e))
    }

    #[cfg(unix)]
    fn set_executable(&self, path: &Path) -> FsResult<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .map_err(|e| FsError::at(path, e))
    }

    #[cfg(not(unix))]
    fn set_executable(&self, path: &Path) -> FsResult<()> {
        if path.exists() {
            Ok(())
        } else {
            Err(FsError::NotFound(path.to_path_buf()))
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        fs::rename(from, to).map_err(|e| FsError::at(from, e))
    }

    fn hash(&self, path: &Path) -> FsResult<String> {
        let content = fs::read(path).map_err(|e| FsError::at(path, e))?;
        Ok(format!("sha256:{:x}", Sha256::digest(&content)))
    }
}
