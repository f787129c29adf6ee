//! FileSystem port - abstraction over the file operations a deploy needs
//!
//! Install is expressed as primitives (copy, chmod, rename) so the domain
//! decides the order and tests can stop between any two of them.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Attach the path an `io::Error` was raised for
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(PathBuf::new()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(PathBuf::new()),
            _ => FsError::Io(err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(err) => write!(f, "I/O error: {}", err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - `MockFileSystem` - in-memory for testing
pub trait FileSystem {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Create a fresh, exclusive temporary directory that outlives the call
    fn create_temp_dir(&self, prefix: &str) -> FsResult<PathBuf>;

    /// Copy a file, preserving its metadata where the platform allows
    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Set permission bits to 0755
    fn set_executable(&self, path: &Path) -> FsResult<()>;

    /// Replace `to` with `from` in one step (same file system)
    fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Compute content hash (`sha256:<hex>`)
    fn hash(&self, path: &Path) -> FsResult<String>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        (**self).create_dir_all(path)
    }

    fn create_temp_dir(&self, prefix: &str) -> FsResult<PathBuf> {
        (**self).create_temp_dir(prefix)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        (**self).copy(from, to)
    }

    fn set_executable(&self, path: &Path) -> FsResult<()> {
        (**self).set_executable(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        (**self).rename(from, to)
    }

    fn hash(&self, path: &Path) -> FsResult<String> {
        (**self).hash(path)
    }
}
