//! ScopeError is used to report errors while a temporary scope is being constructed.
//! CleanupWarning describes what went wrong while a scope was being released.
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScopeError>;

/// Construction error
#[derive(Debug, Error)]
pub enum ScopeError {
    /// The scope directory could not be created under its root.
    #[error("Failed to create the scope directory {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScopeError {
    pub fn filesystem(path: impl AsRef<Path>, source: io::Error) -> Self {
        ScopeError::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// A prefix that would place the scope directory anywhere but directly in its root.
    pub fn invalid_prefix(path: impl AsRef<Path>) -> Self {
        Self::filesystem(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "the prefix should be a plain name without separators or root",
            ),
        )
    }

    pub fn is_filesystem(&self) -> bool {
        matches!(self, ScopeError::Filesystem { .. })
    }

    pub fn is_invalid_prefix(&self) -> bool {
        self.kind() == io::ErrorKind::InvalidInput
    }

    /// The path the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            ScopeError::Filesystem { path, .. } => path,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            ScopeError::Filesystem { source, .. } => source.kind(),
        }
    }
}

/// Non-fatal problem met while releasing a scope.
///
/// It is never returned as an `Err`. Release hands it back inside
/// [`ReleaseOutcome`](crate::ReleaseOutcome) and writes it to the log.
#[derive(Debug, Error)]
pub enum CleanupWarning {
    #[error("The temporary directory {} was already removed.", .path.display())]
    AlreadyGone { path: PathBuf },
    #[error("Failed to delete the temporary directory {}: {message}", .path.display())]
    RemoveFailed { path: PathBuf, message: String },
}

impl CleanupWarning {
    pub fn already_gone(path: impl AsRef<Path>) -> Self {
        CleanupWarning::AlreadyGone {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn remove_failed(path: impl AsRef<Path>, error: &io::Error) -> Self {
        CleanupWarning::RemoveFailed {
            path: path.as_ref().to_path_buf(),
            message: error.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            CleanupWarning::AlreadyGone { path } | CleanupWarning::RemoveFailed { path, .. } => {
                path
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_keeps_path_and_source() {
        let error = ScopeError::filesystem(
            "/missing/root/x-abcdef",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );

        assert!(error.is_filesystem());
        assert!(!error.is_invalid_prefix());
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
        assert_eq!(error.path(), Path::new("/missing/root/x-abcdef"));
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("/missing/root/x-abcdef"));
    }

    #[test]
    fn invalid_prefix_is_reported_as_invalid_input() {
        let error = ScopeError::invalid_prefix("/tmp/root/../outside");
        assert!(error.is_filesystem());
        assert!(error.is_invalid_prefix());
        assert_eq!(error.path(), Path::new("/tmp/root/../outside"));
    }

    #[test]
    fn remove_failed_warning_reduces_error_to_message() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let warning = CleanupWarning::remove_failed("/tmp/scope-123456", &io_error);

        assert_eq!(warning.path(), Path::new("/tmp/scope-123456"));
        assert!(warning.to_string().contains("access denied"));
    }
}
