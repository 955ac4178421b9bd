use std::env;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{self as std_path, Path, PathBuf};

use tracing::{debug, info, trace, warn};

use crate::scope::naming;
use crate::scope::scope_error::{CleanupWarning, Result, ScopeError};

/// What happened when a scope was released.
///
/// Release never fails. Problems are described here and written to the log.
#[derive(Debug)]
pub enum ReleaseOutcome {
    /// The directory and everything in it was deleted.
    Removed,
    /// The directory was gone before release ran, so nothing was done.
    AlreadyGone(CleanupWarning),
    /// Deletion was attempted and failed. The directory may be partially removed.
    Failed(CleanupWarning),
    /// The scope had been released before. The file system was not touched.
    AlreadyReleased,
}

impl ReleaseOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, ReleaseOutcome::Removed)
    }

    pub fn is_already_released(&self) -> bool {
        matches!(self, ReleaseOutcome::AlreadyReleased)
    }

    pub fn warning(&self) -> Option<&CleanupWarning> {
        match self {
            ReleaseOutcome::AlreadyGone(warning) | ReleaseOutcome::Failed(warning) => {
                Some(warning)
            }
            ReleaseOutcome::Removed | ReleaseOutcome::AlreadyReleased => None,
        }
    }
}

/// Temporary Scope owns a uniquely named directory for the duration of a test.
/// The directory is created by the constructor and deleted, together with
/// everything inside, when the scope is released or dropped.
///
/// # Example of use in tests
///
/// ```rust
/// use temp_scope::{ScopeError, TemporaryScope};
///
/// fn write_report() -> Result<(), ScopeError> {
///     let scope = TemporaryScope::with_prefix("report")?;
///
///     scope.perform_test(|dir| {
///         let report = dir.join("report.txt");
///         std::fs::write(&report, "done")?;
///         assert_eq!(std::fs::read_to_string(report)?, "done");
///         Ok(())
///     });
///     Ok(())
/// }
/// # write_report().unwrap();
/// ```
#[derive(Debug)]
pub struct TemporaryScope {
    root_dir: PathBuf,
    prefix: String,
    path: PathBuf,
    released: bool,
}

impl TemporaryScope {
    /// Creates a scope in the platform temporary directory with the default prefix.
    pub fn new() -> Result<TemporaryScope> {
        Self::create(None, None)
    }

    /// Creates a scope in the platform temporary directory.
    pub fn with_prefix(prefix: &str) -> Result<TemporaryScope> {
        Self::create(None, Some(prefix))
    }

    /// Creates a scope inside `root`, which should already exist.
    pub fn in_dir(root: impl AsRef<Path>, prefix: &str) -> Result<TemporaryScope> {
        Self::create(Some(root.as_ref()), Some(prefix))
    }

    /// Creates a uniquely named directory and returns the scope owning it.
    ///
    /// root - The directory the scope directory is created in. It should be present
    ///        in the file system, it is never created here. Defaults to the platform
    ///        temporary directory.
    /// prefix - The start of the directory name. A missing or blank prefix is
    ///          replaced by [`naming::DEFAULT_PREFIX`]. Absolute prefixes and
    ///          prefixes with path separators are rejected.
    ///
    /// The directory is named `<prefix>-<6 hex chars>`. Names that are already
    /// taken are skipped, so the returned path did not exist before this call.
    pub fn create(root: Option<&Path>, prefix: Option<&str>) -> Result<TemporaryScope> {
        let root_dir = match root {
            Some(root) => std_path::absolute(root).map_err(|e| ScopeError::filesystem(root, e))?,
            None => env::temp_dir(),
        };
        let prefix = naming::normalize_prefix(prefix).to_string();
        if !naming::is_valid_prefix(&prefix) {
            return Err(ScopeError::invalid_prefix(root_dir.join(&prefix)));
        }

        let path = loop {
            let candidate = root_dir.join(naming::directory_name(&prefix));
            if candidate.exists() {
                trace!(path = %candidate.display(), "Scope name is taken, trying another");
                continue;
            }
            match fs::create_dir(&candidate) {
                Ok(()) => break candidate,
                // Somebody else took the name after the existence check.
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    trace!(path = %candidate.display(), "Scope name is taken, trying another");
                }
                Err(e) => return Err(ScopeError::filesystem(&candidate, e)),
            }
        };
        debug!(path = %path.display(), "Scope directory created");

        Ok(TemporaryScope {
            root_dir,
            prefix,
            path,
            released: false,
        })
    }

    /// Absolute path of the scope directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Path of a randomly named file directly inside the scope directory.
    /// Nothing is created and existing files are not checked.
    pub fn random_file_path(&self) -> PathBuf {
        self.path.join(naming::file_name())
    }

    /// Runs the test unit with the scope directory as its argument.
    /// An error returned by the test unit fails the test with a panic, and the
    /// directory is still removed when the scope is dropped during unwinding.
    pub fn perform_test<F>(&self, test_proc: F)
    where
        F: FnOnce(&Path) -> io::Result<()>,
    {
        if let Err(e) = test_proc(&self.path) {
            panic!("inner test has error: {}", e)
        }
    }

    /// Deletes the scope directory recursively, best effort.
    ///
    /// Only the first call does anything. Existence is checked again at this point,
    /// because the test may have removed the directory itself. Failures are logged
    /// and returned as part of the outcome, never as an error.
    pub fn release(&mut self) -> ReleaseOutcome {
        if self.released {
            trace!(path = %self.path.display(), "Scope already released");
            return ReleaseOutcome::AlreadyReleased;
        }
        self.released = true;

        match fs::symlink_metadata(&self.path).and_then(|_| fs::remove_dir_all(&self.path)) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Scope directory removed");
                ReleaseOutcome::Removed
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "The temporary directory was already removed");
                ReleaseOutcome::AlreadyGone(CleanupWarning::already_gone(&self.path))
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to delete the temporary directory"
                );
                ReleaseOutcome::Failed(CleanupWarning::remove_failed(&self.path, &e))
            }
        }
    }

    /// Releases the scope and consumes it.
    pub fn close(mut self) -> ReleaseOutcome {
        self.release()
    }
}

impl AsRef<Path> for TemporaryScope {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl Drop for TemporaryScope {
    fn drop(&mut self) {
        if !self.released {
            self.release();
        }
    }
}
