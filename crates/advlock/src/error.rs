//! Error types for advisory locking

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Coarse classification of a [`LockError`].
///
/// Callers that only need to branch on the kind of failure match on this
/// instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input: empty path, non-positive timeout, invalid backoff policy.
    InvalidArgument,
    /// The target file could not be opened or created.
    FileNotFound,
    /// A lock could not be obtained (I/O failure or timeout).
    LockFailed,
    /// A lock could not be released.
    UnlockFailed,
}

/// Error type for lock operations
#[derive(Error, Debug)]
pub enum LockError {
    /// A caller-supplied value was rejected before any I/O
    #[error("INVALID_ARGUMENT: {reason}")]
    InvalidArgument {
        /// What was wrong with the value
        reason: String,
    },

    /// The target file could not be opened or created
    #[error("FILE_NOT_FOUND: cannot open or create '{}': {source}", path.display())]
    FileNotFound {
        /// Path to the target file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The OS lock request failed for a reason other than contention
    #[error("LOCK_FAILED: failed to lock '{}': {source}", path.display())]
    LockFailed {
        /// Path to the target file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Acquire was called on a handle that already holds a lock
    #[error("LOCK_FAILED: '{}' is already locked by this instance", path.display())]
    AlreadyLocked {
        /// Path to the target file
        path: PathBuf,
    },

    /// The lock did not become available before the deadline
    #[error("LOCK_FAILED: timed out after {timeout:?} waiting for lock on '{}'", path.display())]
    Timeout {
        /// Path to the target file
        path: PathBuf,
        /// How long the caller was willing to wait
        timeout: Duration,
    },

    /// Release was called on a handle that holds no lock
    #[error("UNLOCK_FAILED: '{}' is not currently locked by this instance", path.display())]
    NotLocked {
        /// Path to the target file
        path: PathBuf,
    },

    /// The OS refused to release the lock
    #[error("UNLOCK_FAILED: failed to unlock '{}': {source}", path.display())]
    UnlockFailed {
        /// Path to the target file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl LockError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        LockError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Maps this error onto its [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            LockError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            LockError::FileNotFound { .. } => ErrorKind::FileNotFound,
            LockError::LockFailed { .. }
            | LockError::AlreadyLocked { .. }
            | LockError::Timeout { .. } => ErrorKind::LockFailed,
            LockError::NotLocked { .. } | LockError::UnlockFailed { .. } => {
                ErrorKind::UnlockFailed
            }
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LockError>;
