//! Advisory whole-file locking with shared/exclusive modes, non-blocking
//! attempts and timeout-bounded waits.

#![warn(missing_docs)]

// Core modules
pub mod error;
pub mod lock;

// Re-export commonly used types
pub use error::{ErrorKind, LockError, Result};
pub use lock::{BackoffPolicy, LockHandle, LockMode};
