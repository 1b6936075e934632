//! Advisory whole-file locking for process-level mutual exclusion
//!
//! A [`LockHandle`] opens one file and requests the operating system's
//! advisory lock on it through the fs2 crate. Locks are cooperative: they
//! only exclude other handles and processes that lock the same file.
//!
//! Three ways to acquire are offered:
//!
//! - [`LockHandle::acquire`] with `blocking = true` waits indefinitely
//! - [`LockHandle::try_acquire`] makes one attempt and answers yes or no
//! - [`LockHandle::acquire_with_timeout`] polls with jittered exponential
//!   backoff (see [`BackoffPolicy`]) until a deadline
//!
//! # Examples
//!
//! ```no_run
//! use advlock::{LockHandle, LockMode};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut handle = LockHandle::open("/tmp/state.lock")?;
//! handle.acquire_with_timeout(LockMode::Exclusive, Duration::from_secs(5))?;
//! // Critical section here
//! handle.release()?;
//! # Ok(())
//! # }
//! ```

mod backoff;
mod handle;
mod mode;

pub use backoff::BackoffPolicy;
pub use handle::LockHandle;
pub use mode::LockMode;
