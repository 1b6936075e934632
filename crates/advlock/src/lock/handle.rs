//! Lock handle bound to a single open file

use super::{BackoffPolicy, LockMode};
use crate::error::{LockError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Advisory lock over one file, owned by one caller.
///
/// The handle keeps the file open for its whole lifetime and tracks whether
/// *this instance* holds a lock. That flag is local bookkeeping only: a lock
/// held by another handle or process is never reflected in [`is_locked`].
///
/// Dropping a handle that still holds a lock releases it (errors are
/// discarded) and closes the file. Use [`close`] to observe release errors.
///
/// [`is_locked`]: LockHandle::is_locked
/// [`close`]: LockHandle::close
#[derive(Debug)]
pub struct LockHandle {
    file: File,
    path: PathBuf,
    held: Option<LockMode>,
}

impl LockHandle {
    /// Opens `path` for read+write, creating an empty file if it is missing.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the path is empty or whitespace-only
    /// - `FileNotFound` if the file cannot be opened or created
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(LockError::invalid_argument(
                "lock path must not be empty or whitespace",
            ));
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| LockError::FileNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::debug!("Opened lock file {}", path.display());

        Ok(LockHandle {
            file,
            path: path.to_path_buf(),
            held: None,
        })
    }

    /// Path of the locked file, as given to [`open`](LockHandle::open).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this instance currently holds a lock it acquired itself.
    pub fn is_locked(&self) -> bool {
        self.held.is_some()
    }

    /// Mode of the lock held by this instance, if any.
    pub fn mode(&self) -> Option<LockMode> {
        self.held
    }

    /// Acquires the lock in `mode`.
    ///
    /// With `blocking` the calling thread is suspended until the lock is
    /// available. Without it a single attempt is made and `Ok(false)` is
    /// returned when another holder is in the way.
    ///
    /// # Errors
    ///
    /// - `AlreadyLocked` if this instance already holds a lock
    /// - `LockFailed` on any I/O failure other than contention
    pub fn acquire(&mut self, mode: LockMode, blocking: bool) -> Result<bool> {
        if self.held.is_some() {
            return Err(LockError::AlreadyLocked {
                path: self.path.clone(),
            });
        }

        let outcome = match (mode, blocking) {
            (LockMode::Exclusive, true) => FileExt::lock_exclusive(&self.file),
            (LockMode::Shared, true) => FileExt::lock_shared(&self.file),
            (LockMode::Exclusive, false) => FileExt::try_lock_exclusive(&self.file),
            (LockMode::Shared, false) => FileExt::try_lock_shared(&self.file),
        };

        match outcome {
            Ok(()) => {
                self.held = Some(mode);
                tracing::debug!("Acquired {} lock on {}", mode, self.path.display());
                Ok(true)
            }
            Err(e) if !blocking && is_contended(&e) => Ok(false),
            Err(e) => Err(LockError::LockFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Single non-blocking attempt that answers yes or no.
    ///
    /// Every failure, including I/O errors, is reported as `false`. Use
    /// `acquire(mode, false)` to tell contention apart from errors.
    pub fn try_acquire(&mut self, mode: LockMode) -> bool {
        match self.acquire(mode, false) {
            Ok(acquired) => acquired,
            Err(e) => {
                tracing::debug!("try_acquire on {} failed: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Polls for the lock until `timeout` elapses, using the default backoff.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `timeout` is zero
    /// - `AlreadyLocked` if this instance already holds a lock
    /// - `Timeout` if the lock did not become available in time
    pub fn acquire_with_timeout(&mut self, mode: LockMode, timeout: Duration) -> Result<bool> {
        self.acquire_with_backoff(mode, timeout, &BackoffPolicy::default())
    }

    /// Same as [`acquire_with_timeout`] with the timeout given in seconds.
    ///
    /// Zero, negative, NaN and infinite values are rejected before any
    /// waiting happens. Positive values shorter than a nanosecond are
    /// treated as one nanosecond.
    ///
    /// [`acquire_with_timeout`]: LockHandle::acquire_with_timeout
    pub fn acquire_with_timeout_secs(&mut self, mode: LockMode, secs: f64) -> Result<bool> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(LockError::invalid_argument(format!(
                "timeout must be a positive number of seconds, got {}",
                secs
            )));
        }
        // Positive values below one nanosecond round up instead of to zero
        let timeout = Duration::try_from_secs_f64(secs)
            .map_err(|e| LockError::invalid_argument(format!("invalid timeout {}: {}", secs, e)))?
            .max(Duration::from_nanos(1));
        self.acquire_with_timeout(mode, timeout)
    }

    /// Polls for the lock until `timeout` elapses, sleeping per `policy`
    /// between attempts.
    ///
    /// At least one attempt is made. Sleeps are clamped to the time left, so
    /// the call returns right after one last attempt at the deadline.
    /// Waiters are not served in order.
    pub fn acquire_with_backoff(
        &mut self,
        mode: LockMode,
        timeout: Duration,
        policy: &BackoffPolicy,
    ) -> Result<bool> {
        if timeout.is_zero() {
            return Err(LockError::invalid_argument("timeout must be > 0"));
        }
        policy.validate()?;
        if self.held.is_some() {
            return Err(LockError::AlreadyLocked {
                path: self.path.clone(),
            });
        }

        let deadline = Instant::now().checked_add(timeout).ok_or_else(|| {
            LockError::invalid_argument(format!("timeout {:?} is too large", timeout))
        })?;
        let mut wait = policy.initial();
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);
            if self.try_acquire(mode) {
                return Ok(true);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let sleep_for = wait.min(remaining);
            tracing::trace!(
                "Lock attempt {} on {} contended, retrying in {:?}",
                attempt,
                self.path.display(),
                sleep_for
            );
            thread::sleep(sleep_for);
            wait = policy.next_delay(wait);
        }

        Err(LockError::Timeout {
            path: self.path.clone(),
            timeout,
        })
    }

    /// Releases the lock held by this instance.
    ///
    /// # Errors
    ///
    /// - `NotLocked` if this instance holds no lock
    /// - `UnlockFailed` if the OS refused; the instance still counts as
    ///   locked since the real lock state is unknown
    pub fn release(&mut self) -> Result<bool> {
        let Some(mode) = self.held else {
            return Err(LockError::NotLocked {
                path: self.path.clone(),
            });
        };

        FileExt::unlock(&self.file).map_err(|e| LockError::UnlockFailed {
            path: self.path.clone(),
            source: e,
        })?;

        self.held = None;
        tracing::debug!("Released {} lock on {}", mode, self.path.display());
        Ok(true)
    }

    /// Runs `f` while holding the lock in `mode`, blocking until acquired.
    ///
    /// The lock is released once `f` returns. Whatever `f` returns is passed
    /// through untouched; a failed release is reported as the outer error.
    pub fn with_lock<T, F>(&mut self, mode: LockMode, f: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        self.acquire(mode, true)?;
        let output = f();
        self.release()?;
        Ok(output)
    }

    /// Releases a held lock and closes the file.
    ///
    /// Unlike dropping the handle, a release failure is returned. The file
    /// is closed either way.
    pub fn close(mut self) -> Result<()> {
        if self.held.is_some() {
            self.release()?;
        }
        Ok(())
    }
}

impl Drop for LockHandle {
    fn drop(&mut self) {
        if self.held.is_some() {
            if let Err(e) = self.release() {
                tracing::warn!("Discarding release error on drop: {}", e);
            }
        }
        // File is closed when `self.file` drops
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
