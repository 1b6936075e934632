//! Jittered exponential backoff between non-blocking lock attempts

use crate::error::{LockError, Result};
use rand::Rng;
use std::time::Duration;

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(50);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(200);
const GROWTH_FACTOR: f64 = 1.5;
const MAX_JITTER: f64 = 0.10;

/// Delay schedule used by [`LockHandle::acquire_with_backoff`].
///
/// Each delay is `min(max, previous * (factor + random[0, jitter]))`,
/// starting from `initial`. The default is 50ms growing by 1.5-1.6x up to
/// 200ms.
///
/// [`LockHandle::acquire_with_backoff`]: super::LockHandle::acquire_with_backoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    initial: Duration,
    max: Duration,
    factor: f64,
    jitter: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial: INITIAL_RETRY_DELAY,
            max: MAX_RETRY_DELAY,
            factor: GROWTH_FACTOR,
            jitter: MAX_JITTER,
        }
    }
}

impl BackoffPolicy {
    /// Policy with the default 50ms / x1.5 / 200ms schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delay before the second attempt.
    pub fn with_initial(mut self, initial: Duration) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the upper bound every delay is capped at.
    pub fn with_max(mut self, max: Duration) -> Self {
        self.max = max;
        self
    }

    /// Sets the per-step growth factor.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Sets the upper bound of the random amount added to the factor.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// First delay.
    pub fn initial(&self) -> Duration {
        self.initial
    }

    /// Delay cap.
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Growth factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Maximum jitter added to the factor.
    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Checks that the policy produces finite, non-shrinking delays.
    pub fn validate(&self) -> Result<()> {
        if self.initial.is_zero() {
            return Err(LockError::invalid_argument(
                "backoff initial delay must be > 0",
            ));
        }
        if self.max < self.initial {
            return Err(LockError::invalid_argument(format!(
                "backoff max delay ({:?}) must be >= initial delay ({:?})",
                self.max, self.initial
            )));
        }
        if !self.factor.is_finite() || self.factor < 1.0 {
            return Err(LockError::invalid_argument(format!(
                "backoff factor must be a finite value >= 1.0, got {}",
                self.factor
            )));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(LockError::invalid_argument(format!(
                "backoff jitter must be a finite value >= 0.0, got {}",
                self.jitter
            )));
        }
        Ok(())
    }

    /// Next delay after `current`, with a fresh random jitter sample.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let sample = if self.jitter.is_finite() && self.jitter > 0.0 {
            rand::thread_rng().gen_range(0.0..=self.jitter)
        } else {
            0.0
        };
        self.grow(current, sample)
    }

    /// Deterministic step: `min(max, current * (factor + jitter_sample))`.
    ///
    /// `jitter_sample` is clamped to `[0, jitter]`; a non-finite `jitter`
    /// counts as zero. A product that does not fit in a `Duration`
    /// saturates at `max`.
    pub fn grow(&self, current: Duration, jitter_sample: f64) -> Duration {
        let jitter = if self.jitter.is_finite() {
            self.jitter.max(0.0)
        } else {
            0.0
        };
        let multiplier = self.factor + jitter_sample.clamp(0.0, jitter);
        let scaled = current.min(self.max).as_secs_f64() * multiplier;
        Duration::try_from_secs_f64(scaled)
            .unwrap_or(self.max)
            .min(self.max)
    }
}
