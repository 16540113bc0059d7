//! Elapsed-time accounting
//!
//! The shell reports how much wall time passed since the last frame; the
//! core only accumulates it. Nothing here sleeps.

use std::time::Duration;

/// An interval timer driven by reported elapsed time
///
/// Used for the enemy's counter-attack delay, the animated policy's
/// resolution hold and the speed policies' attack cooldowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    interval: Duration,
    elapsed: Duration,
}

impl Cooldown {
    /// A timer that becomes ready once `interval` has elapsed
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// A timer that is ready immediately and then every `interval`
    pub fn ready(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: interval,
        }
    }

    /// Accumulate elapsed time
    pub fn advance(&mut self, elapsed: Duration) {
        self.elapsed = self.elapsed.saturating_add(elapsed);
    }

    /// Whether the full interval has elapsed
    pub fn is_ready(&self) -> bool {
        self.elapsed >= self.interval
    }

    /// Consume readiness; returns false (and changes nothing) when not ready
    pub fn fire(&mut self) -> bool {
        if self.is_ready() {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Restart the interval from zero
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Time left before the timer is ready
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
