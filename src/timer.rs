//! Pausable stopwatch sampled at tick boundaries
//!
//! Time only advances through the `Instant`s handed in, so the game can be
//! driven by the wall clock or by synthetic instants in tests.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Timer {
    /// Time banked by earlier running stretches
    banked: Duration,
    /// Start of the current running stretch, None while paused
    running_since: Option<Instant>,
}

impl Timer {
    /// A timer already running from `now`
    pub fn started(now: Instant) -> Self {
        Self {
            banked: Duration::ZERO,
            running_since: Some(now),
        }
    }

    /// Reset to zero and run
    pub fn start(&mut self, now: Instant) {
        *self = Self::started(now);
    }

    /// Stop accumulating, keeping what has been measured so far
    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.banked += now.saturating_duration_since(since);
        }
    }

    pub fn unpause(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Total running time as of `now`
    pub fn elapsed(&self, now: Instant) -> Duration {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.banked + running
    }
}
