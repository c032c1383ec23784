//! Cancel-and-reschedule timer for collapsing bursts of input into one action.
//!
//! The event loop owns the clock: callers pass `Instant`s in, ask how long to wait, and collect
//! the payload once it is due. Nothing here spawns threads or depends on the terminal library.

use std::time::{Duration, Instant};

/// Quiet window used for the live table-of-contents filter.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Holds at most one pending call; scheduling again discards the previous one.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

struct Pending<T> {
    due: Instant,
    payload: T,
}

impl<T> Debouncer<T> {
    #[must_use]
    /// Debouncer that fires `delay` after the most recent `schedule`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `payload`, cancelling whatever was pending.
    pub fn schedule(&mut self, now: Instant, payload: T) {
        self.pending = Some(Pending {
            due: now + self.delay,
            payload,
        });
    }

    /// Drops the pending call, returning its payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    #[must_use]
    /// Whether a call is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    /// Time left until the pending call is due, zero if overdue, `None` if idle.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }

    /// Takes the payload if its quiet window has elapsed.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.due <= now => self.cancel(),
            _ => None,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[cfg(test)]
#[path = "tests/debounce.rs"]
mod tests;
