// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot quiet-period deadline driven by host timestamps.

/// A cancellable quiet-period deadline.
///
/// The slot is single: [`Debounce::schedule`] unconditionally supersedes any
/// pending deadline. Hosts feed monotonic timestamps in milliseconds (the
/// same clock they pass to the rest of the widget core) and call
/// [`Debounce::fire`] from their tick; there is no timer thread and no
/// ambient global state.
#[derive(Clone, Debug)]
pub struct Debounce {
    quiet_ms: u64,
    deadline: Option<u64>,
}

impl Debounce {
    /// Creates a debounce with the given quiet period in milliseconds.
    #[must_use]
    pub const fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            deadline: None,
        }
    }

    /// The configured quiet period.
    #[must_use]
    pub const fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    /// Schedules (or reschedules) the deadline at `now_ms + quiet_ms`.
    pub fn schedule(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(self.quiet_ms));
    }

    /// Cancels a pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Reports whether the quiet period has elapsed, at most once per
    /// schedule. Returns `false` while pending or when nothing is scheduled.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
