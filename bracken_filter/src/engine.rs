// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The refresh engine: debounce + gate + generation guard.

use alloc::string::String;

use crate::{Debounce, LengthGate};

/// One issued query, tagged with its generation.
///
/// The generation increments on every issued query; only the response
/// matching the *latest* generation may mutate visible state. That check is
/// [`FilterEngine::accepts`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterQuery {
    /// The effective query text (post-gate).
    pub text: String,
    /// Monotonically increasing issue tag.
    pub generation: u64,
}

/// What a keystroke did to the refresh pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputDisposition {
    /// A refresh was scheduled after the quiet period.
    Scheduled,
    /// The gate suppressed the refresh; the current visible set stands.
    Suppressed,
    /// No quiet period is configured; the query was issued immediately.
    Immediate(FilterQuery),
}

/// Owns the debounce slot, the length gate, and the generation counter.
///
/// The engine never runs a query itself. It hands out [`FilterQuery`] values
/// for the caller to execute (synchronously against a catalog, or deferred
/// through the host's fetch delegate) and arbitrates which completions are
/// still current.
#[derive(Clone, Debug)]
pub struct FilterEngine {
    debounce: Debounce,
    gate: LengthGate,
    generation: u64,
    pending: Option<String>,
}

impl FilterEngine {
    /// Creates an engine with the given quiet period and gate.
    #[must_use]
    pub const fn new(quiet_ms: u64, gate: LengthGate) -> Self {
        Self {
            debounce: Debounce::new(quiet_ms),
            gate,
            generation: 0,
            pending: None,
        }
    }

    /// The configured gate.
    #[must_use]
    pub const fn gate(&self) -> LengthGate {
        self.gate
    }

    /// The highest generation issued so far (0 before the first issue).
    #[must_use]
    pub const fn latest_generation(&self) -> u64 {
        self.generation
    }

    /// Records a keystroke's new query text at `now_ms`.
    ///
    /// A suppressed keystroke also cancels any pending refresh: the text the
    /// pending refresh was scheduled for is no longer what the input holds,
    /// and the gate says the current text must not run.
    pub fn note_input(&mut self, text: &str, now_ms: u64) -> InputDisposition {
        match self.gate.admit(text) {
            None => {
                self.debounce.cancel();
                self.pending = None;
                InputDisposition::Suppressed
            }
            Some(effective) => {
                if self.debounce.quiet_ms() == 0 {
                    self.debounce.cancel();
                    self.pending = None;
                    InputDisposition::Immediate(self.issue(effective))
                } else {
                    self.pending = Some(String::from(effective));
                    self.debounce.schedule(now_ms);
                    InputDisposition::Scheduled
                }
            }
        }
    }

    /// Fires a due quiet period, issuing the pending query.
    ///
    /// Returns `None` while the slot is still quiet or empty.
    pub fn poll(&mut self, now_ms: u64) -> Option<FilterQuery> {
        if self.debounce.fire(now_ms) {
            let text = self.pending.take().unwrap_or_default();
            Some(self.issue(&text))
        } else {
            None
        }
    }

    /// Issues a query immediately, bypassing gate and debounce.
    ///
    /// Used for the open-refresh (`""`), which always runs regardless of the
    /// minimum-length policy.
    pub fn issue(&mut self, text: &str) -> FilterQuery {
        self.generation = self.generation.wrapping_add(1);
        FilterQuery {
            text: String::from(text),
            generation: self.generation,
        }
    }

    /// The stale-response guard: whether a completion for `generation` may
    /// still be applied.
    #[must_use]
    pub const fn accepts(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Cancels any pending refresh (close/blur path).
    ///
    /// The generation counter stands, so an in-flight completion issued
    /// before the cancel remains checkable (and discardable) afterwards.
    pub fn cancel(&mut self) {
        self.debounce.cancel();
        self.pending = None;
    }

    /// Whether a refresh is waiting on its quiet period.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }
}
