// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimum-input-length gating.

/// What to do with a query shorter than the configured minimum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GatePolicy {
    /// Suppress the refresh entirely, leaving the current visible set.
    Suppress,
    /// Treat the query as empty, showing everything.
    TreatAsEmpty,
}

/// The minimum-input-length gate.
///
/// Length is measured in `char`s, not bytes, so multi-byte input counts the
/// way users perceive it.
#[derive(Copy, Clone, Debug)]
pub struct LengthGate {
    min_len: usize,
    policy: GatePolicy,
}

impl LengthGate {
    /// A gate requiring at least `min_len` characters, with the given
    /// below-threshold policy.
    #[must_use]
    pub const fn new(min_len: usize, policy: GatePolicy) -> Self {
        Self { min_len, policy }
    }

    /// A gate that admits every query.
    #[must_use]
    pub const fn pass_all() -> Self {
        Self::new(0, GatePolicy::Suppress)
    }

    /// The configured minimum length.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        self.min_len
    }

    /// The configured below-threshold policy.
    #[must_use]
    pub const fn policy(&self) -> GatePolicy {
        self.policy
    }

    /// Admits `text`, returning the effective query to run.
    ///
    /// - `Some(text)` — at or above the threshold, run as-is.
    /// - `Some("")` — below threshold with [`GatePolicy::TreatAsEmpty`].
    /// - `None` — below threshold with [`GatePolicy::Suppress`]; no refresh
    ///   should run at all.
    #[must_use]
    pub fn admit<'t>(&self, text: &'t str) -> Option<&'t str> {
        if text.chars().count() >= self.min_len {
            Some(text)
        } else {
            match self.policy {
                GatePolicy::Suppress => None,
                GatePolicy::TreatAsEmpty => Some(""),
            }
        }
    }
}
