// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instantiation policies.
//!
//! The plain selector, local typeahead, and dynamic typeahead differ only in
//! these values plus the [`SourceMode`]; there is no widget hierarchy.

use core::fmt;

use bracken_filter::GatePolicy;

/// Reference debounce quiet period for deferred sources, in milliseconds.
pub const DEFAULT_QUIET_MS: u64 = 350;

/// Where refreshed visible sets come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceMode {
    /// Synchronous case-insensitive substring match over the catalog.
    Local,
    /// The host's fetch delegate runs each issued query; results replace
    /// the catalog via
    /// [`SelectCore::complete_refresh`](crate::SelectCore::complete_refresh).
    Deferred,
}

/// Behavior switches for one widget instantiation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectPolicies {
    /// ArrowUp/ArrowDown while closed steps the last-linked ring and commits
    /// immediately (the no-dropdown scroll-through behavior). Disabled for
    /// filtered typeahead variants.
    pub cycle_when_closed: bool,
    /// Debounce quiet period for keystroke-driven refreshes; `0` refreshes
    /// synchronously on every keystroke.
    pub quiet_ms: u64,
    /// Minimum query length before a refresh may run.
    pub min_query_len: usize,
    /// What to do with queries shorter than `min_query_len`.
    pub gate: GatePolicy,
    /// Local filtering or host-deferred fetching.
    pub source: SourceMode,
}

impl SelectPolicies {
    /// The plain dropdown selector: no typing, closed-cycle navigation.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            cycle_when_closed: true,
            quiet_ms: 0,
            min_query_len: 0,
            gate: GatePolicy::Suppress,
            source: SourceMode::Local,
        }
    }

    /// The local typeahead: synchronous filtering, no closed cycling.
    #[must_use]
    pub const fn typeahead() -> Self {
        Self {
            cycle_when_closed: false,
            quiet_ms: 0,
            min_query_len: 0,
            gate: GatePolicy::Suppress,
            source: SourceMode::Local,
        }
    }

    /// The dynamic typeahead: debounced queries against a host-supplied
    /// fetch delegate.
    #[must_use]
    pub const fn dynamic() -> Self {
        Self {
            cycle_when_closed: false,
            quiet_ms: DEFAULT_QUIET_MS,
            min_query_len: 0,
            gate: GatePolicy::Suppress,
            source: SourceMode::Deferred,
        }
    }
}

/// A configuration rejected at construction.
///
/// Misconfiguration surfaces when the widget core is built, never at first
/// use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No [`Projection`](bracken_catalog::Projection) was supplied; the core
    /// cannot derive labels or content without one.
    MissingProjection,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProjection => {
                write!(f, "a projection (label/content derivation) is required")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_only_in_policy_values() {
        let plain = SelectPolicies::plain();
        assert!(plain.cycle_when_closed);
        assert_eq!(plain.source, SourceMode::Local);

        let typeahead = SelectPolicies::typeahead();
        assert!(!typeahead.cycle_when_closed);
        assert_eq!(typeahead.quiet_ms, 0);

        let dynamic = SelectPolicies::dynamic();
        assert_eq!(dynamic.source, SourceMode::Deferred);
        assert_eq!(dynamic.quiet_ms, DEFAULT_QUIET_MS);
    }
}
