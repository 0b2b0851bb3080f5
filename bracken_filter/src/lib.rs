// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=bracken_filter --heading-base-level=0

//! Bracken Filter: the refresh pipeline for searchable selection widgets.
//!
//! This crate decides *when* a query runs and *which* responses may be
//! applied; the sibling catalog crate decides what the results address.
//! It has no timers and no async runtime: hosts feed event timestamps in
//! milliseconds and poll for due work, which keeps the whole pipeline
//! single-threaded and deterministic.
//!
//! - [`Debounce`]: a single-slot quiet-period deadline. Scheduling
//!   unconditionally supersedes a pending deadline; there is no timer queue.
//! - [`LengthGate`]: the minimum-input-length policy. Short queries either
//!   suppress the refresh entirely ([`GatePolicy::Suppress`]) or are coerced
//!   to the empty query ([`GatePolicy::TreatAsEmpty`]).
//! - [`FilterEngine`]: combines both with a monotone generation counter.
//!   Every issued [`FilterQuery`] carries a generation; only a response
//!   matching the highest generation issued so far passes
//!   [`FilterEngine::accepts`], which is what makes out-of-order async
//!   responses harmless.
//! - [`substring_filter`]: the synchronous local variant — case-insensitive
//!   containment over catalog labels, preserving catalog order.
//!
//! ## Minimal example
//!
//! ```rust
//! use bracken_filter::{FilterEngine, InputDisposition, LengthGate};
//!
//! let mut engine = FilterEngine::new(350, LengthGate::pass_all());
//!
//! // Two keystrokes inside one quiet period: the second supersedes.
//! assert!(matches!(engine.note_input("a", 1_000), InputDisposition::Scheduled));
//! assert!(matches!(engine.note_input("ab", 1_100), InputDisposition::Scheduled));
//! assert!(engine.poll(1_200).is_none()); // still quiet
//!
//! let query = engine.poll(1_450).expect("quiet period elapsed");
//! assert_eq!(query.text, "ab");
//! assert!(engine.accepts(query.generation));
//!
//! // A newer query makes the older response stale.
//! let newer = engine.issue("abc");
//! assert!(!engine.accepts(query.generation));
//! assert!(engine.accepts(newer.generation));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod debounce;
mod engine;
mod gate;
mod local;

pub use debounce::Debounce;
pub use engine::{FilterEngine, FilterQuery, InputDisposition};
pub use gate::{GatePolicy, LengthGate};
pub use local::substring_filter;
