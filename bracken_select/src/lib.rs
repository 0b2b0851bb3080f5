// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=bracken_select --heading-base-level=0

//! Bracken Select: the selection state machine behind dropdowns and typeaheads.
//!
//! This crate resolves keyboard and pointer input into selection-state
//! transitions over a navigable ring of catalog entries. It is the seam
//! between the data crates ([`bracken_catalog`], [`bracken_filter`]) and a
//! host shell that owns rendering, focus, and the event loop.
//!
//! Two layers:
//!
//! - [`SelectionState`]: the bare machine. Open/closed, the active
//!   (highlighted) position, the committed (selected) entry, and the
//!   visible ring. Every transition returns a typed outcome; nothing here
//!   knows about records, labels, or queries.
//! - [`SelectCore`]: the host-facing widget core. It owns a catalog, a
//!   projection, a refresh engine, and the machine, and turns every input
//!   into a [`Reaction`] describing what the host must do: suppress native
//!   key handling, run a deferred fetch, mirror the highlighted label into
//!   the input, or deliver a [`SelectEvent`].
//!
//! The plain selector, local typeahead, and dynamic typeahead are the same
//! type configured differently: [`SelectPolicies`] holds the
//! cycle-when-closed flag, debounce quiet period, minimum-length gate, and
//! [`SourceMode`]. There is no widget subclassing.
//!
//! ## Minimal example
//!
//! ```rust
//! use bracken_catalog::Projection;
//! use bracken_select::{Key, Modifiers, SelectCore, SelectEvent, SelectPolicies};
//!
//! let mut core = SelectCore::builder()
//!     .projection(Projection::text(|s: &&str| Some(s.to_string())))
//!     .policies(SelectPolicies::typeahead())
//!     .records(["ash", "beech", "cedar"])
//!     .build()
//!     .unwrap();
//!
//! core.open();
//! // ArrowDown highlights the first visible entry…
//! let reaction = core.handle_key(Key::ArrowDown, Modifiers::empty());
//! assert!(reaction.handled);
//! assert_eq!(reaction.preview.as_deref(), Some("ash"));
//!
//! // …and Enter commits it, closing the list and notifying once.
//! let reaction = core.handle_key(Key::Enter, Modifiers::empty());
//! assert!(matches!(reaction.event, Some(SelectEvent::SelectionChanged(Some("ash")))));
//! assert_eq!(core.label(), Some("ash"));
//! assert!(!core.is_open());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod input;
mod select;
mod state;

pub use config::{ConfigError, DEFAULT_QUIET_MS, SelectPolicies, SourceMode};
pub use input::{Key, Modifiers, TextCommand};
pub use select::{Reaction, RefreshError, SelectCore, SelectCoreBuilder, SelectEvent};
pub use state::{CommitOutcome, NavOutcome, SelectionState};
