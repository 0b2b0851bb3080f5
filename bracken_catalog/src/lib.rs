// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=bracken_catalog --heading-base-level=0

//! Bracken Catalog: the entry arena behind searchable selection widgets.
//!
//! This crate owns the data side of a dropdown/typeahead core:
//!
//! - [`Projection`]: host-supplied derivation functions mapping raw records
//!   into display labels, renderable content handles, and optional identity
//!   keys.
//! - [`Catalog`]: an arena of immutable [`Entry`] values, rebuilt wholesale
//!   whenever the backing data is replaced. Entries are addressed by
//!   epoch-tagged [`EntryId`] handles, so ids minted against a replaced
//!   catalog resolve to `None` instead of aliasing fresh entries.
//! - [`Ring`]: an explicitly-owned index array over the currently navigable
//!   subset. `next`/`prev` are modular arithmetic over the array, and the
//!   whole ring is replaced in one `relink` call; there are no stored
//!   next/prev pointers to go stale.
//!
//! The catalog deliberately does **not** know about rendering, filtering
//! policy, or selection state. Host frameworks and the sibling crates are
//! responsible for deciding *which* ids to relink and *when*.
//!
//! ## Minimal example
//!
//! ```rust
//! use bracken_catalog::{Catalog, Projection, Ring};
//!
//! let projection = Projection::text(|s: &&str| Some(s.to_string()));
//! let catalog = Catalog::build(["ash", "beech", "cedar"], &projection);
//!
//! // Link the full catalog as the navigable cycle.
//! let ring = Ring::linked(catalog.ids().collect());
//! assert_eq!(ring.len(), 3);
//!
//! // Stepping forward from the last position wraps to the first.
//! let last = ring.len() - 1;
//! assert_eq!(ring.next_of(last), 0);
//! assert_eq!(catalog.label(ring.id_at(0).unwrap()), Some("ash"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod catalog;
mod ring;

pub use catalog::{Catalog, Entry, EntryId, EntryKey, Projection};
pub use ring::{Ring, StepDirection};
