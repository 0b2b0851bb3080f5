// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=bracken_a11y --heading-base-level=0

//! Bracken A11y: assistive-technology state as a pure projection.
//!
//! Nothing here talks to an accessibility API or owns markup. The crate
//! derives the *semantics* a host must publish — selected/highlighted
//! markers, the input control's current active descendant, and each visible
//! entry's 1-based position within the total count — from a read-only
//! [`ListProjection`] of the selection state.
//!
//! Two consumption styles:
//!
//! - [`snapshot`]: the full recomputed state, for hosts that re-render
//!   wholesale.
//! - [`MirrorState::transition`]: ordered marker ops for hosts that poke
//!   attributes on retained nodes. Ops clear the previous holder of a
//!   marker strictly before setting the new one, so no two nodes ever carry
//!   the same marker simultaneously — the same leave-before-enter
//!   discipline hover tracking uses.
//!
//! The node identifier `K` is caller-chosen; any small copyable handle
//! works.
//!
//! ## Minimal example
//!
//! ```rust
//! use bracken_a11y::{ListProjection, MarkerOp, MirrorState};
//!
//! let mut mirror: MirrorState<u32> = MirrorState::new();
//! let ops = mirror.transition(&ListProjection {
//!     visible: &[1, 2, 3],
//!     active: Some(2),
//!     selected: None,
//!     expanded: true,
//! });
//! assert_eq!(&ops[..], &[MarkerOp::SetHighlight(2), MarkerOp::ActiveDescendant(Some(2))]);
//!
//! // Moving the highlight clears entry 2 before marking entry 3.
//! let ops = mirror.transition(&ListProjection {
//!     visible: &[1, 2, 3],
//!     active: Some(3),
//!     selected: None,
//!     expanded: true,
//! });
//! assert_eq!(
//!     &ops[..],
//!     &[
//!         MarkerOp::ClearHighlight(2),
//!         MarkerOp::SetHighlight(3),
//!         MarkerOp::ActiveDescendant(Some(3)),
//!     ],
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use smallvec::SmallVec;

/// Read-only view of the selection state the mirror projects from.
///
/// Hosts build one per update from whatever owns the real state; all fields
/// are plain data.
#[derive(Clone, Debug)]
pub struct ListProjection<'a, K> {
    /// The visible entries in display order.
    pub visible: &'a [K],
    /// The highlighted entry, if any. Must be a member of `visible`.
    pub active: Option<K>,
    /// The committed entry, if any.
    pub selected: Option<K>,
    /// Whether the list is open.
    pub expanded: bool,
}

/// Assistive-technology attributes for one visible entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AccessAttrs<K> {
    /// The entry's node.
    pub id: K,
    /// 1-based position within the visible set.
    pub position: usize,
    /// Total visible count.
    pub set_size: usize,
    /// Carries the "selected" marker.
    pub selected: bool,
    /// Carries the "highlighted" marker.
    pub highlighted: bool,
}

/// The fully recomputed assistive-technology state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot<K> {
    /// Per-entry attributes, in display order.
    pub entries: Vec<AccessAttrs<K>>,
    /// The node published as the input control's active descendant.
    pub active_descendant: Option<K>,
    /// Whether the list reports itself expanded.
    pub expanded: bool,
}

/// Recomputes the full assistive-technology state from a projection.
#[must_use]
pub fn snapshot<K: Copy + Eq>(projection: &ListProjection<'_, K>) -> Snapshot<K> {
    let set_size = projection.visible.len();
    let entries = projection
        .visible
        .iter()
        .enumerate()
        .map(|(index, &id)| AccessAttrs {
            id,
            position: index + 1,
            set_size,
            selected: projection.selected == Some(id),
            highlighted: projection.active == Some(id),
        })
        .collect();
    Snapshot {
        entries,
        active_descendant: if projection.expanded {
            projection.active
        } else {
            None
        },
        expanded: projection.expanded,
    }
}

/// One marker mutation for hosts that patch retained nodes.
///
/// Within a single transition, every `Clear*` op precedes every `Set*` op.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerOp<K> {
    /// Remove the "highlighted" marker from this node.
    ClearHighlight(K),
    /// Remove the "selected" marker from this node.
    ClearSelected(K),
    /// Apply the "highlighted" marker to this node.
    SetHighlight(K),
    /// Apply the "selected" marker to this node.
    SetSelected(K),
    /// Publish this node as the input control's active descendant
    /// (`None` retracts it).
    ActiveDescendant(Option<K>),
}

/// Marker ops emitted by one [`MirrorState::transition`] call.
pub type MarkerOps<K> = SmallVec<[MarkerOp<K>; 5]>;

/// Remembers which nodes currently carry markers, and diffs against each
/// new projection.
#[derive(Clone, Debug, Default)]
pub struct MirrorState<K> {
    active: Option<K>,
    selected: Option<K>,
    published: Option<K>,
}

impl<K: Copy + Eq> MirrorState<K> {
    /// A mirror with no markers applied yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: None,
            selected: None,
            published: None,
        }
    }

    /// The node currently carrying the "highlighted" marker.
    #[must_use]
    pub fn active(&self) -> Option<K> {
        self.active
    }

    /// The node currently carrying the "selected" marker.
    #[must_use]
    pub fn selected(&self) -> Option<K> {
        self.selected
    }

    /// Diffs the projection against the applied markers.
    ///
    /// Clears come strictly before sets, so a host applying ops in order
    /// never shows two nodes with the same marker at once. The active
    /// descendant is only published while the list is expanded.
    pub fn transition(&mut self, projection: &ListProjection<'_, K>) -> MarkerOps<K> {
        let mut ops = MarkerOps::new();

        let next_active = if projection.expanded {
            projection.active
        } else {
            None
        };
        let next_selected = projection.selected;

        if self.active != next_active {
            if let Some(old) = self.active {
                ops.push(MarkerOp::ClearHighlight(old));
            }
        }
        if self.selected != next_selected {
            if let Some(old) = self.selected {
                ops.push(MarkerOp::ClearSelected(old));
            }
        }
        if self.active != next_active {
            if let Some(new) = next_active {
                ops.push(MarkerOp::SetHighlight(new));
            }
            self.active = next_active;
        }
        if self.selected != next_selected {
            if let Some(new) = next_selected {
                ops.push(MarkerOp::SetSelected(new));
            }
            self.selected = next_selected;
        }
        if self.published != next_active {
            ops.push(MarkerOp::ActiveDescendant(next_active));
            self.published = next_active;
        }

        ops
    }
}
