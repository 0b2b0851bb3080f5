// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigable ring: a relinkable index array with cyclic stepping.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::EntryId;

/// Direction of a single navigation step around the ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StepDirection {
    /// Towards the next entry in linked order.
    Forward,
    /// Towards the previous entry in linked order.
    Backward,
}

/// The currently navigable cycle over a catalog subset.
///
/// A ring is an ordered list of entry ids plus an id → position map. It is
/// replaced wholesale by [`Ring::relink`]; stepping is plain modular
/// arithmetic over positions, so a non-empty ring is always exactly one
/// cycle with no sub-cycles or dangling links. Entries not included in the
/// last relink are simply not addressable until a later relink includes
/// them.
#[derive(Clone, Debug, Default)]
pub struct Ring {
    order: Vec<EntryId>,
    positions: HashMap<EntryId, usize>,
}

impl Ring {
    /// An empty ring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ring linked over `ids` in the given order.
    #[must_use]
    pub fn linked(ids: Vec<EntryId>) -> Self {
        let mut ring = Self::new();
        ring.relink(ids);
        ring
    }

    /// Rewrites the cycle to cover exactly `ids`, in the given order. O(n).
    pub fn relink(&mut self, ids: Vec<EntryId>) {
        self.positions.clear();
        self.positions.reserve(ids.len());
        for (pos, &id) in ids.iter().enumerate() {
            self.positions.insert(id, pos);
        }
        debug_assert_eq!(
            self.positions.len(),
            ids.len(),
            "ring ids must be unique within one relink"
        );
        self.order = ids;
    }

    /// Unlinks everything.
    pub fn clear(&mut self) {
        self.order.clear();
        self.positions.clear();
    }

    /// Number of linked entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is linked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The linked ids in display order.
    #[must_use]
    pub fn ids(&self) -> &[EntryId] {
        &self.order
    }

    /// The id at `pos`, if in range.
    #[must_use]
    pub fn id_at(&self, pos: usize) -> Option<EntryId> {
        self.order.get(pos).copied()
    }

    /// The ring position of `id`, if currently linked.
    #[must_use]
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// The position after `pos`, wrapping past the end.
    ///
    /// The ring must be non-empty and `pos` in range.
    #[must_use]
    pub fn next_of(&self, pos: usize) -> usize {
        debug_assert!(pos < self.order.len(), "position out of ring range");
        (pos + 1) % self.order.len()
    }

    /// The position before `pos`, wrapping past the start.
    ///
    /// The ring must be non-empty and `pos` in range.
    #[must_use]
    pub fn prev_of(&self, pos: usize) -> usize {
        debug_assert!(pos < self.order.len(), "position out of ring range");
        (pos + self.order.len() - 1) % self.order.len()
    }

    /// Steps one position in `direction`, wrapping cyclically.
    #[must_use]
    pub fn step(&self, pos: usize, direction: StepDirection) -> usize {
        match direction {
            StepDirection::Forward => self.next_of(pos),
            StepDirection::Backward => self.prev_of(pos),
        }
    }

    /// The first linked position, if any.
    #[must_use]
    pub fn first(&self) -> Option<usize> {
        if self.order.is_empty() { None } else { Some(0) }
    }

    /// The last linked position, if any.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.order.len().checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, Projection};
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    fn catalog(labels: &[&'static str]) -> Catalog<&'static str, String> {
        let projection = Projection::text(|s: &&'static str| Some((*s).to_string()));
        Catalog::build(labels.iter().copied(), &projection)
    }

    #[test]
    fn linked_ring_is_exactly_one_cycle() {
        let catalog = catalog(&["a", "b", "c", "d", "e"]);
        let ring = Ring::linked(catalog.ids().collect());

        // Following `next` len() times from any start returns to the start
        // and visits every position exactly once.
        let len = ring.len();
        for start in 0..len {
            let mut seen = Vec::new();
            let mut pos = start;
            for _ in 0..len {
                seen.push(pos);
                pos = ring.next_of(pos);
            }
            assert_eq!(pos, start);
            seen.sort_unstable();
            let expected: Vec<usize> = (0..len).collect();
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn forward_and_backward_are_inverses() {
        let catalog = catalog(&["a", "b", "c"]);
        let ring = Ring::linked(catalog.ids().collect());
        for pos in 0..ring.len() {
            assert_eq!(ring.prev_of(ring.next_of(pos)), pos);
            assert_eq!(
                ring.step(ring.step(pos, StepDirection::Backward), StepDirection::Forward),
                pos
            );
        }
    }

    #[test]
    fn wrapping_at_both_edges() {
        let catalog = catalog(&["a", "b", "c"]);
        let ring = Ring::linked(catalog.ids().collect());
        assert_eq!(ring.next_of(2), 0);
        assert_eq!(ring.prev_of(0), 2);
    }

    #[test]
    fn relink_subset_excludes_other_entries() {
        let catalog = catalog(&["a", "b", "c", "d"]);
        let ids: Vec<_> = catalog.ids().collect();

        let mut ring = Ring::linked(ids.clone());
        assert_eq!(ring.len(), 4);

        // Narrow to b, d (a filter pass).
        ring.relink(alloc::vec![ids[1], ids[3]]);
        assert_eq!(ring.len(), 2);
        assert_eq!(ring.position_of(ids[1]), Some(0));
        assert_eq!(ring.position_of(ids[3]), Some(1));
        // Entries outside the last relink are not addressable.
        assert_eq!(ring.position_of(ids[0]), None);
        assert_eq!(ring.position_of(ids[2]), None);

        // The narrowed ring is itself a single 2-cycle.
        assert_eq!(ring.next_of(1), 0);
        assert_eq!(ring.prev_of(0), 1);
    }

    #[test]
    fn relink_is_wholesale_replacement() {
        let catalog = catalog(&["a", "b", "c"]);
        let ids: Vec<_> = catalog.ids().collect();
        let mut ring = Ring::linked(alloc::vec![ids[0], ids[1]]);
        ring.relink(alloc::vec![ids[2]]);
        assert_eq!(ring.ids(), &[ids[2]]);
        assert_eq!(ring.position_of(ids[0]), None);
        assert_eq!(ring.first(), Some(0));
        assert_eq!(ring.last(), Some(0));
        assert_eq!(ring.next_of(0), 0);
    }

    #[test]
    fn empty_ring_reports_empty() {
        let ring = Ring::new();
        assert!(ring.is_empty());
        assert_eq!(ring.first(), None);
        assert_eq!(ring.last(), None);
        assert_eq!(ring.id_at(0), None);
    }

    #[test]
    fn singleton_ring_steps_to_itself() {
        let catalog = catalog(&["only"]);
        let ring = Ring::linked(catalog.ids().collect());
        assert_eq!(ring.next_of(0), 0);
        assert_eq!(ring.prev_of(0), 0);
    }
}
