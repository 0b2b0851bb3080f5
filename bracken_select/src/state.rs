// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dual-mode selection state machine.

use bracken_catalog::{EntryId, Ring, StepDirection};

/// Result of a commit or programmatic selection write.
///
/// Carries the entry ids before and after; whether the change is a
/// *notifiable* change is decided above this layer, where identity keys
/// live.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CommitOutcome {
    /// The selected entry before the transition.
    pub previous: Option<EntryId>,
    /// The selected entry after the transition.
    pub current: Option<EntryId>,
}

impl CommitOutcome {
    /// Whether the entry id changed at all.
    #[must_use]
    pub fn id_changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Outcome of a navigation intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// Nothing happened: empty visible set, or closed without the
    /// cycle-when-closed policy.
    Ignored,
    /// The highlight moved to this entry (open-list navigation).
    Highlighted(EntryId),
    /// Closed-cycle navigation stepped the selection and committed it
    /// immediately.
    Committed(CommitOutcome),
}

/// Open/closed state, highlight, committed selection, and the visible ring.
///
/// Invariants:
///
/// - `active` is a position into the current ring or `None`; it never
///   dangles, because every ring replacement remaps it by id.
/// - Closing (commit or dismiss) always resets `active` to `None`.
/// - `selected` persists across open/close cycles; dismiss never touches it.
/// - While closed the ring is retained (stale but addressable) so the
///   closed-cycle policy can step whatever subset was last linked.
#[derive(Debug)]
pub struct SelectionState {
    open: bool,
    ring: Ring,
    active: Option<usize>,
    selected: Option<EntryId>,
    cycle_when_closed: bool,
}

impl SelectionState {
    /// Creates a closed machine with an empty ring.
    #[must_use]
    pub fn new(cycle_when_closed: bool) -> Self {
        Self {
            open: false,
            ring: Ring::new(),
            active: None,
            selected: None,
            cycle_when_closed,
        }
    }

    /// Whether the list is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The visible ids in display order (stale while closed).
    #[must_use]
    pub fn visible(&self) -> &[EntryId] {
        self.ring.ids()
    }

    /// The highlighted entry, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<EntryId> {
        self.active.and_then(|pos| self.ring.id_at(pos))
    }

    /// The committed entry, if any.
    #[must_use]
    pub const fn selected_id(&self) -> Option<EntryId> {
        self.selected
    }

    /// Opens the list over `ring`, restoring the highlight to the selected
    /// entry's position when it is part of the visible set.
    pub fn open_with(&mut self, ring: Ring) {
        self.ring = ring;
        self.open = true;
        self.active = self.selected.and_then(|id| self.ring.position_of(id));
    }

    /// Replaces the visible set atomically (a filter pass landing mid-open).
    ///
    /// Both the ring and the highlight change in this single call, so no
    /// later navigation event can observe a half-rebuilt cycle. The
    /// highlight is remapped by id into the new ring and dropped if its
    /// entry is no longer visible.
    pub fn replace_visible(&mut self, ring: Ring) {
        let active_id = self.active.and_then(|pos| self.ring.id_at(pos));
        self.ring = ring;
        self.active = active_id.and_then(|id| self.ring.position_of(id));
    }

    /// Re-points the committed selection at a new id without emitting a
    /// transition (used after a catalog rebuild re-locates the same logical
    /// record).
    pub fn rebind_selected(&mut self, id: Option<EntryId>) {
        self.selected = id;
    }

    /// Restores the highlight to the selected entry's position, if the list
    /// is open, nothing is highlighted, and the entry is visible.
    pub fn restore_active(&mut self) {
        if self.open && self.active.is_none() {
            self.active = self.selected.and_then(|id| self.ring.position_of(id));
        }
    }

    /// Resolves an ArrowUp/ArrowDown intent.
    pub fn navigate(&mut self, direction: StepDirection) -> NavOutcome {
        if self.open {
            self.navigate_open(direction)
        } else if self.cycle_when_closed {
            self.cycle_closed(direction)
        } else {
            NavOutcome::Ignored
        }
    }

    fn navigate_open(&mut self, direction: StepDirection) -> NavOutcome {
        if self.ring.is_empty() {
            return NavOutcome::Ignored;
        }
        let pos = match (self.active, direction) {
            (Some(pos), _) => self.ring.step(pos, direction),
            // First arrow press: Down starts at the top, Up at the bottom.
            (None, StepDirection::Forward) => 0,
            (None, StepDirection::Backward) => self.ring.len() - 1,
        };
        match self.ring.id_at(pos) {
            Some(id) => {
                self.active = Some(pos);
                NavOutcome::Highlighted(id)
            }
            None => NavOutcome::Ignored,
        }
    }

    fn cycle_closed(&mut self, direction: StepDirection) -> NavOutcome {
        if self.ring.is_empty() {
            return NavOutcome::Ignored;
        }
        let pos = match self.selected.and_then(|id| self.ring.position_of(id)) {
            Some(pos) => self.ring.step(pos, direction),
            // No selection (or it fell out of the last-linked ring): Down
            // commits the first ring entry, Up the last.
            None => match direction {
                StepDirection::Forward => 0,
                StepDirection::Backward => self.ring.len() - 1,
            },
        };
        let previous = self.selected;
        self.selected = self.ring.id_at(pos);
        NavOutcome::Committed(CommitOutcome {
            previous,
            current: self.selected,
        })
    }

    /// Jumps the highlight to the first visible entry (open only).
    pub fn highlight_first(&mut self) -> NavOutcome {
        self.highlight_at(self.ring.first())
    }

    /// Jumps the highlight to the last visible entry (open only).
    pub fn highlight_last(&mut self) -> NavOutcome {
        self.highlight_at(self.ring.last())
    }

    fn highlight_at(&mut self, pos: Option<usize>) -> NavOutcome {
        if !self.open {
            return NavOutcome::Ignored;
        }
        match pos.and_then(|p| self.ring.id_at(p).map(|id| (p, id))) {
            Some((p, id)) => {
                self.active = Some(p);
                NavOutcome::Highlighted(id)
            }
            None => NavOutcome::Ignored,
        }
    }

    /// Commits the highlighted entry and closes.
    ///
    /// With nothing highlighted this clears the selection: committing "no
    /// highlight" is defined as "no selection".
    pub fn commit(&mut self) -> CommitOutcome {
        let previous = self.selected;
        let current = self.active.and_then(|pos| self.ring.id_at(pos));
        self.selected = current;
        self.close();
        CommitOutcome { previous, current }
    }

    /// Commits a specific visible entry (pointer press) and closes.
    ///
    /// Returns `None` when the list is closed or `id` is not in the visible
    /// set; nothing changes in that case.
    pub fn commit_entry(&mut self, id: EntryId) -> Option<CommitOutcome> {
        if !self.open || self.ring.position_of(id).is_none() {
            return None;
        }
        let previous = self.selected;
        self.selected = Some(id);
        self.close();
        Some(CommitOutcome {
            previous,
            current: Some(id),
        })
    }

    /// Closes without changing the selection (Escape/blur).
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// Writes the selection directly (programmatic surface). Does not open
    /// or close the list.
    pub fn set_selected(&mut self, id: Option<EntryId>) -> CommitOutcome {
        let previous = self.selected;
        self.selected = id;
        CommitOutcome {
            previous,
            current: id,
        }
    }

    /// Replaces the ring and selection wholesale (backing data replaced).
    /// Closes the list; the old visible set is meaningless for new data.
    pub fn reset_with(&mut self, ring: Ring, selected: Option<EntryId>) -> CommitOutcome {
        let previous = self.selected;
        self.ring = ring;
        self.selected = selected;
        self.close();
        CommitOutcome {
            previous,
            current: selected,
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use bracken_catalog::{Catalog, Projection};

    fn ids(n: usize) -> Vec<EntryId> {
        let projection = Projection::text(|i: &usize| {
            use alloc::string::ToString;
            Some(i.to_string())
        });
        let catalog = Catalog::build(0..n, &projection);
        catalog.ids().collect()
    }

    fn opened(n: usize, cycle: bool) -> (SelectionState, Vec<EntryId>) {
        let ids = ids(n);
        let mut state = SelectionState::new(cycle);
        state.open_with(Ring::linked(ids.clone()));
        (state, ids)
    }

    #[test]
    fn arrow_down_walks_and_wraps() {
        // Catalog [A, B, C]: Down highlights A, B, C, then wraps to A.
        let (mut state, ids) = opened(3, false);
        assert_eq!(
            state.navigate(StepDirection::Forward),
            NavOutcome::Highlighted(ids[0])
        );
        assert_eq!(
            state.navigate(StepDirection::Forward),
            NavOutcome::Highlighted(ids[1])
        );
        assert_eq!(
            state.navigate(StepDirection::Forward),
            NavOutcome::Highlighted(ids[2])
        );
        assert_eq!(
            state.navigate(StepDirection::Forward),
            NavOutcome::Highlighted(ids[0])
        );
    }

    #[test]
    fn cyclic_closure_returns_to_first_after_len_steps() {
        let (mut state, ids) = opened(5, false);
        // Establish the highlight on the first entry…
        assert_eq!(
            state.navigate(StepDirection::Forward),
            NavOutcome::Highlighted(ids[0])
        );
        // …then a full lap of len() steps comes back to it.
        for _ in 0..5 {
            state.navigate(StepDirection::Forward);
        }
        assert_eq!(state.active_id(), Some(ids[0]));
    }

    #[test]
    fn first_arrow_up_starts_at_the_bottom() {
        let (mut state, ids) = opened(3, false);
        assert_eq!(
            state.navigate(StepDirection::Backward),
            NavOutcome::Highlighted(ids[2])
        );
        assert_eq!(
            state.navigate(StepDirection::Backward),
            NavOutcome::Highlighted(ids[1])
        );
    }

    #[test]
    fn navigating_an_empty_visible_set_is_a_noop() {
        let mut state = SelectionState::new(false);
        state.open_with(Ring::new());
        assert_eq!(state.navigate(StepDirection::Forward), NavOutcome::Ignored);
        assert_eq!(state.navigate(StepDirection::Backward), NavOutcome::Ignored);
        assert_eq!(state.active_id(), None);
    }

    #[test]
    fn commit_selects_active_closes_and_resets_highlight() {
        let (mut state, ids) = opened(3, false);
        state.navigate(StepDirection::Forward);
        let outcome = state.commit();
        assert_eq!(outcome.previous, None);
        assert_eq!(outcome.current, Some(ids[0]));
        assert!(outcome.id_changed());
        assert!(!state.is_open());
        assert_eq!(state.active_id(), None);
        assert_eq!(state.selected_id(), Some(ids[0]));
    }

    #[test]
    fn commit_without_highlight_clears_selection() {
        let (mut state, ids) = opened(3, false);
        state.navigate(StepDirection::Forward);
        state.commit();
        // Reopen: highlight restored to the selected entry; clear it by
        // replacing the visible set with a ring that excludes it.
        state.open_with(Ring::linked(ids.clone()));
        state.replace_visible(Ring::linked(alloc::vec![ids[1], ids[2]]));
        assert_eq!(state.active_id(), None);
        let outcome = state.commit();
        assert_eq!(outcome.previous, Some(ids[0]));
        assert_eq!(outcome.current, None);
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn dismiss_never_touches_the_selection() {
        let (mut state, ids) = opened(3, false);
        state.navigate(StepDirection::Forward);
        state.commit();
        state.open_with(Ring::linked(ids.clone()));
        state.navigate(StepDirection::Forward); // highlight moves off the selection
        state.dismiss();
        assert!(!state.is_open());
        assert_eq!(state.active_id(), None);
        assert_eq!(state.selected_id(), Some(ids[0]));
    }

    #[test]
    fn reopening_restores_highlight_to_selected() {
        let (mut state, ids) = opened(3, false);
        state.navigate(StepDirection::Forward);
        state.navigate(StepDirection::Forward);
        state.commit(); // selected = B
        state.open_with(Ring::linked(ids.clone()));
        assert_eq!(state.active_id(), Some(ids[1]));
        // The next Down continues from the restored highlight.
        assert_eq!(
            state.navigate(StepDirection::Forward),
            NavOutcome::Highlighted(ids[2])
        );
    }

    #[test]
    fn commit_entry_commits_a_visible_entry_only() {
        let (mut state, ids) = opened(3, false);
        let outcome = state.commit_entry(ids[2]).unwrap();
        assert_eq!(outcome.current, Some(ids[2]));
        assert!(!state.is_open());

        // Closed list: pointer commits are ignored.
        assert!(state.commit_entry(ids[1]).is_none());
        assert_eq!(state.selected_id(), Some(ids[2]));
    }

    #[test]
    fn commit_entry_rejects_ids_outside_the_visible_set() {
        let ids = ids(3);
        let mut state = SelectionState::new(false);
        state.open_with(Ring::linked(alloc::vec![ids[0]]));
        assert!(state.commit_entry(ids[2]).is_none());
        assert!(state.is_open());
    }

    #[test]
    fn closed_cycle_steps_the_last_linked_ring_and_commits() {
        let (mut state, ids) = opened(3, true);
        state.navigate(StepDirection::Forward);
        state.commit(); // selected = A, closed
        let outcome = state.navigate(StepDirection::Forward);
        assert_eq!(
            outcome,
            NavOutcome::Committed(CommitOutcome {
                previous: Some(ids[0]),
                current: Some(ids[1]),
            })
        );
        assert!(!state.is_open());
        // Wraps from the end back to the start.
        state.navigate(StepDirection::Forward); // C
        let outcome = state.navigate(StepDirection::Forward);
        assert_eq!(
            outcome,
            NavOutcome::Committed(CommitOutcome {
                previous: Some(ids[2]),
                current: Some(ids[0]),
            })
        );
    }

    #[test]
    fn closed_cycle_without_selection_commits_first_or_last() {
        let ids = ids(3);
        let mut state = SelectionState::new(true);
        state.reset_with(Ring::linked(ids.clone()), None);
        let outcome = state.navigate(StepDirection::Backward);
        assert_eq!(
            outcome,
            NavOutcome::Committed(CommitOutcome {
                previous: None,
                current: Some(ids[2]),
            })
        );
    }

    #[test]
    fn closed_navigation_without_cycle_policy_is_a_noop() {
        let ids = ids(3);
        let mut state = SelectionState::new(false);
        state.reset_with(Ring::linked(ids), None);
        assert_eq!(state.navigate(StepDirection::Forward), NavOutcome::Ignored);
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn replace_visible_remaps_the_highlight_by_id() {
        let (mut state, ids) = opened(4, false);
        state.navigate(StepDirection::Forward);
        state.navigate(StepDirection::Forward); // active = B at position 1
        state.replace_visible(Ring::linked(alloc::vec![ids[1], ids[3]]));
        assert_eq!(state.active_id(), Some(ids[1]));
        // B now sits at position 0 of the narrowed ring; Down goes to D.
        assert_eq!(
            state.navigate(StepDirection::Forward),
            NavOutcome::Highlighted(ids[3])
        );
    }

    #[test]
    fn replace_visible_drops_a_filtered_out_highlight() {
        let (mut state, ids) = opened(3, false);
        state.navigate(StepDirection::Forward); // active = A
        state.replace_visible(Ring::linked(alloc::vec![ids[1], ids[2]]));
        assert_eq!(state.active_id(), None);
        // Navigation picks up cleanly from the top of the new ring.
        assert_eq!(
            state.navigate(StepDirection::Forward),
            NavOutcome::Highlighted(ids[1])
        );
    }

    #[test]
    fn restore_active_only_fills_an_empty_highlight() {
        let (mut state, ids) = opened(3, false);
        state.commit_entry(ids[1]);
        state.open_with(Ring::linked(ids.clone()));
        state.navigate(StepDirection::Forward); // highlight moved by the user
        let highlighted = state.active_id();
        state.restore_active();
        assert_eq!(state.active_id(), highlighted);

        state.replace_visible(Ring::linked(alloc::vec![ids[1]]));
        // replace dropped the highlight if it vanished; restoring goes back
        // to the selection when it is visible.
        state.restore_active();
        assert_eq!(state.active_id(), state.selected_id());
    }

    #[test]
    fn highlight_first_and_last_jump_while_open() {
        let (mut state, ids) = opened(4, false);
        assert_eq!(state.highlight_last(), NavOutcome::Highlighted(ids[3]));
        assert_eq!(state.highlight_first(), NavOutcome::Highlighted(ids[0]));
        state.dismiss();
        assert_eq!(state.highlight_first(), NavOutcome::Ignored);
    }

    #[test]
    fn reset_with_replaces_ring_and_selection_and_closes() {
        use alloc::string::ToString;
        let projection = Projection::text(|i: &usize| Some(i.to_string()));
        let mut catalog = Catalog::build(0..3, &projection);
        let ids: Vec<EntryId> = catalog.ids().collect();

        let mut state = SelectionState::new(false);
        state.open_with(Ring::linked(ids.clone()));
        state.navigate(StepDirection::Forward);

        // The backing data is replaced; ids from the old epoch go stale.
        catalog.replace(0..2, &projection);
        let fresh: Vec<EntryId> = catalog.ids().collect();
        let outcome = state.reset_with(Ring::linked(fresh.clone()), Some(fresh[0]));
        assert_eq!(outcome.previous, None);
        assert_eq!(outcome.current, Some(fresh[0]));
        assert!(!state.is_open());
        assert_eq!(state.active_id(), None);
        assert_eq!(state.visible(), &fresh[..]);
        // Old-epoch ids are gone from the ring.
        assert!(!state.visible().contains(&ids[0]));
    }
}
