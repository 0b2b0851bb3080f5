// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing widget core.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use bracken_catalog::{Catalog, EntryId, EntryKey, Projection, Ring, StepDirection};
use bracken_filter::{FilterEngine, FilterQuery, InputDisposition, LengthGate, substring_filter};

use crate::config::{ConfigError, SelectPolicies, SourceMode};
use crate::input::{Key, Modifiers, TextCommand};
use crate::state::{CommitOutcome, NavOutcome, SelectionState};

/// A failed deferred refresh, as reported by the host's fetch delegate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshError {
    /// Generation of the failed query.
    pub generation: u64,
    /// Host-provided failure description.
    pub reason: String,
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refresh (generation {}) failed: {}", self.generation, self.reason)
    }
}

impl core::error::Error for RefreshError {}

/// Notifications the host shell subscribes to.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectEvent<T> {
    /// The selection's identity changed. Carries the newly selected record,
    /// or `None` when the selection was cleared. Emitted exactly once per
    /// identity change, regardless of which surface (keyboard, pointer, or
    /// programmatic write) changed it.
    SelectionChanged(Option<T>),
    /// A deferred refresh failed. The previous visible set stands; the
    /// widget is not stuck loading.
    RefreshFailed(RefreshError),
}

/// What the host must do after feeding one input to the core.
#[derive(Debug)]
pub struct Reaction<T> {
    /// The input was consumed; suppress the native default (caret movement,
    /// scrolling, form submission).
    pub handled: bool,
    /// Run this query through the fetch delegate and report back via
    /// [`SelectCore::complete_refresh`].
    pub fetch: Option<FilterQuery>,
    /// Redirect this editing command to the text control.
    pub text_command: Option<TextCommand>,
    /// Mirror this label into the input (highlight moved without
    /// committing).
    pub preview: Option<String>,
    /// At most one notification per input.
    pub event: Option<SelectEvent<T>>,
}

impl<T> Reaction<T> {
    /// A reaction that asks nothing of the host.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            handled: false,
            fetch: None,
            text_command: None,
            preview: None,
            event: None,
        }
    }

    fn consumed() -> Self {
        Self {
            handled: true,
            ..Self::idle()
        }
    }
}

impl<T> Default for Reaction<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Snapshot of a committed selection that survives catalog replacement.
#[derive(Clone, Debug)]
struct Committed<T> {
    record: T,
    label: String,
    key: Option<EntryKey>,
}

/// Builder for [`SelectCore`]; validates the configuration at construction.
pub struct SelectCoreBuilder<T, N> {
    projection: Option<Projection<T, N>>,
    policies: SelectPolicies,
    records: Vec<T>,
    placeholder: String,
    title: String,
    disabled: bool,
}

impl<T, N> Default for SelectCoreBuilder<T, N> {
    fn default() -> Self {
        Self {
            projection: None,
            policies: SelectPolicies::plain(),
            records: Vec::new(),
            placeholder: String::new(),
            title: String::new(),
            disabled: false,
        }
    }
}

impl<T, N> fmt::Debug for SelectCoreBuilder<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectCoreBuilder")
            .field("has_projection", &self.projection.is_some())
            .field("policies", &self.policies)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl<T, N> SelectCoreBuilder<T, N> {
    /// Sets the label/content/identity derivation (required).
    #[must_use]
    pub fn projection(mut self, projection: Projection<T, N>) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Sets the behavior policies (defaults to [`SelectPolicies::plain`]).
    #[must_use]
    pub fn policies(mut self, policies: SelectPolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Seeds the initial catalog records.
    ///
    /// Seeding leaves the selection empty; [`SelectCore::store`] is the call
    /// that resets the selection to the first entry.
    #[must_use]
    pub fn records(mut self, records: impl IntoIterator<Item = T>) -> Self {
        self.records = records.into_iter().collect();
        self
    }

    /// Sets the placeholder text shown while nothing is selected.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the advisory title text.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Starts the core disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Validates the configuration and builds the core.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingProjection`] when no projection was supplied.
    pub fn build(self) -> Result<SelectCore<T, N>, ConfigError> {
        let projection = self.projection.ok_or(ConfigError::MissingProjection)?;
        let catalog = Catalog::build(self.records, &projection);
        let mut state = SelectionState::new(self.policies.cycle_when_closed);
        state.reset_with(Ring::linked(catalog.ids().collect()), None);
        let gate = LengthGate::new(self.policies.min_query_len, self.policies.gate);
        Ok(SelectCore {
            engine: FilterEngine::new(self.policies.quiet_ms, gate),
            catalog,
            projection,
            policies: self.policies,
            state,
            committed: None,
            in_flight: None,
            query_text: String::new(),
            disabled: self.disabled,
            placeholder: self.placeholder,
            title: self.title,
        })
    }
}

/// The searchable-selection widget core.
///
/// Owns the catalog, the refresh engine, and the selection state machine,
/// and exposes the full host surface: keyboard and pointer input, text
/// queries, the host-driven clock (`poll`), deferred-refresh completion, and
/// the programmatic selection accessors. Every mutating call returns a
/// [`Reaction`] telling the host what to do next.
#[derive(Debug)]
pub struct SelectCore<T, N> {
    catalog: Catalog<T, N>,
    projection: Projection<T, N>,
    policies: SelectPolicies,
    engine: FilterEngine,
    state: SelectionState,
    committed: Option<Committed<T>>,
    in_flight: Option<u64>,
    query_text: String,
    disabled: bool,
    placeholder: String,
    title: String,
}

impl<T, N> SelectCore<T, N> {
    /// Starts building a core.
    #[must_use]
    pub fn builder() -> SelectCoreBuilder<T, N> {
        SelectCoreBuilder::default()
    }

    /// Whether the list is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The current visible set, read-only, in display order.
    #[must_use]
    pub fn items(&self) -> &[EntryId] {
        self.state.visible()
    }

    /// The highlighted entry, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<EntryId> {
        self.state.active_id()
    }

    /// The committed entry's id, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<EntryId> {
        self.state.selected_id()
    }

    /// The committed record, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.committed.as_ref().map(|c| &c.record)
    }

    /// The committed entry's rendered label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.committed.as_ref().map(|c| c.label.as_str())
    }

    /// The current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query_text
    }

    /// The generation of the fetch in flight, if any.
    #[must_use]
    pub fn pending_fetch(&self) -> Option<u64> {
        self.in_flight
    }

    /// The backing catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog<T, N> {
        &self.catalog
    }

    /// The configured policies.
    #[must_use]
    pub fn policies(&self) -> SelectPolicies {
        self.policies
    }

    /// Whether input is ignored.
    #[must_use]
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables input. Disabling an open core closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && self.state.is_open() {
            self.engine.cancel();
            self.state.dismiss();
        }
    }

    /// The placeholder text shown while nothing is selected.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Sets the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// The advisory title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the advisory title text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

impl<T: Clone, N> SelectCore<T, N> {
    /// Opens the list, refreshing with the empty query.
    ///
    /// The highlight is restored to the selected entry's position when it is
    /// part of the fresh visible set. Deferred sources open over the
    /// last-known catalog and re-fetch; the returned reaction carries the
    /// fetch request.
    pub fn open(&mut self) -> Reaction<T> {
        if self.disabled || self.state.is_open() {
            return Reaction::idle();
        }
        self.query_text.clear();
        let query = self.engine.issue("");
        match self.policies.source {
            SourceMode::Local => {
                let ids = substring_filter(&self.catalog, &query.text);
                self.state.open_with(Ring::linked(ids));
                Reaction::consumed()
            }
            SourceMode::Deferred => {
                self.in_flight = Some(query.generation);
                self.state.open_with(Ring::linked(self.catalog.ids().collect()));
                Reaction {
                    fetch: Some(query),
                    ..Reaction::consumed()
                }
            }
        }
    }

    /// Resolves a key press.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Reaction<T> {
        if self.disabled {
            return Reaction::idle();
        }
        match key {
            // Reserved escape hatch for copy workflows: a modified ArrowUp
            // selects the input's text instead of navigating.
            Key::ArrowUp if !modifiers.is_empty() => Reaction {
                text_command: Some(TextCommand::SelectAll),
                ..Reaction::consumed()
            },
            Key::ArrowUp => self.navigate(StepDirection::Backward),
            Key::ArrowDown => self.navigate(StepDirection::Forward),
            Key::Enter => {
                if self.state.is_open() {
                    self.engine.cancel();
                    let outcome = self.state.commit();
                    Reaction {
                        event: self.react_commit(outcome),
                        ..Reaction::consumed()
                    }
                } else {
                    Reaction::consumed()
                }
            }
            Key::Escape => {
                if self.state.is_open() {
                    self.engine.cancel();
                    self.state.dismiss();
                }
                Reaction::consumed()
            }
            Key::Home => self.react_highlight(|state| state.highlight_first()),
            Key::End => self.react_highlight(|state| state.highlight_last()),
        }
    }

    fn navigate(&mut self, direction: StepDirection) -> Reaction<T> {
        match self.state.navigate(direction) {
            // Arrow keys are always swallowed, even when there is nothing
            // to navigate.
            NavOutcome::Ignored => Reaction::consumed(),
            NavOutcome::Highlighted(id) => Reaction {
                preview: self.catalog.label(id).map(String::from),
                ..Reaction::consumed()
            },
            NavOutcome::Committed(outcome) => Reaction {
                event: self.react_commit(outcome),
                ..Reaction::consumed()
            },
        }
    }

    fn react_highlight(&mut self, go: impl FnOnce(&mut SelectionState) -> NavOutcome) -> Reaction<T> {
        match go(&mut self.state) {
            NavOutcome::Highlighted(id) => Reaction {
                preview: self.catalog.label(id).map(String::from),
                ..Reaction::consumed()
            },
            // Home/End fall through to the text control while closed.
            _ => Reaction::idle(),
        }
    }

    /// Records the input control's new query text at `now_ms`.
    ///
    /// With a quiet period configured this only schedules; the refresh runs
    /// from a later [`SelectCore::poll`]. A below-gate query suppresses any
    /// pending refresh and leaves the visible set alone.
    pub fn input_text(&mut self, text: &str, now_ms: u64) -> Reaction<T> {
        if self.disabled {
            return Reaction::idle();
        }
        self.query_text = String::from(text);
        match self.engine.note_input(text, now_ms) {
            InputDisposition::Suppressed | InputDisposition::Scheduled => Reaction::idle(),
            InputDisposition::Immediate(query) => self.run_query(query),
        }
    }

    /// Advances the host-driven clock, firing a due debounced refresh.
    pub fn poll(&mut self, now_ms: u64) -> Reaction<T> {
        match self.engine.poll(now_ms) {
            Some(query) => self.run_query(query),
            None => Reaction::idle(),
        }
    }

    fn run_query(&mut self, query: FilterQuery) -> Reaction<T> {
        match self.policies.source {
            SourceMode::Local => {
                let ids = substring_filter(&self.catalog, &query.text);
                self.state.replace_visible(Ring::linked(ids));
                Reaction::idle()
            }
            SourceMode::Deferred => {
                self.in_flight = Some(query.generation);
                Reaction {
                    fetch: Some(query),
                    ..Reaction::idle()
                }
            }
        }
    }

    /// Applies (or discards) the completion of a deferred refresh.
    ///
    /// A completion whose generation is not the latest issued is discarded
    /// silently, success or failure — the stale-response guard. A current
    /// failure keeps the last-known-good visible set and surfaces
    /// [`SelectEvent::RefreshFailed`].
    pub fn complete_refresh(
        &mut self,
        generation: u64,
        result: Result<Vec<T>, String>,
    ) -> Reaction<T> {
        if !self.engine.accepts(generation) {
            return Reaction::idle();
        }
        match result {
            Ok(records) => {
                self.in_flight = None;
                self.catalog.replace(records, &self.projection);
                // Re-locate the committed selection in the fresh catalog.
                if let Some(key) = self.committed.as_ref().and_then(|c| c.key)
                    && let Some(id) = self.catalog.find_by_key(key)
                {
                    self.state.rebind_selected(Some(id));
                }
                self.state
                    .replace_visible(Ring::linked(self.catalog.ids().collect()));
                self.state.restore_active();
                Reaction::idle()
            }
            Err(reason) => {
                self.in_flight = None;
                Reaction {
                    event: Some(SelectEvent::RefreshFailed(RefreshError { generation, reason })),
                    ..Reaction::idle()
                }
            }
        }
    }

    /// Toggles the list from a pointer press on the anchor control.
    pub fn pointer_press_anchor(&mut self) -> Reaction<T> {
        if self.disabled {
            return Reaction::idle();
        }
        if self.state.is_open() {
            self.engine.cancel();
            self.state.dismiss();
            Reaction::consumed()
        } else {
            self.open()
        }
    }

    /// Commits a visible entry from a pointer press.
    pub fn pointer_press_entry(&mut self, id: EntryId) -> Reaction<T> {
        if self.disabled {
            return Reaction::idle();
        }
        match self.state.commit_entry(id) {
            Some(outcome) => {
                self.engine.cancel();
                Reaction {
                    event: self.react_commit(outcome),
                    ..Reaction::consumed()
                }
            }
            None => Reaction::idle(),
        }
    }

    /// Dismisses on focus loss. Never changes or reports the selection.
    pub fn blur(&mut self) -> Reaction<T> {
        if self.state.is_open() {
            self.engine.cancel();
            self.state.dismiss();
        }
        Reaction::idle()
    }

    /// Replaces the catalog wholesale and resets the selection to the first
    /// entry.
    pub fn store(&mut self, records: impl IntoIterator<Item = T>) -> Reaction<T> {
        self.engine.cancel();
        self.query_text.clear();
        self.catalog.replace(records, &self.projection);
        let ring = Ring::linked(self.catalog.ids().collect());
        let outcome = self.state.reset_with(ring, self.catalog.first());
        Reaction {
            event: self.react_commit(outcome),
            ..Reaction::idle()
        }
    }

    /// Writes the selection by visible index. An index equal to the visible
    /// set's length means "no selection".
    pub fn set_selected_index(&mut self, index: usize) -> Reaction<T> {
        let id = self.state.visible().get(index).copied();
        let outcome = self.state.set_selected(id);
        Reaction {
            event: self.react_commit(outcome),
            ..Reaction::idle()
        }
    }

    /// Writes the selection to the first catalog record matching `pred`.
    /// Leaves the selection alone when nothing matches.
    pub fn select_where(&mut self, pred: impl FnMut(&T) -> bool) -> Reaction<T> {
        match self.catalog.find_where(pred) {
            Some(id) => {
                let outcome = self.state.set_selected(Some(id));
                Reaction {
                    event: self.react_commit(outcome),
                    ..Reaction::idle()
                }
            }
            None => Reaction::idle(),
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) -> Reaction<T> {
        let outcome = self.state.set_selected(None);
        Reaction {
            event: self.react_commit(outcome),
            ..Reaction::idle()
        }
    }

    /// Refreshes the committed-selection cache and decides whether the
    /// outcome is a notifiable identity change.
    fn react_commit(&mut self, outcome: CommitOutcome) -> Option<SelectEvent<T>> {
        let changed = self.identity_changed(outcome);
        self.committed = outcome.current.and_then(|id| {
            self.catalog.get(id).map(|entry| Committed {
                record: entry.record().clone(),
                label: String::from(entry.label()),
                key: entry.key(),
            })
        });
        if changed {
            Some(SelectEvent::SelectionChanged(
                self.committed.as_ref().map(|c| c.record.clone()),
            ))
        } else {
            None
        }
    }

    fn identity_changed(&self, outcome: CommitOutcome) -> bool {
        match (outcome.previous, outcome.current) {
            (None, None) => false,
            (None, Some(_)) | (Some(_), None) => true,
            (Some(previous), Some(current)) => {
                if self.projection.has_key() {
                    let old = self.committed.as_ref().and_then(|c| c.key);
                    let new = self.catalog.key(current);
                    match (old, new) {
                        (Some(old), Some(new)) => old != new,
                        _ => previous != current,
                    }
                } else {
                    previous != current
                }
            }
        }
    }
}
