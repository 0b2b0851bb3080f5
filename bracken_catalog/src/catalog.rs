// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry arena and host-supplied display projections.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

/// Identifier for an entry in a [`Catalog`] (epoch-tagged).
///
/// The epoch half is bumped every time the catalog is rebuilt wholesale, so
/// handles minted against an earlier catalog generation resolve to `None`
/// rather than silently pointing at an unrelated fresh entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EntryId(pub(crate) u32, pub(crate) u32);

impl EntryId {
    pub(crate) const fn new(idx: u32, epoch: u32) -> Self {
        Self(idx, epoch)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The catalog epoch this id was minted in.
    #[must_use]
    pub const fn epoch(self) -> u32 {
        self.1
    }
}

/// Caller-derived identity key for a record.
///
/// Hosts that want selection identity to survive catalog replacement (for
/// example across dynamic re-fetches) derive one of these per record via
/// [`Projection::with_key`]. The host owns the meaning of individual key
/// values; the catalog only compares and maps them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryKey(pub u64);

/// Derivation functions mapping raw records into entry display data.
///
/// The label function may return `None` for records with no derivable label
/// text; such records become empty-label entries rather than errors. The
/// content function receives the record and its derived label and produces a
/// renderable handle of the host's choosing.
pub struct Projection<T, N> {
    label: Box<dyn Fn(&T) -> Option<String>>,
    content: Box<dyn Fn(&T, &str) -> N>,
    key: Option<Box<dyn Fn(&T) -> EntryKey>>,
}

impl<T> Projection<T, String> {
    /// A projection whose content handle is the label text itself.
    ///
    /// This is the common case for plain text dropdowns: the rendered
    /// content of an option is exactly its label.
    pub fn text(label: impl Fn(&T) -> Option<String> + 'static) -> Self {
        Self {
            label: Box::new(label),
            content: Box::new(|_, label| String::from(label)),
            key: None,
        }
    }
}

impl<T, N> Projection<T, N> {
    /// A projection with an explicit content derivation.
    pub fn new(
        label: impl Fn(&T) -> Option<String> + 'static,
        content: impl Fn(&T, &str) -> N + 'static,
    ) -> Self {
        Self {
            label: Box::new(label),
            content: Box::new(content),
            key: None,
        }
    }

    /// Adds an identity-key derivation (builder).
    #[must_use]
    pub fn with_key(mut self, key: impl Fn(&T) -> EntryKey + 'static) -> Self {
        self.key = Some(Box::new(key));
        self
    }

    /// Derives the label text for `record`, defaulting to empty.
    #[must_use]
    pub fn label_of(&self, record: &T) -> String {
        (self.label)(record).unwrap_or_default()
    }

    /// Derives the identity key for `record`, if a key function was given.
    #[must_use]
    pub fn key_of(&self, record: &T) -> Option<EntryKey> {
        self.key.as_ref().map(|f| f(record))
    }

    /// Whether this projection derives identity keys.
    #[must_use]
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }
}

impl<T, N> fmt::Debug for Projection<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("has_key", &self.key.is_some())
            .finish_non_exhaustive()
    }
}

/// One selectable record plus its derived display data.
///
/// Entries are immutable after construction; navigation order lives in the
/// separately-owned [`Ring`](crate::Ring), never on the entry itself.
#[derive(Clone, Debug)]
pub struct Entry<T, N> {
    data: T,
    label: String,
    content: N,
    key: Option<EntryKey>,
}

impl<T, N> Entry<T, N> {
    /// The original record.
    #[must_use]
    pub fn record(&self) -> &T {
        &self.data
    }

    /// The memoized display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The renderable content handle.
    #[must_use]
    pub fn content(&self) -> &N {
        &self.content
    }

    /// The identity key, if the projection derives one.
    #[must_use]
    pub fn key(&self) -> Option<EntryKey> {
        self.key
    }
}

/// The full, unfiltered ordered collection of entries.
///
/// A catalog is rebuilt wholesale when the backing data source is replaced
/// ([`Catalog::replace`]); individual entries are never mutated after
/// creation. When the projection derives identity keys, a key → index map is
/// maintained so a committed selection can be re-located in O(1) after a
/// rebuild.
#[derive(Debug)]
pub struct Catalog<T, N> {
    entries: Vec<Entry<T, N>>,
    by_key: HashMap<EntryKey, usize>,
    epoch: u32,
}

impl<T, N> Catalog<T, N> {
    /// Builds a fresh catalog over `records`.
    #[must_use]
    pub fn build(records: impl IntoIterator<Item = T>, projection: &Projection<T, N>) -> Self {
        let mut catalog = Self {
            entries: Vec::new(),
            by_key: HashMap::new(),
            epoch: 0,
        };
        catalog.populate(records, projection);
        catalog
    }

    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            by_key: HashMap::new(),
            epoch: 0,
        }
    }

    /// Replaces the backing records wholesale, bumping the epoch.
    ///
    /// All previously minted [`EntryId`]s become stale and resolve to
    /// `None` from here on.
    pub fn replace(&mut self, records: impl IntoIterator<Item = T>, projection: &Projection<T, N>) {
        self.epoch = self.epoch.wrapping_add(1);
        self.populate(records, projection);
    }

    fn populate(&mut self, records: impl IntoIterator<Item = T>, projection: &Projection<T, N>) {
        self.entries.clear();
        self.by_key.clear();
        for (idx, data) in records.into_iter().enumerate() {
            let label = projection.label_of(&data);
            let content = (projection.content)(&data, &label);
            let key = projection.key_of(&data);
            if let Some(key) = key {
                // Last occurrence wins when the host derives duplicate keys.
                self.by_key.insert(key, idx);
            }
            self.entries.push(Entry {
                data,
                label,
                content,
                key,
            });
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current epoch.
    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Catalogs are bounded by u32::MAX entries; UI data sets are far smaller."
    )]
    fn id_at_index(&self, idx: usize) -> EntryId {
        EntryId::new(idx as u32, self.epoch)
    }

    /// Ids of all entries in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        (0..self.entries.len()).map(|idx| self.id_at_index(idx))
    }

    /// The first entry's id, if any.
    #[must_use]
    pub fn first(&self) -> Option<EntryId> {
        if self.entries.is_empty() {
            None
        } else {
            Some(EntryId::new(0, self.epoch))
        }
    }

    /// Whether `id` is live in this catalog.
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        id.epoch() == self.epoch && id.idx() < self.entries.len()
    }

    /// Resolves a live id to its entry.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&Entry<T, N>> {
        if self.contains(id) {
            self.entries.get(id.idx())
        } else {
            None
        }
    }

    /// The display label of a live id.
    #[must_use]
    pub fn label(&self, id: EntryId) -> Option<&str> {
        self.get(id).map(Entry::label)
    }

    /// The original record of a live id.
    #[must_use]
    pub fn record(&self, id: EntryId) -> Option<&T> {
        self.get(id).map(Entry::record)
    }

    /// The content handle of a live id.
    #[must_use]
    pub fn content(&self, id: EntryId) -> Option<&N> {
        self.get(id).map(Entry::content)
    }

    /// The identity key of a live id, if derived.
    #[must_use]
    pub fn key(&self, id: EntryId) -> Option<EntryKey> {
        self.get(id).and_then(Entry::key)
    }

    /// Finds the entry carrying `key`, if any.
    #[must_use]
    pub fn find_by_key(&self, key: EntryKey) -> Option<EntryId> {
        self.by_key.get(&key).map(|&idx| self.id_at_index(idx))
    }

    /// Finds the first entry whose record satisfies `pred`.
    #[must_use]
    pub fn find_where(&self, mut pred: impl FnMut(&T) -> bool) -> Option<EntryId> {
        self.entries
            .iter()
            .position(|e| pred(&e.data))
            .map(|idx| self.id_at_index(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[derive(Clone, Debug, PartialEq)]
    struct Rec {
        id: u64,
        name: Option<&'static str>,
    }

    fn rec(id: u64, name: &'static str) -> Rec {
        Rec {
            id,
            name: Some(name),
        }
    }

    fn projection() -> Projection<Rec, String> {
        Projection::text(|r: &Rec| r.name.map(ToString::to_string))
    }

    #[test]
    fn build_derives_labels_in_order() {
        let catalog = Catalog::build(vec![rec(1, "ash"), rec(2, "beech")], &projection());
        assert_eq!(catalog.len(), 2);
        let ids: Vec<_> = catalog.ids().collect();
        assert_eq!(catalog.label(ids[0]), Some("ash"));
        assert_eq!(catalog.label(ids[1]), Some("beech"));
        assert_eq!(catalog.record(ids[1]).map(|r| r.id), Some(2));
    }

    #[test]
    fn missing_label_becomes_empty_not_fatal() {
        let catalog = Catalog::build(vec![Rec { id: 7, name: None }], &projection());
        let id = catalog.first().unwrap();
        assert_eq!(catalog.label(id), Some(""));
    }

    #[test]
    fn text_projection_content_is_label() {
        let catalog = Catalog::build(vec![rec(1, "cedar")], &projection());
        let id = catalog.first().unwrap();
        assert_eq!(catalog.content(id).map(String::as_str), Some("cedar"));
    }

    #[test]
    fn custom_content_receives_record_and_label() {
        let projection = Projection::new(
            |r: &Rec| r.name.map(ToString::to_string),
            |r, label| (r.id, label.len()),
        );
        let catalog = Catalog::build(vec![rec(3, "oak")], &projection);
        let id = catalog.first().unwrap();
        assert_eq!(catalog.content(id), Some(&(3, 3)));
    }

    #[test]
    fn keys_relocate_entries() {
        let projection = projection().with_key(|r| EntryKey(r.id));
        let catalog = Catalog::build(vec![rec(1, "ash"), rec(2, "beech")], &projection);
        let found = catalog.find_by_key(EntryKey(2)).unwrap();
        assert_eq!(catalog.label(found), Some("beech"));
        assert!(catalog.find_by_key(EntryKey(9)).is_none());
    }

    #[test]
    fn replace_bumps_epoch_and_stales_old_ids() {
        let projection = projection();
        let mut catalog = Catalog::build(vec![rec(1, "ash")], &projection);
        let old = catalog.first().unwrap();
        assert!(catalog.contains(old));

        catalog.replace(vec![rec(2, "beech"), rec(3, "cedar")], &projection);
        assert!(!catalog.contains(old));
        assert!(catalog.get(old).is_none());
        assert_eq!(catalog.len(), 2);

        let fresh = catalog.first().unwrap();
        assert_ne!(fresh.epoch(), old.epoch());
        assert_eq!(catalog.label(fresh), Some("beech"));
    }

    #[test]
    fn keys_survive_replace_via_lookup() {
        let projection = projection().with_key(|r| EntryKey(r.id));
        let mut catalog = Catalog::build(vec![rec(1, "ash"), rec(2, "beech")], &projection);
        catalog.replace(vec![rec(2, "beech II"), rec(1, "ash II")], &projection);
        let id = catalog.find_by_key(EntryKey(1)).unwrap();
        assert_eq!(catalog.label(id), Some("ash II"));
    }

    #[test]
    fn find_where_returns_first_match() {
        let catalog = Catalog::build(
            vec![rec(1, "ash"), rec(2, "beech"), rec(3, "beech")],
            &projection(),
        );
        let id = catalog.find_where(|r| r.name == Some("beech")).unwrap();
        assert_eq!(catalog.record(id).map(|r| r.id), Some(2));
        assert!(catalog.find_where(|r| r.id == 42).is_none());
    }

    #[test]
    fn empty_catalog_has_no_first() {
        let catalog: Catalog<Rec, String> = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.first().is_none());
    }
}
