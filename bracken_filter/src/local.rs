// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous local matching over catalog labels.

use alloc::string::String;
use alloc::vec::Vec;

use bracken_catalog::{Catalog, EntryId};

/// Case-insensitive substring match of `text` against every entry label.
///
/// The empty query matches everything. Catalog order is preserved, so the
/// result is a monotone narrowing of the full catalog: running the same
/// query twice on an unchanged catalog yields identical id sequences.
#[must_use]
pub fn substring_filter<T, N>(catalog: &Catalog<T, N>, text: &str) -> Vec<EntryId> {
    if text.is_empty() {
        return catalog.ids().collect();
    }
    let needle: String = text.to_lowercase();
    catalog
        .ids()
        .filter(|&id| {
            catalog
                .label(id)
                .is_some_and(|label| label.to_lowercase().contains(needle.as_str()))
        })
        .collect()
}
