// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dynamic typeahead against a simulated slow backend.
//!
//! The host owns the clock and the fetch delegate. This demo types two
//! queries in quick succession, lets the backend answer them out of order,
//! and shows the generation guard discarding the stale response. It then
//! fails a fetch to show the recoverable error path.
//!
//! Run:
//! - `cargo run -p bracken_demos --bin dynamic_search`

use bracken_catalog::Projection;
use bracken_filter::{FilterQuery, GatePolicy};
use bracken_select::{SelectCore, SelectEvent, SelectPolicies};

/// A pretend remote search over a fixed corpus.
fn backend_search(query: &str) -> Vec<&'static str> {
    const CORPUS: &[&str] = &[
        "Ash", "Alder", "Aspen", "Beech", "Birch", "Cedar", "Elm", "Hazel", "Holly", "Rowan",
    ];
    let needle = query.to_lowercase();
    CORPUS
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect()
}

fn show_visible(core: &SelectCore<&'static str, String>) {
    let labels: Vec<_> = core
        .items()
        .iter()
        .filter_map(|&id| core.catalog().label(id))
        .collect();
    println!("  visible: {labels:?}");
}

fn main() {
    let mut policies = SelectPolicies::dynamic();
    policies.min_query_len = 2;
    policies.gate = GatePolicy::Suppress;

    let mut core = SelectCore::builder()
        .projection(Projection::text(|s: &&str| Some(s.to_string())))
        .policies(policies)
        .placeholder("search trees")
        .build()
        .expect("projection was supplied");

    // Open: refresh("") goes to the backend immediately.
    let open_fetch = core.open().fetch.expect("deferred open fetches");
    core.complete_refresh(open_fetch.generation, Ok(backend_search(&open_fetch.text)));
    println!("opened with the full corpus:");
    show_visible(&core);

    // A single character is below the gate: no fetch, visible set stands.
    assert!(core.input_text("a", 1_000).fetch.is_none());
    assert!(core.poll(2_000).fetch.is_none());
    println!("typed \"a\": suppressed by the 2-char gate");

    // Type "as", then extend to "ash" before the first fetch resolves.
    core.input_text("as", 2_100);
    let first: FilterQuery = core.poll(2_450).fetch.expect("debounce elapsed");
    core.input_text("ash", 2_600);
    let second: FilterQuery = core.poll(2_950).fetch.expect("debounce elapsed");
    println!(
        "two fetches in flight: \"{}\" (gen {}) and \"{}\" (gen {})",
        first.text, first.generation, second.text, second.generation
    );

    // The backend answers out of order: newest first.
    core.complete_refresh(second.generation, Ok(backend_search(&second.text)));
    println!("applied gen {}:", second.generation);
    show_visible(&core);

    let reaction = core.complete_refresh(first.generation, Ok(backend_search(&first.text)));
    assert!(reaction.event.is_none());
    println!("stale gen {} arrived late and was discarded:", first.generation);
    show_visible(&core);

    // A failing fetch keeps the last-known-good results and reports once.
    core.input_text("be", 4_000);
    let failing = core.poll(4_350).fetch.expect("debounce elapsed");
    let reaction = core.complete_refresh(failing.generation, Err("backend down".to_string()));
    if let Some(SelectEvent::RefreshFailed(error)) = reaction.event {
        println!("fetch failed but nothing is stuck: {error}");
    }
    show_visible(&core);
}
