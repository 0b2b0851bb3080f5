// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A plain dropdown selector driven from a simulated host shell.
//!
//! This demo wires together:
//! - `bracken_select` with the `plain` policy set (closed-cycle arrows),
//! - `bracken_overlay` for anchor-relative placement,
//! - `bracken_a11y` for the marker transitions a host would mirror into
//!   its accessibility layer.
//!
//! Run:
//! - `cargo run -p bracken_demos --bin plain_select`

use bracken_a11y::{ListProjection, MirrorState};
use bracken_catalog::Projection;
use bracken_overlay::OverlayTracker;
use bracken_select::{Key, Modifiers, SelectCore, SelectEvent, SelectPolicies};
use kurbo::{Rect, Vec2};

fn main() {
    let mut core = SelectCore::builder()
        .projection(Projection::text(|s: &&str| Some(s.to_string())))
        .policies(SelectPolicies::plain())
        .placeholder("pick a tree")
        .build()
        .expect("projection was supplied");

    // The host loads its option list.
    core.store(["Ash", "Beech", "Cedar", "Rowan"]);
    println!("stored 4 options, selection = {:?}", core.label());

    let mut mirror: MirrorState<usize> = MirrorState::new();
    let mut overlay = OverlayTracker::new();
    let anchor = Rect::new(12.0, 30.0, 212.0, 58.0);

    // Closed-cycle navigation: arrows commit without opening the list.
    for key in [Key::ArrowDown, Key::ArrowDown, Key::ArrowUp] {
        let reaction = core.handle_key(key, Modifiers::empty());
        if let Some(SelectEvent::SelectionChanged(record)) = reaction.event {
            println!("selection changed -> {record:?}");
        }
    }

    // Open via pointer press on the anchor; the overlay attaches.
    core.pointer_press_anchor();
    let frame = overlay.open(anchor, Vec2::ZERO);
    println!(
        "opened: {} visible, overlay at ({}, {}) width {}",
        core.items().len(),
        frame.left,
        frame.top,
        frame.width
    );

    // Mirror the open state; node handles are just visible indices here.
    let handles: Vec<usize> = (0..core.items().len()).collect();
    let ops = mirror.transition(&list_projection(&core, &handles));
    println!("a11y ops on open: {ops:?}");

    // Walk the highlight down twice and commit.
    core.handle_key(Key::ArrowDown, Modifiers::empty());
    core.handle_key(Key::ArrowDown, Modifiers::empty());
    let ops = mirror.transition(&list_projection(&core, &handles));
    println!("a11y ops after navigation: {ops:?}");

    let reaction = core.handle_key(Key::Enter, Modifiers::empty());
    overlay.close();
    if let Some(SelectEvent::SelectionChanged(record)) = reaction.event {
        println!("committed -> {record:?}");
    }
    println!(
        "closed: selection = {:?}, overlay attached = {}",
        core.label(),
        overlay.is_attached()
    );

    let ops = mirror.transition(&list_projection(&core, &handles));
    println!("a11y ops on close: {ops:?}");
}

/// Projects the core's state onto plain index handles for the mirror.
fn list_projection<'a>(
    core: &SelectCore<&'static str, String>,
    handles: &'a [usize],
) -> ListProjection<'a, usize> {
    let position_of = |id| {
        core.items()
            .iter()
            .position(|&v| Some(v) == id)
            .map(|p| handles[p])
    };
    ListProjection {
        visible: handles,
        active: position_of(core.active_id()),
        selected: position_of(core.selected_id()),
        expanded: core.is_open(),
    }
}
