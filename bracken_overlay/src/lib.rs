// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=bracken_overlay --heading-base-level=0

//! Bracken Overlay: placement of the floating list relative to its anchor.
//!
//! The placement rule is deliberately small: the overlay's top edge sits on
//! the anchor's bottom edge, its left edge on the anchor's left edge (both
//! shifted by the document scroll offset), and it adopts the anchor's width.
//! [`place`] is that rule as a pure function.
//!
//! [`OverlayTracker`] adds the lifecycle around it: hosts attach viewport
//! tracking when the list opens and detach it when the list closes. A
//! resize delivered while closed is ignored, which is the headless form of
//! "the resize listener is removed on close" — tests can assert that no
//! tracking leaks across open/close cycles via [`OverlayTracker::is_attached`].
//!
//! ## Minimal example
//!
//! ```rust
//! use bracken_overlay::OverlayTracker;
//! use kurbo::{Rect, Vec2};
//!
//! let anchor = Rect::new(10.0, 20.0, 110.0, 44.0);
//! let mut tracker = OverlayTracker::new();
//!
//! let frame = tracker.open(anchor, Vec2::ZERO);
//! assert_eq!(frame.left, 10.0);
//! assert_eq!(frame.top, 44.0); // anchor bottom edge
//! assert_eq!(frame.width, 100.0);
//!
//! // While open, viewport changes reposition the overlay…
//! assert!(tracker.viewport_resized(anchor, Vec2::new(0.0, 5.0)).is_some());
//!
//! // …after close they are ignored.
//! tracker.close();
//! assert!(tracker.viewport_resized(anchor, Vec2::ZERO).is_none());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Rect, Vec2};

/// The computed on-screen placement of the floating list.
///
/// Height is intentionally absent: the host sizes the list to its content
/// (and its own max-height policy); the core only pins the top-left corner
/// and the width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayFrame {
    /// Left edge, in document coordinates.
    pub left: f64,
    /// Top edge, in document coordinates.
    pub top: f64,
    /// Width, matching the anchor.
    pub width: f64,
}

/// Computes the overlay frame for `anchor` under the given scroll offset.
///
/// `scroll` is the document scroll offset to add when the anchor rect is
/// expressed in viewport coordinates; pass [`Vec2::ZERO`] when the anchor is
/// already in document coordinates.
#[must_use]
pub fn place(anchor: Rect, scroll: Vec2) -> OverlayFrame {
    OverlayFrame {
        left: anchor.x0 + scroll.x,
        top: anchor.y1 + scroll.y,
        width: anchor.width(),
    }
}

/// Tracks the overlay's viewport-listener lifecycle across open/close cycles.
///
/// The tracker is attached between [`OverlayTracker::open`] and
/// [`OverlayTracker::close`]. Only while attached do viewport resizes
/// produce a new frame; this mirrors a host that adds its resize listener on
/// open and removes it on close, and makes listener leakage observable in
/// tests.
#[derive(Clone, Debug, Default)]
pub struct OverlayTracker {
    attached: bool,
    frame: Option<OverlayFrame>,
}

impl OverlayTracker {
    /// A detached tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether viewport tracking is currently attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// The most recently computed frame, if the overlay is open.
    #[must_use]
    pub const fn frame(&self) -> Option<OverlayFrame> {
        self.frame
    }

    /// Attaches tracking and computes the initial frame (list opened).
    pub fn open(&mut self, anchor: Rect, scroll: Vec2) -> OverlayFrame {
        let frame = place(anchor, scroll);
        self.attached = true;
        self.frame = Some(frame);
        frame
    }

    /// Recomputes the frame for a viewport change.
    ///
    /// Returns `None` while detached: a resize arriving after close is
    /// dropped rather than repositioning a hidden overlay.
    pub fn viewport_resized(&mut self, anchor: Rect, scroll: Vec2) -> Option<OverlayFrame> {
        if !self.attached {
            return None;
        }
        let frame = place(anchor, scroll);
        self.frame = Some(frame);
        Some(frame)
    }

    /// Detaches tracking and clears the frame (list closed).
    pub fn close(&mut self) {
        self.attached = false;
        self.frame = None;
    }
}
