// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard surface types.

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Windows.
        const META    = 0b0000_1000;
    }
}

/// Keys the widget core resolves itself.
///
/// Printable input goes through the host's text control and reaches the core
/// as whole query strings via
/// [`SelectCore::input_text`](crate::SelectCore::input_text); only
/// navigation and commit/dismiss keys are routed here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Step the highlight (or the closed-cycle selection) backward.
    ArrowUp,
    /// Step the highlight (or the closed-cycle selection) forward.
    ArrowDown,
    /// Commit the highlighted entry and close.
    Enter,
    /// Close without changing the selection.
    Escape,
    /// Jump the highlight to the first visible entry.
    Home,
    /// Jump the highlight to the last visible entry.
    End,
}

/// A text-editing command redirected to the host's input control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextCommand {
    /// Select the input's entire text (modifier + ArrowUp escape hatch for
    /// copy workflows).
    SelectAll,
}
