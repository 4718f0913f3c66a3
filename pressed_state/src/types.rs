// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public vocabulary types: press flags, pointer phases, timing constants, and
//! the tree contract press queries run against.

use core::time::Duration;

/// Per-element press flags, read fresh on every query.
///
/// The pair mirrors the two bits the surrounding tree maintains for each
/// element: `pre_pressed` marks a pointer resting on the element while the
/// platform's tap-confirmation delay is still running, `pressed` marks a
/// confirmed press. Values are never cached across events; the detector
/// re-reads them at each transition that depends on them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PressFlags {
    /// A pointer is down on the element but the press is still provisional.
    pub pre_pressed: bool,
    /// The element's press has been accepted as real.
    pub pressed: bool,
}

impl PressFlags {
    /// Both flags clear.
    pub const NONE: Self = Self {
        pre_pressed: false,
        pressed: false,
    };

    /// Returns `true` if either flag is set.
    #[must_use]
    pub const fn any(self) -> bool {
        self.pre_pressed || self.pressed
    }
}

/// Classification of an incoming pointer event.
///
/// The host routes every raw pointer event into exactly one of these phases
/// *after* the tree has already updated each element's press flags through its
/// normal hit-testing and dispatch. The detector never performs hit testing;
/// it only inspects the resulting flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pointer made contact.
    Down,
    /// Pointer moved while in contact.
    Move,
    /// Pointer was released.
    Up,
    /// The interaction was aborted by the platform.
    Cancel,
}

/// The two platform-supplied delays driving press confirmation.
///
/// Both values come from the host environment, not from this crate: the
/// defaults mirror common platform view-configuration values (100 ms tap
/// timeout, 64 ms pressed-state duration) but hosts should supply their
/// platform's own constants via [`PressTiming::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PressTiming {
    /// Delay between pointer down and tap confirmation. While it runs, a
    /// press is provisional.
    pub tap_timeout: Duration,
    /// Minimum duration a confirmed press stays visually active after the
    /// pointer is released.
    pub pressed_state_duration: Duration,
}

impl PressTiming {
    /// Timing constants from explicit host values.
    #[must_use]
    pub const fn new(tap_timeout: Duration, pressed_state_duration: Duration) -> Self {
        Self {
            tap_timeout,
            pressed_state_duration,
        }
    }
}

impl Default for PressTiming {
    fn default() -> Self {
        Self {
            tap_timeout: Duration::from_millis(100),
            pressed_state_duration: Duration::from_millis(64),
        }
    }
}

/// Contract the press search and detector read an element tree through.
///
/// Implementations are expected to be cheap views over an existing tree; all
/// methods are read-only. Keys are small copyable identifiers (generational
/// handles, indices, interned ids) rather than owning references, so the
/// detector never keeps the tree alive or borrows it across events.
///
/// Passing a key that no longer refers to a live element is a contract
/// violation: implementations should fail fast (panic) rather than report
/// default flags, since it means the host integration is broken.
pub trait PressSpace {
    /// Element identifier. `Copy + Eq` so state can be held and compared
    /// without touching the tree.
    type Key: Copy + Eq;

    /// Iterator over a node's children in their defined order.
    type Children<'a>: Iterator<Item = Self::Key>
    where
        Self: 'a;

    /// The children of `key`, in traversal order.
    fn children(&self, key: Self::Key) -> Self::Children<'_>;

    /// Whether `key` is currently visible. Invisible elements and their whole
    /// subtrees are skipped by the search.
    fn is_visible(&self, key: Self::Key) -> bool;

    /// The element's current press flags.
    fn press_flags(&self, key: Self::Key) -> PressFlags;

    /// Whether `key` has opted out of press detection entirely.
    fn is_excluded(&self, key: Self::Key) -> bool;
}
