// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the press tree: node identifiers and flags.

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but
/// becomes invalid when the underlying slot is reused. It consists of a slot
/// index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that
///   slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new,
///   distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`PressTree::is_alive`](crate::PressTree::is_alive) to check whether a
/// `NodeId` still refers to a live node. Stale `NodeId`s never alias a
/// different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow
///   is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags carrying visibility and interaction state.
    ///
    /// `PRESSED` and `PREPRESSED` are written by the host's hit-testing and
    /// press dispatch (via [`PressTree::set_pressed`](crate::PressTree::set_pressed)
    /// and [`PressTree::set_pre_pressed`](crate::PressTree::set_pre_pressed))
    /// before a detector inspects the tree. `EXCLUDED` is one-way; see
    /// [`PressTree::exclude`](crate::PressTree::exclude).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (participates in press search).
        const VISIBLE    = 0b0000_0001;
        /// Node holds a confirmed press.
        const PRESSED    = 0b0000_0010;
        /// A pointer is down on the node but the press is still provisional.
        const PREPRESSED = 0b0000_0100;
        /// Node has opted out of press detection.
        const EXCLUDED   = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}
