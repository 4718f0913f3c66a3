// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pressed_state_tree --heading-base-level=0

//! Pressed State Tree: a minimal interaction tree the press detector can search.
//!
//! This crate provides the element-tree collaborator side of the
//! [`pressed_state`] contract: a hierarchy of nodes addressed by generational
//! [`NodeId`] handles, each carrying a [`NodeFlags`] word with visibility,
//! press, pre-press, and exclusion bits. It stores interaction flags only —
//! no geometry, no layout, no hit testing. Hosts that already have a scene
//! graph implement [`pressed_state::PressSpace`] over it directly instead of
//! using this crate.
//!
//! The division of labor: the host's own event dispatch decides which node a
//! pointer press lands on and writes the outcome through
//! [`PressTree::set_pressed`] / [`PressTree::set_pre_pressed`]; a
//! [`PressDetector`](pressed_state::PressDetector) then searches the tree to
//! report which single node holds the press.
//!
//! ## Minimal example
//!
//! ```rust
//! use pressed_state::{find_pressed, PointerPhase, PressDetector, TimerQueue};
//! use pressed_state_tree::{NodeFlags, PressTree};
//!
//! let mut tree = PressTree::new();
//! let root = tree.insert(None, NodeFlags::default());
//! let button = tree.insert(Some(root), NodeFlags::default());
//!
//! // The host's dispatch committed a press on the button.
//! tree.set_pressed(button, true);
//! assert_eq!(find_pressed(&tree, root), Some(button));
//!
//! // A detector over the same tree confirms it immediately on pointer down.
//! let mut detector = PressDetector::new(root);
//! let mut timers = TimerQueue::new();
//! detector.on_pointer(PointerPhase::Down, &tree, &mut timers);
//! assert_eq!(detector.pressed(), Some(button));
//! ```
//!
//! ## Exclusion
//!
//! [`PressTree::exclude`] sets the one-way [`NodeFlags::EXCLUDED`] bit on the
//! node's own record; there is no inverse. An excluded node that would match
//! the press search terminates it entirely (see [`pressed_state::find_pressed`]).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::PressTree;
pub use types::{NodeFlags, NodeId};
