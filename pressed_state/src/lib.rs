// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pressed_state --heading-base-level=0

//! Pressed State: detect which element of a UI tree holds pressed state.
//!
//! Given a tree of elements whose press flags are maintained by the
//! surrounding toolkit's own hit-testing and dispatch, this crate answers one
//! question across a press-down, hold, move, release sequence: which single
//! descendant of a root should currently be considered *pressed*, and when
//! does that change? It has two cooperating parts:
//!
//! - [`find_pressed`]: a stateless depth-first search returning the first
//!   pressed or pre-pressed descendant in traversal order, honoring
//!   per-element exclusion (an excluded match aborts the whole search).
//! - [`PressDetector`]: a state machine driven by classified pointer events
//!   ([`PointerPhase`]) and two named timer slots ([`TimerSlot`]), which
//!   arbitrates between "already fully pressed" and "pre-pressed, awaiting
//!   tap confirmation", and notifies registered [`PressCallback`]s of every
//!   pressed/unpressed transition.
//!
//! ## Design Philosophy
//!
//! - **Minimal and focused**: press detection only. No hit testing, no
//!   geometry, no visual effect — the tree owns its flags; this crate reads
//!   them.
//! - **Stateful but simple**: two nullable element references and two timer
//!   slots are the entire state.
//! - **Integration-friendly**: the tree is accessed through the [`PressSpace`]
//!   trait and deferred callbacks through [`TimerHost`], so any scene graph
//!   and any event loop can drive a detector.
//! - **Generic**: element keys are application-specific `Copy + Eq`
//!   identifiers (generational handles, indices, interned ids).
//!
//! ## Usage
//!
//! Feed the detector one [`PointerPhase`] per raw pointer event, *after* the
//! tree has updated element flags for that event, and relay elapsed timer
//! slots back into it. [`TimerQueue`] is a deterministic [`TimerHost`] for
//! single-threaded event loops; hosts with their own timer facility implement
//! [`TimerHost`] over it instead.
//!
//! ```rust
//! use core::time::Duration;
//! use pressed_state::{
//!     PointerPhase, PressCallback, PressDetector, PressFlags, PressSpace, TimerQueue,
//! };
//!
//! // A minimal tree: children and flags indexed by node id, node 0 the root.
//! struct Space {
//!     children: Vec<Vec<usize>>,
//!     flags: Vec<PressFlags>,
//! }
//!
//! impl PressSpace for Space {
//!     type Key = usize;
//!     type Children<'a> = core::iter::Copied<core::slice::Iter<'a, usize>>;
//!
//!     fn children(&self, key: usize) -> Self::Children<'_> {
//!         self.children[key].iter().copied()
//!     }
//!     fn is_visible(&self, _key: usize) -> bool {
//!         true
//!     }
//!     fn press_flags(&self, key: usize) -> PressFlags {
//!         self.flags[key]
//!     }
//!     fn is_excluded(&self, _key: usize) -> bool {
//!         false
//!     }
//! }
//!
//! struct Log;
//! impl PressCallback<usize> for Log {
//!     fn on_pressed(&mut self, key: usize) {
//!         println!("pressed {key}");
//!     }
//!     fn on_unpressed(&mut self, key: usize) {
//!         println!("unpressed {key}");
//!     }
//! }
//!
//! // root (0) → button (1); the platform marked the button pre-pressed on down.
//! let mut space = Space {
//!     children: vec![vec![1], vec![]],
//!     flags: vec![PressFlags::NONE; 2],
//! };
//! space.flags[1].pre_pressed = true;
//!
//! let mut detector = PressDetector::new(0);
//! detector.add_callback(Log);
//! let mut timers = TimerQueue::new();
//!
//! detector.on_pointer(PointerPhase::Down, &space, &mut timers);
//!
//! // Provisional: no notification until the tap-confirmation delay elapses.
//! assert_eq!(detector.pressed(), None);
//!
//! // The press is committed while the delay runs, then the timer fires.
//! space.flags[1] = PressFlags { pre_pressed: false, pressed: true };
//! for slot in timers.advance(Duration::from_millis(100)) {
//!     detector.on_timer(slot, &space, &mut timers);
//! }
//! assert_eq!(detector.pressed(), Some(1));
//! ```
//!
//! ## Exclusion
//!
//! Individual elements opt out of detection entirely: when the search lands
//! on an excluded element that would otherwise match, it terminates instead
//! of falling back to another element. Trees that own their element records
//! typically store the bit on the record; [`ExclusionSet`] is a side table
//! for trees whose element type is foreign.
//!
//! ## Timing
//!
//! The two delays involved — the tap-confirmation timeout and the minimum
//! visible pressed duration — are platform constants supplied through
//! [`PressTiming`], not values this crate computes.
//!
//! ## Ordering assumptions
//!
//! All input is expected on one logical thread: pointer events and timer
//! firings are totally ordered, so a `Down` always observes (and cancels) a
//! still-pending confirmation from a previous interaction. The detector never
//! blocks; both delays are scheduled through [`TimerHost`] and resume via
//! [`PressDetector::on_timer`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod callbacks;
mod detector;
mod exclusion;
mod search;
mod timer;
mod types;

pub use callbacks::{CallbackId, PressCallback};
pub use detector::PressDetector;
pub use exclusion::ExclusionSet;
pub use search::find_pressed;
pub use timer::{TimerHost, TimerQueue, TimerSlot};
pub use types::{PointerPhase, PressFlags, PressSpace, PressTiming};
