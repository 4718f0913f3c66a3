// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer registration: callbacks notified when the pressed element changes.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Observer of pressed-state transitions.
///
/// Implementations receive exactly one call per transition: `on_pressed` when
/// an element becomes the confirmed pressed element, `on_unpressed` when a
/// previously confirmed element is cleared. Calls are synchronous, on the
/// thread driving the detector, in callback registration order.
pub trait PressCallback<K> {
    /// `key` is about to be treated as pressed.
    fn on_pressed(&mut self, key: K);

    /// The previously pressed `key` is about to be unpressed.
    fn on_unpressed(&mut self, key: K);
}

/// Handle identifying one registered callback.
///
/// Returned by [`PressDetector::add_callback`](crate::PressDetector::add_callback)
/// and consumed by [`remove_callback`](crate::PressDetector::remove_callback).
/// Registering the same callback logic twice yields two distinct handles, and
/// each registration is notified separately.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// Registered callbacks, notified in registration order.
pub(crate) struct Callbacks<K> {
    entries: Vec<(CallbackId, Box<dyn PressCallback<K>>)>,
    next_id: u64,
}

impl<K: Copy> Callbacks<K> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn add(&mut self, callback: Box<dyn PressCallback<K>>) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: CallbackId) -> bool {
        match self.entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify_pressed(&mut self, key: K) {
        for (_, callback) in &mut self.entries {
            callback.on_pressed(key);
        }
    }

    pub(crate) fn notify_unpressed(&mut self, key: K) {
        for (_, callback) in &mut self.entries {
            callback.on_unpressed(key);
        }
    }
}

impl<K> fmt::Debug for Callbacks<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("entries", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
