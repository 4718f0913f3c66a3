// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred-task slots: the two named, cancelable timers the detector owns,
//! and a deterministic queue for single-threaded event loops.

use core::time::Duration;

use smallvec::SmallVec;

/// The detector's two named timer slots.
///
/// Exactly one deadline may be outstanding per slot; scheduling a slot again
/// replaces the previous deadline. Nothing other than the detector should
/// schedule on these names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Fires `tap_timeout` after a pointer down that found a pre-pressed
    /// candidate, to confirm or discard the provisional press.
    TapConfirm,
    /// Fires `pressed_state_duration` after a pointer up promoted a
    /// candidate, to clear the visually held press.
    ClearPress,
}

impl TimerSlot {
    const ALL: [Self; 2] = [Self::TapConfirm, Self::ClearPress];

    const fn index(self) -> usize {
        match self {
            Self::TapConfirm => 0,
            Self::ClearPress => 1,
        }
    }
}

/// Host scheduling capability: run a callback after a delay, cancelable.
///
/// The detector never blocks; it asks the host to schedule one of its
/// [`TimerSlot`]s and returns. When the delay elapses, the host calls
/// [`PressDetector::on_timer`](crate::PressDetector::on_timer) with the slot,
/// on the same logical thread that delivers pointer events. A canceled slot
/// must not fire.
pub trait TimerHost {
    /// Schedule `slot` to fire after `delay`, replacing any outstanding
    /// deadline for the same slot.
    fn schedule(&mut self, slot: TimerSlot, delay: Duration);

    /// Cancel any outstanding deadline for `slot`. Canceling an idle slot is
    /// a no-op.
    fn cancel(&mut self, slot: TimerSlot);
}

/// A deterministic, manually pumped [`TimerHost`].
///
/// `TimerQueue` keeps a virtual clock that only moves when the host calls
/// [`advance`](Self::advance), which makes it suitable both for event loops
/// that drive timers off their own tick and for tests that need exact
/// control over when the tap-confirmation and clear-press delays elapse.
///
/// ## Example
///
/// ```
/// use core::time::Duration;
/// use pressed_state::{TimerHost, TimerQueue, TimerSlot};
///
/// let mut timers = TimerQueue::new();
/// timers.schedule(TimerSlot::TapConfirm, Duration::from_millis(100));
///
/// // Not yet due.
/// assert!(timers.advance(Duration::from_millis(50)).is_empty());
///
/// // Due now; the slot fires once and is cleared.
/// let fired = timers.advance(Duration::from_millis(50));
/// assert_eq!(fired.as_slice(), &[TimerSlot::TapConfirm]);
/// assert!(!timers.is_scheduled(TimerSlot::TapConfirm));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    deadlines: [Option<Duration>; 2],
}

impl TimerQueue {
    /// An empty queue with its clock at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            deadlines: [None, None],
        }
    }

    /// The queue's current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Whether `slot` has an outstanding deadline.
    #[must_use]
    pub fn is_scheduled(&self, slot: TimerSlot) -> bool {
        self.deadlines[slot.index()].is_some()
    }

    /// The absolute deadline of `slot`, if one is outstanding.
    #[must_use]
    pub fn deadline(&self, slot: TimerSlot) -> Option<Duration> {
        self.deadlines[slot.index()]
    }

    /// Move the clock forward by `dt` and return the slots that came due, in
    /// deadline order (ties resolved in [`TimerSlot`] declaration order).
    ///
    /// Fired slots are cleared before this returns, so a fired slot can be
    /// rescheduled from within the caller's dispatch of it.
    pub fn advance(&mut self, dt: Duration) -> SmallVec<[TimerSlot; 2]> {
        self.now += dt;
        let mut due: SmallVec<[(Duration, TimerSlot); 2]> = SmallVec::new();
        for slot in TimerSlot::ALL {
            if let Some(deadline) = self.deadlines[slot.index()] {
                if deadline <= self.now {
                    self.deadlines[slot.index()] = None;
                    due.push((deadline, slot));
                }
            }
        }
        due.sort_by_key(|&(deadline, _)| deadline);
        due.into_iter().map(|(_, slot)| slot).collect()
    }
}

impl TimerHost for TimerQueue {
    fn schedule(&mut self, slot: TimerSlot, delay: Duration) {
        self.deadlines[slot.index()] = Some(self.now + delay);
    }

    fn cancel(&mut self, slot: TimerSlot) {
        self.deadlines[slot.index()] = None;
    }
}
