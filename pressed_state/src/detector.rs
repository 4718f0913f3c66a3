// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The press-state machine: converts pointer phases and timer firings into
//! pressed/unpressed notifications.

use alloc::boxed::Box;
use core::fmt;

use crate::callbacks::{CallbackId, Callbacks, PressCallback};
use crate::search::find_pressed;
use crate::timer::{TimerHost, TimerSlot};
use crate::types::{PointerPhase, PressSpace, PressTiming};

/// Detects which single descendant of a root element holds pressed state.
///
/// The detector is driven from the outside: the host feeds it one
/// [`PointerPhase`] per raw pointer event (after the tree has updated its
/// press flags) via [`on_pointer`](Self::on_pointer), and relays elapsed
/// timer slots via [`on_timer`](Self::on_timer). Registered
/// [`PressCallback`]s are notified of every transition of the confirmed
/// pressed element.
///
/// Two elements of state are tracked between events: a *pre-press candidate*
/// awaiting tap confirmation, and the *confirmed* pressed element that
/// callbacks have been told about. Every path that sets the confirmed element
/// notifies `on_pressed`, and every path that clears it notifies
/// `on_unpressed` first, so notifications always come in matched pairs per
/// element.
///
/// Out-of-order input (an `Up` with no prior `Down`, a repeated `Down`, a
/// timer firing with nothing pending) degrades to the reset path or a no-op;
/// there are no error states.
///
/// See the crate root for a complete worked example.
pub struct PressDetector<K> {
    root: K,
    timing: PressTiming,
    pre_press_candidate: Option<K>,
    confirmed: Option<K>,
    callbacks: Callbacks<K>,
}

impl<K: Copy + Eq> PressDetector<K> {
    /// A detector over the hierarchy rooted at `root`, with default
    /// [`PressTiming`].
    #[must_use]
    pub fn new(root: K) -> Self {
        Self::with_timing(root, PressTiming::default())
    }

    /// A detector over the hierarchy rooted at `root` with host-supplied
    /// timing constants.
    #[must_use]
    pub fn with_timing(root: K, timing: PressTiming) -> Self {
        Self {
            root,
            timing,
            pre_press_candidate: None,
            confirmed: None,
            callbacks: Callbacks::new(),
        }
    }

    /// The root element the press search starts from.
    #[must_use]
    pub fn root(&self) -> K {
        self.root
    }

    /// The timing constants in effect.
    #[must_use]
    pub fn timing(&self) -> PressTiming {
        self.timing
    }

    /// The element currently notified as pressed, if any.
    #[must_use]
    pub fn pressed(&self) -> Option<K> {
        self.confirmed
    }

    /// The element awaiting tap confirmation, if any.
    #[must_use]
    pub fn pre_press_candidate(&self) -> Option<K> {
        self.pre_press_candidate
    }

    /// Register a callback; it is notified after all previously registered
    /// ones. The same logic may be registered more than once and will then be
    /// notified once per registration.
    pub fn add_callback(&mut self, callback: impl PressCallback<K> + 'static) -> CallbackId {
        self.callbacks.add(Box::new(callback))
    }

    /// Remove a callback by the handle its registration returned. Returns
    /// `false` if the handle was already removed.
    pub fn remove_callback(&mut self, id: CallbackId) -> bool {
        self.callbacks.remove(id)
    }

    /// Feed one classified pointer event.
    ///
    /// Must be called after the surrounding tree has dispatched the raw event
    /// and updated every element's press flags, on the same logical thread
    /// that fires timers.
    pub fn on_pointer<S>(&mut self, phase: PointerPhase, space: &S, timers: &mut impl TimerHost)
    where
        S: PressSpace<Key = K>,
    {
        match phase {
            PointerPhase::Down => self.pointer_down(space, timers),
            PointerPhase::Move => {
                // A move only matters once a press is confirmed: if the
                // element no longer reports pressed, the pointer has left it.
                let lost = self
                    .confirmed
                    .is_some_and(|key| !space.press_flags(key).pressed);
                if lost {
                    self.reset(timers);
                }
            }
            PointerPhase::Up => self.pointer_up(space, timers),
            PointerPhase::Cancel => self.reset(timers),
        }
    }

    /// Relay an elapsed timer slot.
    ///
    /// [`TimerSlot::TapConfirm`] re-reads the candidate's live flags and
    /// promotes it if either is still set; the candidate is discarded whether
    /// or not it was promoted. [`TimerSlot::ClearPress`] clears the held
    /// press. A slot firing with nothing pending is a no-op.
    pub fn on_timer<S>(&mut self, slot: TimerSlot, space: &S, timers: &mut impl TimerHost)
    where
        S: PressSpace<Key = K>,
    {
        match slot {
            TimerSlot::TapConfirm => {
                if let Some(candidate) = self.pre_press_candidate.take() {
                    if space.press_flags(candidate).any() {
                        self.set_confirmed(candidate);
                    }
                }
            }
            TimerSlot::ClearPress => self.reset(timers),
        }
    }

    /// The component is being removed from the active hierarchy: cancel the
    /// clear-press timer and reset, so no notification fires against a
    /// defunct tree.
    pub fn on_detach(&mut self, timers: &mut impl TimerHost) {
        timers.cancel(TimerSlot::ClearPress);
        self.reset(timers);
    }

    /// Temporary detach: same handling as [`on_detach`](Self::on_detach).
    pub fn on_temporary_detach(&mut self, timers: &mut impl TimerHost) {
        timers.cancel(TimerSlot::ClearPress);
        self.reset(timers);
    }

    fn pointer_down<S>(&mut self, space: &S, timers: &mut impl TimerHost)
    where
        S: PressSpace<Key = K>,
    {
        self.reset(timers);
        if let Some(found) = find_pressed(space, self.root) {
            let flags = space.press_flags(found);
            if flags.pressed {
                self.set_confirmed(found);
            } else if flags.pre_pressed {
                self.pre_press_candidate = Some(found);
                timers.schedule(TimerSlot::TapConfirm, self.timing.tap_timeout);
            }
        }
    }

    fn pointer_up<S>(&mut self, space: &S, timers: &mut impl TimerHost)
    where
        S: PressSpace<Key = K>,
    {
        // The tap-confirmation timer must never fire after the release.
        timers.cancel(TimerSlot::TapConfirm);
        match self.pre_press_candidate.take() {
            Some(candidate) if space.press_flags(candidate).any() => {
                self.set_confirmed(candidate);
                timers.schedule(TimerSlot::ClearPress, self.timing.pressed_state_duration);
            }
            // No pending candidate, or the press evaporated before release.
            // Note that this clears an element confirmed at pointer-down
            // immediately, without the pressed-state duration.
            _ => self.reset(timers),
        }
    }

    /// Cancel the tap-confirmation timer, drop any pending candidate, and
    /// unpress the confirmed element (notifying callbacks) if there is one.
    fn reset(&mut self, timers: &mut impl TimerHost) {
        timers.cancel(TimerSlot::TapConfirm);
        self.pre_press_candidate = None;
        if let Some(previous) = self.confirmed.take() {
            self.callbacks.notify_unpressed(previous);
        }
    }

    fn set_confirmed(&mut self, key: K) {
        self.confirmed = Some(key);
        self.callbacks.notify_pressed(key);
    }
}

impl<K: fmt::Debug> fmt::Debug for PressDetector<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressDetector")
            .field("root", &self.root)
            .field("timing", &self.timing)
            .field("pre_press_candidate", &self.pre_press_candidate)
            .field("confirmed", &self.confirmed)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerQueue;
    use crate::types::PressFlags;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::time::Duration;

    /// Children, visibility, flags, and exclusion indexed by node id.
    struct Fixture {
        children: Vec<Vec<u32>>,
        flags: Vec<PressFlags>,
        excluded: Vec<bool>,
    }

    impl Fixture {
        fn with_nodes(n: usize) -> Self {
            Self {
                children: vec![Vec::new(); n],
                flags: vec![PressFlags::NONE; n],
                excluded: vec![false; n],
            }
        }

        fn link(&mut self, parent: u32, child: u32) {
            self.children[parent as usize].push(child);
        }

        fn set_flags(&mut self, node: u32, pre_pressed: bool, pressed: bool) {
            self.flags[node as usize] = PressFlags {
                pre_pressed,
                pressed,
            };
        }
    }

    impl PressSpace for Fixture {
        type Key = u32;
        type Children<'a> = core::iter::Copied<core::slice::Iter<'a, u32>>;

        fn children(&self, key: u32) -> Self::Children<'_> {
            self.children[key as usize].iter().copied()
        }
        fn is_visible(&self, _key: u32) -> bool {
            true
        }
        fn press_flags(&self, key: u32) -> PressFlags {
            self.flags[key as usize]
        }
        fn is_excluded(&self, key: u32) -> bool {
            self.excluded[key as usize]
        }
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum Note {
        Pressed(u32),
        Unpressed(u32),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Note>>>);

    impl Recorder {
        fn notes(&self) -> Vec<Note> {
            self.0.borrow().clone()
        }
    }

    impl PressCallback<u32> for Recorder {
        fn on_pressed(&mut self, key: u32) {
            self.0.borrow_mut().push(Note::Pressed(key));
        }
        fn on_unpressed(&mut self, key: u32) {
            self.0.borrow_mut().push(Note::Unpressed(key));
        }
    }

    const TAP: Duration = Duration::from_millis(100);
    const HOLD: Duration = Duration::from_millis(64);

    /// Root 0 with a single child 1, plus a wired detector and timer queue.
    fn harness() -> (Fixture, PressDetector<u32>, TimerQueue, Recorder) {
        let mut space = Fixture::with_nodes(2);
        space.link(0, 1);
        let mut detector = PressDetector::new(0);
        let recorder = Recorder::default();
        detector.add_callback(recorder.clone());
        (space, detector, TimerQueue::new(), recorder)
    }

    fn pump(
        detector: &mut PressDetector<u32>,
        space: &Fixture,
        timers: &mut TimerQueue,
        dt: Duration,
    ) {
        for slot in timers.advance(dt) {
            detector.on_timer(slot, space, timers);
        }
    }

    #[test]
    fn down_on_fully_pressed_child_confirms_immediately() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, false, true);

        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1)]);
        assert_eq!(detector.pressed(), Some(1));
        assert!(
            !timers.is_scheduled(TimerSlot::TapConfirm),
            "a fully pressed child needs no confirmation delay"
        );
    }

    #[test]
    fn down_on_pre_pressed_child_defers_notification() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, true, false);

        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        assert!(recorder.notes().is_empty());
        assert_eq!(detector.pressed(), None);
        assert_eq!(detector.pre_press_candidate(), Some(1));
        assert!(timers.is_scheduled(TimerSlot::TapConfirm));
    }

    #[test]
    fn tap_confirm_with_cleared_flags_never_presses() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        // The press evaporated before the confirmation delay elapsed.
        space.set_flags(1, false, false);
        pump(&mut detector, &space, &mut timers, TAP);

        assert!(recorder.notes().is_empty());
        assert_eq!(detector.pressed(), None);
        assert_eq!(detector.pre_press_candidate(), None);
    }

    #[test]
    fn tap_confirm_promotes_live_candidate() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        space.set_flags(1, true, true);
        pump(&mut detector, &space, &mut timers, TAP);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1)]);
        assert_eq!(detector.pressed(), Some(1));
        assert_eq!(detector.pre_press_candidate(), None);
    }

    #[test]
    fn tap_confirm_accepts_still_pre_pressed_candidate() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        pump(&mut detector, &space, &mut timers, TAP);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1)]);
    }

    #[test]
    fn quick_tap_promotes_at_up_and_holds_for_duration() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        // Release before the tap timeout; the platform has committed the
        // press by now.
        space.set_flags(1, false, true);
        pump(&mut detector, &space, &mut timers, Duration::from_millis(30));
        detector.on_pointer(PointerPhase::Up, &space, &mut timers);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1)]);
        assert!(
            timers.is_scheduled(TimerSlot::ClearPress),
            "release schedules the minimum visible hold, not an immediate clear"
        );
        assert!(!timers.is_scheduled(TimerSlot::TapConfirm));

        pump(&mut detector, &space, &mut timers, HOLD);
        assert_eq!(recorder.notes(), vec![Note::Pressed(1), Note::Unpressed(1)]);
        assert_eq!(detector.pressed(), None);
    }

    #[test]
    fn up_with_evaporated_candidate_resets_silently() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        space.set_flags(1, false, false);
        detector.on_pointer(PointerPhase::Up, &space, &mut timers);

        assert!(recorder.notes().is_empty());
        assert_eq!(detector.pre_press_candidate(), None);
        // The canceled confirmation must not fire later.
        pump(&mut detector, &space, &mut timers, 10 * TAP);
        assert!(recorder.notes().is_empty());
    }

    #[test]
    fn up_after_immediate_confirm_clears_without_hold() {
        // A press confirmed at pointer-down has no pending candidate, so the
        // release takes the reset path and skips the visible-hold delay.
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, false, true);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);
        detector.on_pointer(PointerPhase::Up, &space, &mut timers);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1), Note::Unpressed(1)]);
        assert!(!timers.is_scheduled(TimerSlot::ClearPress));
    }

    #[test]
    fn up_without_down_is_a_noop() {
        let (space, mut detector, mut timers, recorder) = harness();
        detector.on_pointer(PointerPhase::Up, &space, &mut timers);
        assert!(recorder.notes().is_empty());
        assert!(!timers.is_scheduled(TimerSlot::ClearPress));
    }

    #[test]
    fn cancel_unpresses_confirmed_element() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, false, true);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);
        detector.on_pointer(PointerPhase::Cancel, &space, &mut timers);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1), Note::Unpressed(1)]);
        assert_eq!(detector.pressed(), None);
    }

    #[test]
    fn cancel_discards_pending_candidate() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);
        detector.on_pointer(PointerPhase::Cancel, &space, &mut timers);

        assert!(recorder.notes().is_empty());
        pump(&mut detector, &space, &mut timers, 10 * TAP);
        assert!(recorder.notes().is_empty(), "canceled tap must not confirm");
    }

    #[test]
    fn move_resets_once_pressed_flag_is_lost() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, false, true);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        detector.on_pointer(PointerPhase::Move, &space, &mut timers);
        assert_eq!(
            recorder.notes(),
            vec![Note::Pressed(1)],
            "moves while still pressed change nothing"
        );

        space.set_flags(1, false, false);
        detector.on_pointer(PointerPhase::Move, &space, &mut timers);
        assert_eq!(recorder.notes(), vec![Note::Pressed(1), Note::Unpressed(1)]);
    }

    #[test]
    fn move_with_no_confirmed_element_changes_nothing() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);
        detector.on_pointer(PointerPhase::Move, &space, &mut timers);

        assert!(recorder.notes().is_empty());
        assert_eq!(
            detector.pre_press_candidate(),
            Some(1),
            "a pending candidate survives moves"
        );
        assert!(timers.is_scheduled(TimerSlot::TapConfirm));
    }

    #[test]
    fn repeated_down_unpresses_then_re_resolves() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, false, true);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        assert_eq!(
            recorder.notes(),
            vec![Note::Pressed(1), Note::Unpressed(1), Note::Pressed(1)]
        );
    }

    #[test]
    fn down_finding_nothing_only_resets() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, false, true);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        space.set_flags(1, false, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1), Note::Unpressed(1)]);
        assert_eq!(detector.pressed(), None);
        assert!(!timers.is_scheduled(TimerSlot::TapConfirm));
    }

    #[test]
    fn stale_timer_fire_is_a_noop() {
        let (space, mut detector, mut timers, recorder) = harness();
        detector.on_timer(TimerSlot::TapConfirm, &space, &mut timers);
        detector.on_timer(TimerSlot::ClearPress, &space, &mut timers);
        assert!(recorder.notes().is_empty());
    }

    #[test]
    fn detach_cancels_hold_and_unpresses() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);
        space.set_flags(1, false, true);
        detector.on_pointer(PointerPhase::Up, &space, &mut timers);
        assert!(timers.is_scheduled(TimerSlot::ClearPress));

        detector.on_detach(&mut timers);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1), Note::Unpressed(1)]);
        assert!(!timers.is_scheduled(TimerSlot::ClearPress));
        // Nothing left to fire; the hold must not produce a second unpress.
        pump(&mut detector, &space, &mut timers, 10 * HOLD);
        assert_eq!(recorder.notes(), vec![Note::Pressed(1), Note::Unpressed(1)]);
    }

    #[test]
    fn temporary_detach_matches_detach() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, false, true);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        detector.on_temporary_detach(&mut timers);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1), Note::Unpressed(1)]);
    }

    #[test]
    fn excluded_match_suppresses_detection() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        space.set_flags(1, false, true);
        space.excluded[1] = true;

        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        assert!(recorder.notes().is_empty());
        assert_eq!(detector.pressed(), None);
        assert!(!timers.is_scheduled(TimerSlot::TapConfirm));
    }

    #[test]
    fn notifications_come_in_matched_pairs() {
        // Mixed gestures ending in Cancel: every Pressed has its Unpressed.
        let (mut space, mut detector, mut timers, recorder) = harness();

        // Quick tap.
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);
        space.set_flags(1, false, true);
        detector.on_pointer(PointerPhase::Up, &space, &mut timers);
        pump(&mut detector, &space, &mut timers, HOLD);

        // Long press ended by cancel.
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);
        detector.on_pointer(PointerPhase::Cancel, &space, &mut timers);

        // Failed tap.
        space.set_flags(1, true, false);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);
        space.set_flags(1, false, false);
        pump(&mut detector, &space, &mut timers, TAP);

        let notes = recorder.notes();
        let pressed = notes
            .iter()
            .filter(|note| matches!(note, Note::Pressed(_)))
            .count();
        let unpressed = notes
            .iter()
            .filter(|note| matches!(note, Note::Unpressed(_)))
            .count();
        assert_eq!(pressed, unpressed, "unbalanced transitions: {notes:?}");
        assert_eq!(detector.pressed(), None);
    }

    #[test]
    fn removed_callback_is_not_notified() {
        let (mut space, mut detector, mut timers, recorder) = harness();
        let second = Recorder::default();
        let id = detector.add_callback(second.clone());
        detector.remove_callback(id);

        space.set_flags(1, false, true);
        detector.on_pointer(PointerPhase::Down, &space, &mut timers);

        assert_eq!(recorder.notes(), vec![Note::Pressed(1)]);
        assert!(second.notes().is_empty());
    }
}
