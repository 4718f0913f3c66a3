// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press detection basics.
//!
//! Walk a detector through a tap, a long press, and a cancel over a small
//! tree, printing every transition a host would observe.
//!
//! Run:
//! - `cargo run -p pressed_state_demos --example press_basics`

use std::time::Duration;

use pressed_state::{PointerPhase, PressCallback, PressDetector, TimerQueue};
use pressed_state_tree::{NodeFlags, NodeId, PressTree};

struct Narrator;

impl PressCallback<NodeId> for Narrator {
    fn on_pressed(&mut self, key: NodeId) {
        println!("  -> pressed {key:?}");
    }
    fn on_unpressed(&mut self, key: NodeId) {
        println!("  -> unpressed {key:?}");
    }
}

fn pump(detector: &mut PressDetector<NodeId>, tree: &PressTree, timers: &mut TimerQueue, dt: Duration) {
    for slot in timers.advance(dt) {
        detector.on_timer(slot, tree, timers);
    }
}

fn main() {
    // A toolbar with two buttons.
    let mut tree = PressTree::new();
    let toolbar = tree.insert(None, NodeFlags::default());
    let save = tree.insert(Some(toolbar), NodeFlags::default());
    let undo = tree.insert(Some(toolbar), NodeFlags::default());

    let mut detector = PressDetector::new(toolbar);
    detector.add_callback(Narrator);
    let mut timers = TimerQueue::new();

    println!("tap on {save:?} (pre-press, confirm at release):");
    tree.set_pre_pressed(save, true);
    detector.on_pointer(PointerPhase::Down, &tree, &mut timers);
    pump(&mut detector, &tree, &mut timers, Duration::from_millis(30));
    tree.set_pre_pressed(save, false);
    tree.set_pressed(save, true);
    detector.on_pointer(PointerPhase::Up, &tree, &mut timers);
    pump(&mut detector, &tree, &mut timers, Duration::from_millis(64));
    tree.set_pressed(save, false);

    println!("long press on {undo:?} (confirmed by the tap timeout):");
    tree.set_pre_pressed(undo, true);
    detector.on_pointer(PointerPhase::Down, &tree, &mut timers);
    tree.set_pre_pressed(undo, false);
    tree.set_pressed(undo, true);
    pump(&mut detector, &tree, &mut timers, Duration::from_millis(100));
    println!("  ...scroll starts, the platform cancels:");
    detector.on_pointer(PointerPhase::Cancel, &tree, &mut timers);
    tree.set_pressed(undo, false);

    println!("excluded button stays silent:");
    tree.exclude(undo);
    tree.set_pressed(undo, true);
    detector.on_pointer(PointerPhase::Down, &tree, &mut timers);
    println!("  (no transition)");
}
