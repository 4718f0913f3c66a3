// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press search: locate the first pressed or pre-pressed descendant of a root.

use crate::types::PressSpace;

/// Internal traversal result.
///
/// `Excluded` is distinct from `Miss` so that hitting an excluded element
/// unwinds the entire traversal instead of resuming with the next sibling at
/// some ancestor level.
enum SearchStep<K> {
    Found(K),
    Excluded,
    Miss,
}

/// Find the first pressed or pre-pressed descendant of `root`, or `None`.
///
/// The traversal is depth-first and pre-order over [`PressSpace::children`]:
/// each child is fully evaluated, including its subtree, before its next
/// sibling. Invisible children are skipped together with their subtrees. The
/// first child whose [`press_flags`](PressSpace::press_flags) show either flag
/// set is the result — unless it is excluded, in which case the whole search
/// aborts and returns `None`, even if a later sibling would also match.
/// `root` itself is never a candidate; only descendants are inspected.
///
/// ## Example
///
/// ```
/// use pressed_state::{find_pressed, PressFlags, PressSpace};
///
/// /// Children and flags indexed by node id; node 0 is the root.
/// struct Fixture {
///     children: Vec<Vec<usize>>,
///     flags: Vec<PressFlags>,
/// }
///
/// impl PressSpace for Fixture {
///     type Key = usize;
///     type Children<'a> = core::iter::Copied<core::slice::Iter<'a, usize>>;
///
///     fn children(&self, key: usize) -> Self::Children<'_> {
///         self.children[key].iter().copied()
///     }
///     fn is_visible(&self, _key: usize) -> bool {
///         true
///     }
///     fn press_flags(&self, key: usize) -> PressFlags {
///         self.flags[key]
///     }
///     fn is_excluded(&self, _key: usize) -> bool {
///         false
///     }
/// }
///
/// // root (0) → { 1, 2 }, with 2 pressed.
/// let mut space = Fixture {
///     children: vec![vec![1, 2], vec![], vec![]],
///     flags: vec![PressFlags::NONE; 3],
/// };
/// space.flags[2].pressed = true;
///
/// assert_eq!(find_pressed(&space, 0), Some(2));
/// ```
#[must_use]
pub fn find_pressed<S: PressSpace>(space: &S, root: S::Key) -> Option<S::Key> {
    match search_children(space, root) {
        SearchStep::Found(key) => Some(key),
        SearchStep::Excluded | SearchStep::Miss => None,
    }
}

fn search_children<S: PressSpace>(space: &S, node: S::Key) -> SearchStep<S::Key> {
    for child in space.children(node) {
        if !space.is_visible(child) {
            continue;
        }
        if space.press_flags(child).any() {
            if space.is_excluded(child) {
                return SearchStep::Excluded;
            }
            return SearchStep::Found(child);
        }
        match search_children(space, child) {
            SearchStep::Miss => {}
            // Found and Excluded both unwind without visiting more siblings.
            step => return step,
        }
    }
    SearchStep::Miss
}
