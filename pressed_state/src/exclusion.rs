// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exclusion side table for hosts whose element type cannot carry the flag.

use core::hash::Hash;

use hashbrown::HashSet;

/// Set of element identities that have opted out of press detection.
///
/// Trees that own their element records usually store exclusion as a flag on
/// the record itself and answer [`PressSpace::is_excluded`](crate::PressSpace::is_excluded)
/// from it. When the element type belongs to a foreign framework, keep an
/// `ExclusionSet` beside the tree instead and answer the query from here.
///
/// Exclusion is one-way: once excluded, a key stays excluded until the whole
/// set is cleared (typically at tree teardown, when its keys die anyway).
///
/// ## Example
///
/// ```
/// use pressed_state::ExclusionSet;
///
/// let mut excluded = ExclusionSet::new();
/// assert!(excluded.exclude(7_u32));
/// assert!(!excluded.exclude(7), "already excluded");
/// assert!(excluded.is_excluded(7));
/// assert!(!excluded.is_excluded(8));
/// ```
#[derive(Clone, Debug)]
pub struct ExclusionSet<K>
where
    K: Copy + Eq + Hash,
{
    keys: HashSet<K>,
}

impl<K> Default for ExclusionSet<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ExclusionSet<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }

    /// Marks `key` as excluded. Returns `true` if it was newly excluded.
    pub fn exclude(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    /// Returns `true` if `key` has been excluded.
    #[must_use]
    pub fn is_excluded(&self, key: K) -> bool {
        self.keys.contains(&key)
    }

    /// Number of excluded keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Drops every exclusion. Intended for tree teardown, where stale keys
    /// would otherwise accumulate forever.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
