// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree container: slot storage, child lists, and flag updates.

use alloc::vec::Vec;

use pressed_state::{PressFlags, PressSpace};
use smallvec::SmallVec;

use crate::types::{NodeFlags, NodeId};

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    flags: NodeFlags,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A tree of interaction nodes carrying press flags.
///
/// Nodes are addressed by generational [`NodeId`] handles. Child order is
/// insertion order, which is also the order the press search visits siblings
/// in. The host writes press state through [`set_pressed`](Self::set_pressed)
/// and [`set_pre_pressed`](Self::set_pre_pressed) as its own event dispatch
/// decides, then lets a
/// [`PressDetector`](pressed_state::PressDetector) inspect the tree.
///
/// Ordinary queries ([`flags`](Self::flags), [`parent`](Self::parent),
/// [`children`](Self::children)) tolerate stale ids by returning
/// `None`/empty. The [`PressSpace`] implementation does not: a stale id
/// reaching a press query means the host kept a key across a removal it also
/// initiated, and panics.
#[derive(Clone, Debug, Default)]
pub struct PressTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl PressTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a node under `parent`, appending to its child list; `None`
    /// creates a detached root. Several roots may coexist; a detector is
    /// constructed over one of them.
    ///
    /// ## Panics
    ///
    /// Panics if `parent` is stale.
    pub fn insert(&mut self, parent: Option<NodeId>, flags: NodeFlags) -> NodeId {
        if let Some(parent) = parent {
            assert!(self.is_alive(parent), "insert under a stale parent NodeId");
        }
        let node = Node {
            parent,
            children: SmallVec::new(),
            flags,
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation += 1;
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = u32::try_from(self.slots.len()).expect("slot index exceeds u32");
                self.slots.push(Slot {
                    generation: 1,
                    node: Some(node),
                });
                NodeId::new(index, 1)
            }
        };
        if let Some(parent) = parent {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.push(id);
            }
        }
        self.len += 1;
        id
    }

    /// Removes `id` and its whole subtree, freeing their slots. Returns
    /// `false` if `id` was already stale.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(parent) = self.node(id).and_then(|node| node.parent) {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.retain(|&mut child| child != id);
            }
        }
        let mut stack: SmallVec<[NodeId; 8]> = SmallVec::new();
        stack.push(id);
        while let Some(current) = stack.pop() {
            let Some(node) = self.slots[current.idx()].node.take() else {
                continue;
            };
            stack.extend(node.children.iter().copied());
            self.free.push(current.0);
            self.len -= 1;
        }
        true
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// The node's flags, or `None` if `id` is stale.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node(id).map(|node| node.flags)
    }

    /// The node's parent, or `None` for roots and stale ids.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// The node's children in insertion order; empty for leaves and stale ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(node) => node.children.as_slice(),
            None => &[],
        }
    }

    /// Sets or clears visibility. Returns `false` if `id` is stale.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        self.update_flag(id, NodeFlags::VISIBLE, visible)
    }

    /// Sets or clears the confirmed-press flag. Returns `false` if `id` is
    /// stale.
    pub fn set_pressed(&mut self, id: NodeId, pressed: bool) -> bool {
        self.update_flag(id, NodeFlags::PRESSED, pressed)
    }

    /// Sets or clears the provisional-press flag. Returns `false` if `id` is
    /// stale.
    pub fn set_pre_pressed(&mut self, id: NodeId, pre_pressed: bool) -> bool {
        self.update_flag(id, NodeFlags::PREPRESSED, pre_pressed)
    }

    /// Opts `id` out of press detection for the rest of its lifetime. There
    /// is deliberately no inverse operation. Returns `false` if `id` is
    /// stale.
    pub fn exclude(&mut self, id: NodeId) -> bool {
        self.update_flag(id, NodeFlags::EXCLUDED, true)
    }

    fn update_flag(&mut self, id: NodeId, flag: NodeFlags, value: bool) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.flags.set(flag, value);
                true
            }
            None => false,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_mut()
    }

    /// Press queries treat stale ids as integration bugs.
    fn require(&self, id: NodeId) -> &Node {
        self.node(id).expect("press query on a stale NodeId")
    }
}

impl PressSpace for PressTree {
    type Key = NodeId;
    type Children<'a> = core::iter::Copied<core::slice::Iter<'a, NodeId>>;

    fn children(&self, key: NodeId) -> Self::Children<'_> {
        self.require(key).children.iter().copied()
    }

    fn is_visible(&self, key: NodeId) -> bool {
        self.require(key).flags.contains(NodeFlags::VISIBLE)
    }

    fn press_flags(&self, key: NodeId) -> PressFlags {
        let flags = self.require(key).flags;
        PressFlags {
            pre_pressed: flags.contains(NodeFlags::PREPRESSED),
            pressed: flags.contains(NodeFlags::PRESSED),
        }
    }

    fn is_excluded(&self, key: NodeId) -> bool {
        self.require(key).flags.contains(NodeFlags::EXCLUDED)
    }
}
