/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Arena storage for segment tree nodes.
//!
//! Nodes are never removed from a segment tree, so the arena is a plain
//! append-only vector. Children are referenced by [`NodeIndex`] instead of
//! `Box<SegmentTreeNode>`, which keeps nodes contiguous in memory.

use std::ops::{Index, IndexMut};

use crate::SegmentTreeNode;

/// Index into the node arena.
///
/// A lightweight handle that stays valid for the whole lifetime of the tree
/// it was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeIndex(u32);

impl NodeIndex {
    /// The position of the node inside the arena.
    pub const fn position(self) -> usize {
        self.0 as usize
    }
}

/// Append-only storage for [`SegmentTreeNode`]s.
pub(crate) struct NodeArena<V, C> {
    nodes: Vec<SegmentTreeNode<V, C>>,
}

impl<V, C> NodeArena<V, C> {
    /// The largest number of nodes the arena can address.
    pub(crate) const MAX_NODES: usize = u32::MAX as usize;

    /// Create a new empty arena.
    pub(crate) const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Get the number of nodes currently stored in the arena.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Get a shared reference to a node in the arena, if it exists.
    pub(crate) fn get(&self, idx: NodeIndex) -> Option<&SegmentTreeNode<V, C>> {
        self.nodes.get(idx.position())
    }

    /// Insert a node into the arena, returning its index.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds [`Self::MAX_NODES`] nodes.
    /// [`SegmentTree::new`](crate::SegmentTree::new) rejects lengths whose full
    /// tree would exceed that bound, so this never fires for a validated tree.
    pub(crate) fn insert(&mut self, node: SegmentTreeNode<V, C>) -> NodeIndex {
        let position = u32::try_from(self.nodes.len()).expect("Node arena is full");
        self.nodes.push(node);
        NodeIndex(position)
    }

    /// Iterate over all nodes in the arena, in creation order.
    ///
    /// Yields `(NodeIndex, &SegmentTreeNode)` pairs.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeIndex, &SegmentTreeNode<V, C>)> {
        self.nodes
            .iter()
            .enumerate()
            // `insert` guarantees every position fits in a `u32`.
            .map(|(position, node)| (NodeIndex(position as u32), node))
    }

    /// Get the memory usage of the arena, in bytes.
    ///
    /// This accounts for the allocated capacity, not just the occupied slots.
    pub(crate) const fn mem_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<SegmentTreeNode<V, C>>()
    }
}

impl<V, C> Index<NodeIndex> for NodeArena<V, C> {
    type Output = SegmentTreeNode<V, C>;

    fn index(&self, idx: NodeIndex) -> &Self::Output {
        &self.nodes[idx.position()]
    }
}

impl<V, C> IndexMut<NodeIndex> for NodeArena<V, C> {
    fn index_mut(&mut self, idx: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[idx.position()]
    }
}
