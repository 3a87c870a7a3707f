/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Iterator for traversing the segment tree.
//!
//! Provides a depth-first traversal over the nodes created so far, useful for
//! debugging or collecting statistics.

use crate::arena::NodeIndex;
use crate::{SegmentTree, SegmentTreeNode};

/// An iterator that performs a depth-first traversal of the segment tree.
///
/// Only nodes that have been created are visited. The traversal is read-only:
/// it neither creates nodes nor flushes pending changes, so values found at the
/// leaves may still be affected by pending changes held by their ancestors.
///
/// # Traversal Order
///
/// Nodes are visited in pre-order (parent before children), with left children
/// visited before right children. Leaves are therefore visited in position order.
pub struct PreOrderDfsIterator<'a, V, I, C> {
    /// Reference to the tree (used to resolve node indices).
    tree: &'a SegmentTree<V, I, C>,
    /// Stack of node indices to visit. Nodes are pushed right-first so left is
    /// processed first (LIFO order).
    stack: Vec<NodeIndex>,
}

impl<'a, V, I, C> PreOrderDfsIterator<'a, V, I, C> {
    /// Create a new iterator starting from the root of the given tree.
    pub fn new(tree: &'a SegmentTree<V, I, C>) -> Self {
        let mut stack = Vec::with_capacity(8);
        stack.extend(tree.root_index());
        Self { tree, stack }
    }

    /// Create a new iterator starting from the given node index in the tree.
    ///
    /// # Panics
    ///
    /// Iterating panics if `node_idx` does not belong to `tree`.
    pub fn from_node(tree: &'a SegmentTree<V, I, C>, node_idx: NodeIndex) -> Self {
        Self {
            tree,
            stack: vec![node_idx],
        }
    }
}

impl<'a, V, I, C> Iterator for PreOrderDfsIterator<'a, V, I, C> {
    type Item = &'a SegmentTreeNode<V, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let node_idx = self.stack.pop()?;
        let node = self
            .tree
            .node(node_idx)
            .expect("Node index does not belong to this tree");

        let (left, right) = node.child_indices();
        // Push children onto stack (right first so left is processed first)
        self.stack.extend(right);
        self.stack.extend(left);

        Some(node)
    }
}

impl<'a, V, I, C> IntoIterator for &'a SegmentTree<V, I, C> {
    type Item = &'a SegmentTreeNode<V, C>;
    type IntoIter = PreOrderDfsIterator<'a, V, I, C>;

    fn into_iter(self) -> Self::IntoIter {
        PreOrderDfsIterator::new(self)
    }
}
