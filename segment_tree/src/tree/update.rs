/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Write path: eager updates, lazy updates and flushing.
//!
//! # Flush-then-set
//!
//! An internal node holds at most one pending change. Before a node records a new
//! pending change, or before any operation descends through it, its current
//! pending change is pushed to its children. Two pending changes are therefore
//! never combined in place, and older changes always reach a position before
//! newer ones.
//!
//! # Clamping
//!
//! Every recursive call receives the intersection of the caller's span with the
//! span of the child it descends into. Children are only visited when that
//! intersection is non-empty, so the callee's span always contains the span it
//! receives.

use std::ops::RangeInclusive;
use std::rc::Rc;

use tracing::trace;

use super::SegmentTree;
use crate::arena::NodeIndex;
use crate::{Change, Initializer, PendingChange, Result, SegmentTreeNode, Side, Span};

impl<V, I, C> SegmentTree<V, I, C>
where
    I: Initializer<V>,
    C: Change<V>,
{
    /// Apply `change` to the value at a single position.
    ///
    /// Equivalent to `self.update(index..=index, change)`.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentTreeError::OutOfRange`](crate::SegmentTreeError::OutOfRange)
    /// if `index >= self.len()`.
    pub fn update_at<U: Change<V>>(&mut self, index: usize, change: &U) -> Result<()> {
        self.update(index..=index, change)
    }

    /// Apply `change` to every position in `range`, immediately.
    ///
    /// Every leaf in the range is created (if needed) and recomputed through
    /// [`Change::apply`] before this method returns.
    ///
    /// # Errors
    ///
    /// - [`SegmentTreeError::OutOfRange`](crate::SegmentTreeError::OutOfRange) if the
    ///   end of the range is not smaller than `self.len()`.
    /// - [`SegmentTreeError::InvalidRange`](crate::SegmentTreeError::InvalidRange) if
    ///   the start of the range exceeds its end.
    pub fn update<U: Change<V>>(&mut self, range: RangeInclusive<usize>, change: &U) -> Result<()> {
        let (root, span) = self.validate(range)?;
        self.update_node(root, span, change);

        #[cfg(all(feature = "unittest", not(miri)))]
        self.check_tree_invariants();

        Ok(())
    }

    /// Apply `change` to the value at a single position, lazily.
    ///
    /// Equivalent to `self.lazy_update(index..=index, change)`.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentTreeError::OutOfRange`](crate::SegmentTreeError::OutOfRange)
    /// if `index >= self.len()`.
    pub fn lazy_update_at(&mut self, index: usize, change: C) -> Result<()> {
        self.lazy_update(index..=index, change)
    }

    /// Apply `change` to every position in `range`, deferring the work.
    ///
    /// If the root is a leaf the change is applied right away. Otherwise the root
    /// flushes its current pending change and records `change` as its new pending
    /// change, without descending any further. The change reaches the leaves
    /// progressively, one level per visit, as later operations descend through
    /// the tree.
    ///
    /// # Errors
    ///
    /// - [`SegmentTreeError::OutOfRange`](crate::SegmentTreeError::OutOfRange) if the
    ///   end of the range is not smaller than `self.len()`.
    /// - [`SegmentTreeError::InvalidRange`](crate::SegmentTreeError::InvalidRange) if
    ///   the start of the range exceeds its end.
    pub fn lazy_update(&mut self, range: RangeInclusive<usize>, change: C) -> Result<()> {
        let (root, span) = self.validate(range)?;
        self.lazy_update_node(root, span, Rc::new(change));

        #[cfg(all(feature = "unittest", not(miri)))]
        self.check_tree_invariants();

        Ok(())
    }

    /// Push every pending change down to the leaves.
    ///
    /// Afterwards no node holds a pending change. Leaves covered by a pending
    /// change are created if needed; untouched subtrees are left alone.
    pub fn flush_all(&mut self) {
        if let Some(root) = self.root {
            self.flush_subtree(root);
        }

        #[cfg(all(feature = "unittest", not(miri)))]
        self.check_tree_invariants();
    }

    /// Returns the value of every position, in order.
    ///
    /// This creates every node of the tree and flushes every pending change.
    pub fn values(&mut self) -> Vec<V>
    where
        V: Clone,
    {
        let mut values = Vec::with_capacity(self.len);
        if let Some(root) = self.root {
            self.collect_values(root, &mut values);
        }

        #[cfg(all(feature = "unittest", not(miri)))]
        self.check_tree_invariants();

        values
    }

    /// Recursively apply `change` to every leaf in `span`.
    fn update_node<U: Change<V>>(&mut self, node_idx: NodeIndex, span: Span, change: &U) {
        let node_span = match &mut self.nodes[node_idx] {
            SegmentTreeNode::Leaf(leaf) => {
                leaf.value = change.apply(&leaf.value);
                return;
            }
            SegmentTreeNode::Internal(internal) => internal.span(),
        };
        debug_assert!(
            node_span.contains(span),
            "update {span} escapes node {node_span}"
        );

        self.flush(node_idx);

        for side in [Side::Left, Side::Right] {
            if let Some(sub_span) = span.intersect(node_span.half(side)) {
                let child = self.child(node_idx, side);
                self.update_node(child, sub_span, change);
            }
        }
    }

    /// Apply `change` to a leaf, or record it as the pending change of an internal node.
    fn lazy_update_node(&mut self, node_idx: NodeIndex, span: Span, change: Rc<C>) {
        if let SegmentTreeNode::Leaf(leaf) = &mut self.nodes[node_idx] {
            leaf.value = <C as Change<V>>::apply(&change, &leaf.value);
            return;
        }

        self.flush(node_idx);

        let internal = self.nodes[node_idx]
            .as_internal_mut()
            .expect("Leaf nodes are handled above");
        internal.set_pending(PendingChange { span, change });
    }

    /// Push the pending change of an internal node one level down, if there is one.
    ///
    /// Each child receives the change restricted to its own span, through
    /// [`Self::lazy_update_node`]: internal children record it as their own pending
    /// change, leaves apply it.
    ///
    /// The pending change is taken from the node before pushing. If a change panics
    /// while being applied to a leaf, the node has already lost it and the tree is
    /// left partially flushed.
    pub(super) fn flush(&mut self, node_idx: NodeIndex) {
        let Some(internal) = self.nodes[node_idx].as_internal_mut() else {
            return;
        };
        let Some(pending) = internal.take_pending() else {
            return;
        };
        let node_span = internal.span();
        trace!(node = %node_span, change = %pending.span, "flushing pending change");

        for side in [Side::Left, Side::Right] {
            if let Some(sub_span) = pending.span.intersect(node_span.half(side)) {
                let child = self.child(node_idx, side);
                self.lazy_update_node(child, sub_span, Rc::clone(&pending.change));
            }
        }
    }

    /// Get the child on the given side of an internal node, creating it if needed.
    ///
    /// A child covering a single position is a leaf: its value is produced by the
    /// initializer as part of its creation.
    ///
    /// # Panics
    ///
    /// Panics if `node_idx` refers to a leaf.
    pub(super) fn child(&mut self, node_idx: NodeIndex, side: Side) -> NodeIndex {
        let internal = self.nodes[node_idx]
            .as_internal_mut()
            .expect("Leaf nodes have no children");
        if let Some(child) = internal.child_index(side) {
            return child;
        }

        let span = internal.span().half(side);
        trace!(parent = %internal.span(), child = %span, "creating node");
        let initializer = &self.initializer;
        let child = self.nodes.insert(SegmentTreeNode::new(span, |index| {
            initializer.initial_value(index)
        }));

        self.nodes[node_idx]
            .as_internal_mut()
            .expect("Leaf nodes have no children")
            .set_child(side, child);
        child
    }

    /// Flush every pending change in the subtree rooted at `node_idx`.
    fn flush_subtree(&mut self, node_idx: NodeIndex) {
        self.flush(node_idx);

        let (left, right) = self.nodes[node_idx].child_indices();
        for child in [left, right].into_iter().flatten() {
            self.flush_subtree(child);
        }
    }

    /// Append the value of every position covered by `node_idx` to `values`, in order.
    fn collect_values(&mut self, node_idx: NodeIndex, values: &mut Vec<V>)
    where
        V: Clone,
    {
        if let SegmentTreeNode::Leaf(leaf) = &self.nodes[node_idx] {
            values.push(leaf.value.clone());
            return;
        }

        self.flush(node_idx);

        for side in [Side::Left, Side::Right] {
            let child = self.child(node_idx, side);
            self.collect_values(child, values);
        }
    }
}
