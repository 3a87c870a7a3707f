/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Read path: point and range queries.
//!
//! Internal nodes cache no aggregate, so every query descends to the leaves of
//! the requested range and combines their outputs on the way back up. Pending
//! changes met along the way are flushed before descending.

use std::ops::RangeInclusive;

use super::SegmentTree;
use crate::arena::NodeIndex;
use crate::{Change, Initializer, Query, Result, SegmentTreeNode, Side, Span};

impl<V, I, C> SegmentTree<V, I, C>
where
    I: Initializer<V>,
    C: Change<V>,
{
    /// Query the value at a single position.
    ///
    /// Equivalent to `self.query(index..=index, query)`.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentTreeError::OutOfRange`](crate::SegmentTreeError::OutOfRange)
    /// if `index >= self.len()`.
    pub fn query_at<Q: Query<V>>(&mut self, index: usize, query: &Q) -> Result<Q::Output> {
        self.query(index..=index, query)
    }

    /// Compute `query` over every position in `range`.
    ///
    /// The output of each leaf is produced by [`Query::produce`]; adjacent outputs
    /// are combined left to right with [`Query::merge`].
    ///
    /// # Errors
    ///
    /// - [`SegmentTreeError::OutOfRange`](crate::SegmentTreeError::OutOfRange) if the
    ///   end of the range is not smaller than `self.len()`.
    /// - [`SegmentTreeError::InvalidRange`](crate::SegmentTreeError::InvalidRange) if
    ///   the start of the range exceeds its end.
    pub fn query<Q: Query<V>>(
        &mut self,
        range: RangeInclusive<usize>,
        query: &Q,
    ) -> Result<Q::Output> {
        let (root, span) = self.validate(range)?;
        let output = self.query_node(root, span, query);

        #[cfg(all(feature = "unittest", not(miri)))]
        self.check_tree_invariants();

        Ok(output)
    }

    /// Recursively compute `query` over `span`.
    ///
    /// `span` must lie within the span of the node at `node_idx`.
    ///
    /// # Split handling
    ///
    /// - **Left only**: the span ends at or before `mid1`.
    /// - **Right only**: the span starts at or after `mid2`.
    /// - **Straddling**: the span is cut at the split point; `[start, mid1]` goes
    ///   left, `[mid2, end]` goes right and the two outputs are merged.
    fn query_node<Q: Query<V>>(
        &mut self,
        node_idx: NodeIndex,
        span: Span,
        query: &Q,
    ) -> Q::Output {
        let node_span = match &self.nodes[node_idx] {
            SegmentTreeNode::Leaf(leaf) => return query.produce(&leaf.value),
            SegmentTreeNode::Internal(internal) => internal.span(),
        };
        debug_assert!(
            node_span.contains(span),
            "query {span} escapes node {node_span}"
        );

        self.flush(node_idx);

        let left_span = node_span.half(Side::Left);
        let right_span = node_span.half(Side::Right);

        if span.end <= left_span.end {
            let left = self.child(node_idx, Side::Left);
            self.query_node(left, span, query)
        } else if span.start >= right_span.start {
            let right = self.child(node_idx, Side::Right);
            self.query_node(right, span, query)
        } else {
            let left = self.child(node_idx, Side::Left);
            let left_output = self.query_node(left, Span::new(span.start, left_span.end), query);
            let right = self.child(node_idx, Side::Right);
            let right_output = self.query_node(right, Span::new(right_span.start, span.end), query);
            query.merge(left_output, right_output)
        }
    }
}
