/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Segment tree implementation.
//!
//! This module contains the tree façade: construction, argument validation and
//! introspection. The recursive algorithms are split into sub-modules by concern:
//! - [`query`]: Read path (point and range queries)
//! - [`update`]: Write path (eager updates, lazy updates, flushing pending changes)

#[cfg(all(feature = "unittest", not(miri)))]
mod invariants;
mod query;
mod update;

use std::fmt;
use std::ops::RangeInclusive;

use tracing::debug;

use crate::arena::{NodeArena, NodeIndex};
use crate::ops::FromValues;
use crate::{Initializer, Result, SegmentTreeError, SegmentTreeNode, Span};

/// A segment tree over the positions `[0, len)`.
///
/// # Type Parameters
///
/// - `V`: the value stored at each position.
/// - `I`: the [`Initializer`] producing the value of a position when its leaf is created.
/// - `C`: the [`Change`](crate::Change) type accepted by [`Self::lazy_update`]. Eager
///   updates accept any change type.
///
/// # Arena Storage
///
/// All nodes are stored in a [`NodeArena`]. Children are referenced by
/// [`NodeIndex`] instead of `Box<SegmentTreeNode>`. Nodes are created on first
/// use and are never removed, so memory grows with the number of distinct
/// positions touched: a tree that has been fully traversed holds `2 * len - 1` nodes.
///
/// # Lazy Updates
///
/// A lazy update stops at the first internal node it reaches and is recorded there
/// as a pending change. Every operation that later needs to descend through that
/// node first pushes the pending change one level down (a _flush_). Since queries
/// may flush, they take `&mut self` as well.
pub struct SegmentTree<V, I, C> {
    /// Number of positions in the tree.
    len: usize,
    /// The root node index. `None` for an empty tree.
    root: Option<NodeIndex>,
    /// Arena holding all materialized nodes.
    nodes: NodeArena<V, C>,
    /// Produces the value of each position when its leaf is created.
    initializer: I,
}

impl<V, I, C> SegmentTree<V, I, C>
where
    I: Initializer<V>,
{
    /// The largest number of positions a tree can hold.
    ///
    /// A fully materialized tree over `len` positions holds `2 * len - 1` nodes,
    /// all of which must be addressable by a [`NodeIndex`].
    pub const MAXIMUM_LEN: usize = NodeArena::<V, C>::MAX_NODES / 2 + 1;

    /// Create a new tree over the positions `[0, len)`.
    ///
    /// Only the root node is created. Values are produced by `initializer` the
    /// first time the leaf covering a position is created. A `len` of zero
    /// creates an empty tree, on which every index-based call fails.
    ///
    /// # Errors
    ///
    /// - [`SegmentTreeError::TooManyPositions`] if `len` exceeds [`Self::MAXIMUM_LEN`].
    /// - [`SegmentTreeError::NotEnoughValues`] if `len` exceeds the
    ///   [`Initializer::max_len`] of `initializer`.
    pub fn new(len: usize, initializer: I) -> Result<Self> {
        if len > Self::MAXIMUM_LEN {
            debug!(len, max = Self::MAXIMUM_LEN, "rejected segment tree length");
            return Err(SegmentTreeError::TooManyPositions {
                len,
                max: Self::MAXIMUM_LEN,
            });
        }
        if let Some(available) = initializer.max_len()
            && available < len
        {
            debug!(len, available, "rejected initializer shorter than the tree");
            return Err(SegmentTreeError::NotEnoughValues { len, available });
        }

        let mut nodes = NodeArena::new();
        let root = (len > 0).then(|| {
            let span = Span::new(0, len - 1);
            nodes.insert(SegmentTreeNode::new(span, |index| {
                initializer.initial_value(index)
            }))
        });
        debug!(len, "created segment tree");

        Ok(Self {
            len,
            root,
            nodes,
            initializer,
        })
    }
}

impl<V: Clone, C> SegmentTree<V, FromValues<V>, C> {
    /// Create a new tree with one position per value, position `i` starting
    /// with `values[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentTreeError::TooManyPositions`] if there are more than
    /// [`Self::MAXIMUM_LEN`] values.
    pub fn from_values(values: Vec<V>) -> Result<Self> {
        Self::new(values.len(), FromValues(values))
    }
}

impl<V, I, C> SegmentTree<V, I, C> {
    /// Get the number of positions in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree has no positions.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the initializer used to create leaf values.
    pub const fn initializer(&self) -> &I {
        &self.initializer
    }

    /// Get the root node index, if the tree is not empty.
    pub const fn root_index(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Get a reference to the root node, if the tree is not empty.
    pub fn root(&self) -> Option<&SegmentTreeNode<V, C>> {
        self.root.map(|idx| &self.nodes[idx])
    }

    /// Resolve a [`NodeIndex`] to a shared reference to the node.
    ///
    /// Returns `None` if the index does not belong to this tree.
    pub fn node(&self, idx: NodeIndex) -> Option<&SegmentTreeNode<V, C>> {
        self.nodes.get(idx)
    }

    /// Get the number of nodes created so far.
    pub const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of internal nodes currently holding a pending change.
    pub fn pending_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|(_, node)| node.pending().is_some())
            .count()
    }

    /// Calculate the memory usage of the tree, in bytes.
    ///
    /// Pending changes are shared through reference counting and are not included.
    pub const fn mem_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.nodes.mem_usage()
    }

    /// Returns an iterator over all created nodes (pre-order depth-first traversal).
    ///
    /// Iterating neither creates nodes nor flushes pending changes.
    pub fn iter(&self) -> crate::PreOrderDfsIterator<'_, V, I, C> {
        crate::PreOrderDfsIterator::new(self)
    }

    /// Validate `range` against the tree bounds.
    ///
    /// Returns the root index together with the validated span.
    fn validate(&self, range: RangeInclusive<usize>) -> Result<(NodeIndex, Span)> {
        let (start, end) = range.into_inner();
        let root = match self.root {
            Some(root) if end < self.len => root,
            _ => {
                debug!(index = end, len = self.len, "rejected out of range access");
                return Err(SegmentTreeError::OutOfRange {
                    index: end,
                    len: self.len,
                });
            }
        };
        if start > end {
            debug!(start, end, "rejected inverted range");
            return Err(SegmentTreeError::InvalidRange { start, end });
        }
        Ok((root, Span::new(start, end)))
    }
}

impl<V, I, C> fmt::Debug for SegmentTree<V, I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("len", &self.len)
            .field("node_count", &self.node_count())
            .field("pending_count", &self.pending_count())
            .finish_non_exhaustive()
    }
}
