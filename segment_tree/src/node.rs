/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! SegmentTreeNode - A node in the segment tree.

use std::fmt;
use std::rc::Rc;

use crate::arena::NodeIndex;

/// An inclusive interval of positions, `[start, end]`.
///
/// A span always covers at least one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// First position covered by the interval.
    pub start: usize,
    /// Last position covered by the interval.
    pub end: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Span {
    /// Creates the interval `[start, end]`.
    ///
    /// `start` must not exceed `end`.
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must not exceed its end");
        Self { start, end }
    }

    /// Creates the interval covering the single position `index`.
    pub const fn point(index: usize) -> Self {
        Self::new(index, index)
    }

    /// Number of positions covered by the interval.
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Returns true if the interval covers exactly one position.
    pub const fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `other` lies entirely within this interval.
    pub const fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The intersection of the two intervals, if they overlap.
    pub fn intersect(&self, other: Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Span { start, end })
    }

    /// The last position of the left half, `mid1`.
    ///
    /// The split is left-biased: the left half `[start, mid1]` is never shorter
    /// than the right half `[mid1 + 1, end]`.
    pub const fn mid(&self) -> usize {
        self.start + (self.end - self.start) / 2
    }

    /// The interval covered by the child on the given side.
    ///
    /// Must only be called on intervals covering more than one position.
    pub const fn half(&self, side: Side) -> Span {
        debug_assert!(!self.is_point(), "Cannot split a single position");
        match side {
            Side::Left => Span::new(self.start, self.mid()),
            Side::Right => Span::new(self.mid() + 1, self.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Identifies one of the two children of an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The child covering `[start, mid1]`.
    Left,
    /// The child covering `[mid2, end]`.
    Right,
}

/// A change recorded on an internal node and not yet pushed to its children.
pub struct PendingChange<C> {
    /// The positions the change applies to. Always contained in the node's span.
    pub(crate) span: Span,
    /// The change itself. Shared between both children when pushed down.
    pub(crate) change: Rc<C>,
}

impl<C> PendingChange<C> {
    /// The positions the change applies to.
    pub const fn span(&self) -> Span {
        self.span
    }

    /// The change that will be applied to every position in [`Self::span`].
    pub fn change(&self) -> &C {
        &self.change
    }
}

impl<C> fmt::Debug for PendingChange<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingChange")
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}

/// A node covering a single position.
///
/// Leaves hold the concrete value for their position and never hold a pending
/// change: changes reaching a leaf are applied immediately.
#[derive(Debug)]
pub struct LeafNode<V> {
    index: usize,
    pub(crate) value: V,
}

impl<V> LeafNode<V> {
    pub(crate) const fn new(index: usize, value: V) -> Self {
        Self { index, value }
    }

    /// The position covered by this leaf.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The current value stored at this position.
    pub const fn value(&self) -> &V {
        &self.value
    }
}

/// A node covering more than one position.
///
/// Internal nodes carry structure only: the children are created on first use
/// and no aggregate is cached. At most one pending change is stored at a time.
pub struct InternalNode<C> {
    span: Span,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
    pending: Option<PendingChange<C>>,
}

impl<C> InternalNode<C> {
    pub(crate) const fn new(span: Span) -> Self {
        debug_assert!(
            !span.is_point(),
            "Internal nodes cover at least two positions"
        );
        Self {
            span,
            left: None,
            right: None,
            pending: None,
        }
    }

    /// The interval covered by this node.
    pub const fn span(&self) -> Span {
        self.span
    }

    /// The index of the child on the given side, if it has been created.
    pub const fn child_index(&self, side: Side) -> Option<NodeIndex> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// The change waiting to be pushed to the children, if any.
    pub const fn pending(&self) -> Option<&PendingChange<C>> {
        self.pending.as_ref()
    }

    pub(crate) const fn set_child(&mut self, side: Side, child: NodeIndex) {
        match side {
            Side::Left => self.left = Some(child),
            Side::Right => self.right = Some(child),
        }
    }

    /// Record a pending change.
    ///
    /// The previous pending change must have been flushed beforehand: two pending
    /// changes are never merged in place.
    pub(crate) fn set_pending(&mut self, pending: PendingChange<C>) {
        debug_assert!(
            self.pending.is_none(),
            "Pending change must be flushed first"
        );
        debug_assert!(
            self.span.contains(pending.span),
            "Pending change {} escapes node {}",
            pending.span,
            self.span
        );
        self.pending = Some(pending);
    }

    pub(crate) const fn take_pending(&mut self) -> Option<PendingChange<C>> {
        self.pending.take()
    }
}

impl<C> fmt::Debug for InternalNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternalNode")
            .field("span", &self.span)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("pending", &self.pending)
            .finish()
    }
}

/// A node in the segment tree. Either a leaf holding a value, or an internal
/// node with (lazily created) left/right children.
#[derive(Debug)]
pub enum SegmentTreeNode<V, C> {
    /// A node covering a single position.
    Leaf(LeafNode<V>),
    /// A node covering two or more positions.
    Internal(InternalNode<C>),
}

impl<V, C> SegmentTreeNode<V, C> {
    /// Creates the node covering `span`.
    ///
    /// Single positions become leaves, whose value is produced by `init`.
    pub(crate) fn new(span: Span, init: impl FnOnce(usize) -> V) -> Self {
        if span.is_point() {
            Self::Leaf(LeafNode::new(span.start, init(span.start)))
        } else {
            Self::Internal(InternalNode::new(span))
        }
    }

    /// Returns true if this node covers a single position.
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// The interval covered by this node.
    pub const fn span(&self) -> Span {
        match self {
            Self::Leaf(leaf) => Span::point(leaf.index),
            Self::Internal(internal) => internal.span,
        }
    }

    /// The value stored in this node, if it is a leaf.
    pub const fn value(&self) -> Option<&V> {
        match self {
            Self::Leaf(leaf) => Some(&leaf.value),
            Self::Internal(_) => None,
        }
    }

    /// The pending change stored in this node, if any.
    ///
    /// Always `None` for leaves.
    pub const fn pending(&self) -> Option<&PendingChange<C>> {
        match self {
            Self::Leaf(_) => None,
            Self::Internal(internal) => internal.pending(),
        }
    }

    /// The indices of the left and right children that have been created so far.
    pub const fn child_indices(&self) -> (Option<NodeIndex>, Option<NodeIndex>) {
        match self {
            Self::Leaf(_) => (None, None),
            Self::Internal(internal) => (internal.left, internal.right),
        }
    }

    pub(crate) const fn as_internal_mut(&mut self) -> Option<&mut InternalNode<C>> {
        match self {
            Self::Leaf(_) => None,
            Self::Internal(internal) => Some(internal),
        }
    }
}
