/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Operator traits supplied by the caller.
//!
//! The tree is agnostic to the aggregate it computes. Three small strategies
//! define the arithmetic:
//!
//! - [`Initializer`]: creates the value of a position when its leaf is created.
//! - [`Change`]: maps the old value of a position to its new value.
//! - [`Query`]: turns a leaf value into an output and merges sibling outputs.
//!
//! [`Initializer`] and [`Change`] are implemented for plain closures, so ad-hoc
//! strategies don't need a dedicated type.

/// Produces the initial value of a position.
pub trait Initializer<V> {
    /// Returns the value for position `index`.
    ///
    /// Called exactly once per position, when the leaf covering it is first
    /// created. Positions that are never reached are never initialized.
    fn initial_value(&self, index: usize) -> V;

    /// The largest tree length this initializer can produce values for.
    ///
    /// `None` means any position can be initialized. A tree longer than this
    /// bound is rejected at construction.
    fn max_len(&self) -> Option<usize> {
        None
    }
}

impl<V, F> Initializer<V> for F
where
    F: Fn(usize) -> V,
{
    fn initial_value(&self, index: usize) -> V {
        self(index)
    }
}

/// A change applied to the values of a range of positions.
///
/// Changes must be pure: the same change is applied identically whether it is
/// applied eagerly or pushed down later by a lazy flush.
pub trait Change<V> {
    /// Returns the new value of a position, given its current value.
    fn apply(&self, value: &V) -> V;
}

impl<V, F> Change<V> for F
where
    F: Fn(&V) -> V,
{
    fn apply(&self, value: &V) -> V {
        self(value)
    }
}

/// An aggregate computed over a range of positions.
///
/// `merge` must be associative: the grouping of partial results depends on the
/// shape of the tree. No identity element is required, since a query always
/// covers at least one position.
pub trait Query<V> {
    /// The result of the query.
    type Output;

    /// Turns the value of a single position into an output.
    fn produce(&self, value: &V) -> Self::Output;

    /// Combines the outputs of two adjacent ranges, `left` preceding `right`.
    fn merge(&self, left: Self::Output, right: Self::Output) -> Self::Output;
}
