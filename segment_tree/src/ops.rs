/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Ready-made operators for the common aggregates.
//!
//! # Initializers
//!
//! - [`Fill`]: every position starts with the same value.
//! - [`FromValues`]: every position starts with the value at the same index of a vector.
//! - [`DefaultValue`]: every position starts with `V::default()`.
//!
//! # Changes
//!
//! - [`Assign`]: overwrite the value.
//! - [`Add`]: increment the value.
//! - [`Mul`]: scale the value.
//! - [`Arithmetic`]: any of the above, chosen at runtime. Useful when a single
//!   tree receives lazy updates of different kinds.
//!
//! # Queries
//!
//! - [`Sum`], [`Min`], [`Max`]: the usual numeric aggregates.
//! - [`Count`]: the number of positions in the range.
//! - [`Get`]: the value itself, for point queries.
//! - [`Collect`]: every value in the range, in order.
//! - [`All`], [`Any`]: whether a predicate holds for every/some value in the range.

use std::marker::PhantomData;

use crate::{Change, Initializer, Query};

/// Initializes every position with a clone of the wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill<V>(pub V);

impl<V: Clone> Initializer<V> for Fill<V> {
    fn initial_value(&self, _index: usize) -> V {
        self.0.clone()
    }
}

/// Initializes position `i` with a clone of the `i`-th wrapped value.
///
/// A tree built with this initializer cannot be longer than the wrapped vector.
/// See also [`SegmentTree::from_values`](crate::SegmentTree::from_values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromValues<V>(pub Vec<V>);

impl<V: Clone> Initializer<V> for FromValues<V> {
    fn initial_value(&self, index: usize) -> V {
        self.0[index].clone()
    }

    fn max_len(&self) -> Option<usize> {
        Some(self.0.len())
    }
}

impl<V> From<Vec<V>> for FromValues<V> {
    fn from(values: Vec<V>) -> Self {
        Self(values)
    }
}

/// Initializes every position with `V::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultValue<V>(PhantomData<fn() -> V>);

impl<V> DefaultValue<V> {
    /// Creates the initializer.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<V> Default for DefaultValue<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Default> Initializer<V> for DefaultValue<V> {
    fn initial_value(&self, _index: usize) -> V {
        V::default()
    }
}

/// Replaces the value with a clone of the wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assign<V>(pub V);

impl<V: Clone> Change<V> for Assign<V> {
    fn apply(&self, _value: &V) -> V {
        self.0.clone()
    }
}

/// Adds the wrapped value to the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Add<V>(pub V);

impl<V> Change<V> for Add<V>
where
    V: Clone + std::ops::Add<Output = V>,
{
    fn apply(&self, value: &V) -> V {
        value.clone() + self.0.clone()
    }
}

/// Multiplies the current value by the wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mul<V>(pub V);

impl<V> Change<V> for Mul<V>
where
    V: Clone + std::ops::Mul<Output = V>,
{
    fn apply(&self, value: &V) -> V {
        value.clone() * self.0.clone()
    }
}

/// One of the arithmetic changes, selected at runtime.
///
/// A tree stores lazy updates of a single change type; this enum lets one tree
/// receive assignments, increments and scalings alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arithmetic<V> {
    /// See [`Assign`].
    Assign(V),
    /// See [`Add`].
    Add(V),
    /// See [`Mul`].
    Mul(V),
}

impl<V> Change<V> for Arithmetic<V>
where
    V: Clone + std::ops::Add<Output = V> + std::ops::Mul<Output = V>,
{
    fn apply(&self, value: &V) -> V {
        match self {
            Self::Assign(v) => v.clone(),
            Self::Add(v) => value.clone() + v.clone(),
            Self::Mul(v) => value.clone() * v.clone(),
        }
    }
}

/// Sums the values in the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum;

impl<V> Query<V> for Sum
where
    V: Clone + std::ops::Add<Output = V>,
{
    type Output = V;

    fn produce(&self, value: &V) -> V {
        value.clone()
    }

    fn merge(&self, left: V, right: V) -> V {
        left + right
    }
}

/// The smallest value in the range.
///
/// When two values compare equal (or are unordered), the leftmost one is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Min;

impl<V: Clone + PartialOrd> Query<V> for Min {
    type Output = V;

    fn produce(&self, value: &V) -> V {
        value.clone()
    }

    fn merge(&self, left: V, right: V) -> V {
        if right < left { right } else { left }
    }
}

/// The largest value in the range.
///
/// When two values compare equal (or are unordered), the leftmost one is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max;

impl<V: Clone + PartialOrd> Query<V> for Max {
    type Output = V;

    fn produce(&self, value: &V) -> V {
        value.clone()
    }

    fn merge(&self, left: V, right: V) -> V {
        if right > left { right } else { left }
    }
}

/// The number of positions in the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Count;

impl<V> Query<V> for Count {
    type Output = usize;

    fn produce(&self, _value: &V) -> usize {
        1
    }

    fn merge(&self, left: usize, right: usize) -> usize {
        left + right
    }
}

/// The value at a position.
///
/// Meant for point queries. Over a range it yields the value of the last position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Get;

impl<V: Clone> Query<V> for Get {
    type Output = V;

    fn produce(&self, value: &V) -> V {
        value.clone()
    }

    fn merge(&self, _left: V, right: V) -> V {
        right
    }
}

/// Every value in the range, in position order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collect;

impl<V: Clone> Query<V> for Collect {
    type Output = Vec<V>;

    fn produce(&self, value: &V) -> Vec<V> {
        vec![value.clone()]
    }

    fn merge(&self, mut left: Vec<V>, mut right: Vec<V>) -> Vec<V> {
        left.append(&mut right);
        left
    }
}

/// Whether the wrapped predicate holds for every value in the range.
#[derive(Debug, Clone, Copy)]
pub struct All<P>(pub P);

impl<V, P> Query<V> for All<P>
where
    P: Fn(&V) -> bool,
{
    type Output = bool;

    fn produce(&self, value: &V) -> bool {
        (self.0)(value)
    }

    fn merge(&self, left: bool, right: bool) -> bool {
        left && right
    }
}

/// Whether the wrapped predicate holds for at least one value in the range.
#[derive(Debug, Clone, Copy)]
pub struct Any<P>(pub P);

impl<V, P> Query<V> for Any<P>
where
    P: Fn(&V) -> bool,
{
    type Output = bool;

    fn produce(&self, value: &V) -> bool {
        (self.0)(value)
    }

    fn merge(&self, left: bool, right: bool) -> bool {
        left || right
    }
}
