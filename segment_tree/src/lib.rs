/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! SegmentTree - A lazily materialized segment tree with deferred range updates.
//!
//! This crate provides a segment tree over a dense index range `[0, n)`. The tree
//! only orchestrates structure: how a leaf value is created, how a change is applied
//! and how two partial results are combined is defined by caller-supplied operators.
//!
//! # Overview
//!
//! - Nodes are created on first use, so memory grows with the number of distinct
//!   positions touched rather than with `n`.
//! - [`SegmentTree::update`] applies a change eagerly to every leaf in range.
//! - [`SegmentTree::lazy_update`] records the change as a pending change on the
//!   first internal node it reaches; the change is pushed one level further down
//!   every time an operation needs to descend through that node.
//! - Internal nodes never cache an aggregate: queries always bottom out at leaves.
//!
//! Ready-made operators for the usual aggregates live in [`ops`].
//!
//! # Example
//!
//! ```
//! use segment_tree::SegmentTree;
//! use segment_tree::ops::{Add, Assign, Fill, Sum};
//!
//! let mut tree: SegmentTree<i64, _, Assign<i64>> = SegmentTree::new(5, Fill(0))?;
//!
//! for i in 0..5 {
//!     tree.update_at(i, &Add(1))?;
//! }
//! assert_eq!(tree.query(0..=4, &Sum)?, 5);
//! assert_eq!(tree.query(1..=3, &Sum)?, 3);
//!
//! tree.lazy_update(1..=3, Assign(10))?;
//! assert_eq!(tree.query(1..=3, &Sum)?, 30);
//! assert_eq!(tree.query(0..=4, &Sum)?, 32);
//! # Ok::<(), segment_tree::SegmentTreeError>(())
//! ```
//!
//! # Concurrency
//!
//! Every operation, queries included, takes `&mut self`: a query may flush pending
//! changes and create nodes. Sharing a tree across threads requires external
//! synchronization.

mod arena;
mod error;
mod iter;
mod node;
mod operator;
pub mod ops;
mod tree;

pub use arena::NodeIndex;
pub use error::{Result, SegmentTreeError};
pub use iter::PreOrderDfsIterator;
pub use node::{InternalNode, LeafNode, PendingChange, SegmentTreeNode, Side, Span};
pub use operator::{Change, Initializer, Query};
pub use tree::SegmentTree;
