/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Benchmarking utilities for the segment tree.
//!
//! This crate is kept apart from `segment_tree` so that the benchmarks link
//! against the library without the `unittest` feature, which the library's own
//! tests enable.

mod bencher;

pub use bencher::OperationBencher;

use segment_tree::SegmentTree;
use segment_tree::ops::{Arithmetic, Fill};

/// The tree type being benchmarked.
pub type BenchTree = SegmentTree<u64, Fill<u64>, Arithmetic<u64>>;

/// Build a tree over `len` positions with every node created and no pending change.
pub fn materialized(len: usize) -> BenchTree {
    let mut tree = BenchTree::new(len, Fill(1)).expect("length is supported");
    tree.values();
    tree
}
