/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::hint::black_box;

use criterion::{BatchSize, Criterion, Throughput};
use segment_tree::ops::{Add, Arithmetic, Fill, Sum};

use crate::{BenchTree, materialized};

/// A helper struct for benchmarking the operations of a tree over a fixed
/// number of positions.
///
/// Range operations cover the middle half of the tree.
pub struct OperationBencher {
    len: usize,
    start: usize,
    end: usize,
}

impl OperationBencher {
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            start: len / 4,
            end: len - len / 4 - 1,
        }
    }

    /// Compare an eager range update against a lazy one, on a fully materialized tree.
    pub fn range_update_group(&self, c: &mut Criterion) {
        let (len, start, end) = (self.len, self.start, self.end);
        let mut group = c.benchmark_group(format!("range_update/{len}"));
        group.throughput(Throughput::Elements((end - start + 1) as u64));

        group.bench_function("eager", |b| {
            b.iter_batched(
                || materialized(len),
                |mut tree| tree.update(black_box(start..=end), &Add(1)),
                BatchSize::LargeInput,
            );
        });
        group.bench_function("lazy", |b| {
            b.iter_batched(
                || materialized(len),
                |mut tree| tree.lazy_update(black_box(start..=end), Arithmetic::Add(1)),
                BatchSize::LargeInput,
            );
        });
        group.finish();
    }

    /// Benchmark a range query on a flushed tree, and right after a lazy update
    /// covering the whole tree.
    pub fn range_query_group(&self, c: &mut Criterion) {
        let (len, start, end) = (self.len, self.start, self.end);
        let mut group = c.benchmark_group(format!("range_query/{len}"));
        group.throughput(Throughput::Elements((end - start + 1) as u64));

        group.bench_function("flushed", |b| {
            let mut tree = materialized(len);
            b.iter(|| tree.query(black_box(start..=end), &Sum));
        });
        // The first query after a lazy update pays for pushing it down.
        group.bench_function("after_lazy_update", |b| {
            b.iter_batched(
                || with_pending_change(len),
                |mut tree| tree.query(black_box(start..=end), &Sum),
                BatchSize::LargeInput,
            );
        });
        group.finish();
    }

    /// Benchmark point updates scattered over a tree that starts with the root only.
    pub fn point_update_group(&self, c: &mut Criterion) {
        let len = self.len;
        let mut group = c.benchmark_group(format!("point_update/{len}"));
        group.throughput(Throughput::Elements(1));

        group.bench_function("sparse", |b| {
            let mut tree = BenchTree::new(len, Fill(0)).expect("length is supported");
            let mut i = 0usize;
            b.iter(|| {
                tree.update_at(black_box(i % len), &Add(1))
                    .expect("index is valid");
                i = i.wrapping_add(7919);
            });
        });
        group.finish();
    }
}

fn with_pending_change(len: usize) -> BenchTree {
    let mut tree = materialized(len);
    tree.lazy_update(0..=len - 1, Arithmetic::Mul(2))
        .expect("range is valid");
    tree
}
