/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Property-based tests comparing the tree against a naive model.

use proptest::prelude::*;
use segment_tree::ops::{Arithmetic, Assign, Collect, Get, Sum};

use crate::helpers::{Model, zero_tree};

/// A tree length together with ranges that fit in it.
fn len_and_ranges(
    max_len: usize,
    max_ranges: usize,
) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1..max_len).prop_flat_map(move |len| {
        let range = (0..len, 0..len).prop_map(|(a, b)| (a.min(b), a.max(b)));
        (Just(len), proptest::collection::vec(range, 1..max_ranges))
    })
}

/// Small arithmetic changes, so that long sequences of them cannot overflow.
fn arithmetic() -> impl Strategy<Value = Arithmetic<i64>> {
    prop_oneof![
        (-100i64..100).prop_map(Arithmetic::Assign),
        (-100i64..100).prop_map(Arithmetic::Add),
        (-2i64..=2).prop_map(Arithmetic::Mul),
    ]
}

proptest! {
    #[test]
    fn test_point_update_then_query(
        len in 1usize..200,
        index in any::<prop::sample::Index>(),
        value in any::<i64>(),
    ) {
        let index = index.index(len);
        let mut tree = zero_tree(len);

        tree.update_at(index, &Assign(value)).unwrap();
        prop_assert_eq!(tree.query_at(index, &Get), Ok(value));
        prop_assert_eq!(tree.query(0..=len - 1, &Sum), Ok(value));
    }

    #[test]
    fn test_range_sum_matches_model(
        (len, ranges) in len_and_ranges(64, 32),
        changes in proptest::collection::vec(arithmetic(), 32),
    ) {
        let mut tree = zero_tree(len);
        let mut model = Model::zeroed(len);

        for (&(start, end), change) in ranges.iter().zip(&changes) {
            tree.update(start..=end, change).unwrap();
            model.apply(start..=end, change);
        }
        for &(start, end) in &ranges {
            prop_assert_eq!(tree.query(start..=end, &Sum), Ok(model.sum(start..=end)));
        }
    }

    #[test]
    fn test_lazy_matches_eager(
        (len, ranges) in len_and_ranges(64, 32),
        changes in proptest::collection::vec(arithmetic(), 32),
    ) {
        let mut lazy = zero_tree(len);
        let mut eager = zero_tree(len);

        for (&(start, end), change) in ranges.iter().zip(&changes) {
            lazy.lazy_update(start..=end, *change).unwrap();
            eager.update(start..=end, change).unwrap();

            // Interleave queries so that pending changes are left at every depth.
            prop_assert_eq!(
                lazy.query(start..=end, &Sum),
                eager.query(start..=end, &Sum)
            );
        }
        prop_assert_eq!(lazy.values(), eager.values());
    }

    #[test]
    fn test_query_is_idempotent(
        (len, ranges) in len_and_ranges(48, 16),
        changes in proptest::collection::vec(arithmetic(), 16),
    ) {
        let mut tree = zero_tree(len);
        for (&(start, end), change) in ranges.iter().zip(&changes) {
            tree.lazy_update(start..=end, *change).unwrap();
        }

        let (start, end) = ranges[0];
        let first = tree.query(start..=end, &Collect);
        let second = tree.query(start..=end, &Collect);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_node_count_is_bounded(
        (len, ranges) in len_and_ranges(100, 24),
        changes in proptest::collection::vec(arithmetic(), 24),
    ) {
        let mut tree = zero_tree(len);
        for (&(start, end), change) in ranges.iter().zip(&changes) {
            tree.lazy_update(start..=end, *change).unwrap();
            tree.query_at(end, &Get).unwrap();
            prop_assert!(tree.node_count() <= 2 * len - 1);
        }
    }
}
