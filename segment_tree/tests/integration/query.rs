/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for point and range queries.

use rstest::rstest;
use segment_tree::SegmentTree;
use segment_tree::ops::{
    Add, All, Any, Arithmetic, Assign, Collect, Count, Fill, Get, Max, Min, Sum,
};

use crate::helpers::{ArithmeticTree, counting_initializer, init_tracing, tree_from, zero_tree};

#[test]
fn test_increment_then_assign_range() {
    init_tracing();
    let mut tree = zero_tree(5);

    for i in 0..5 {
        tree.update_at(i, &Add(1)).unwrap();
    }
    assert_eq!(tree.query(0..=4, &Sum), Ok(5));
    assert_eq!(tree.query(1..=3, &Sum), Ok(3));

    tree.lazy_update(1..=3, Arithmetic::Assign(10)).unwrap();
    assert_eq!(tree.query(1..=3, &Sum), Ok(30));
    assert_eq!(tree.query(0..=4, &Sum), Ok(32));
    assert_eq!(tree.values(), vec![1, 10, 10, 10, 1]);
}

#[rstest]
#[case::whole(0, 4, 15)]
#[case::left_half(0, 2, 6)]
#[case::right_half(3, 4, 9)]
#[case::straddles_root_split(2, 3, 7)]
#[case::first(0, 0, 1)]
#[case::last(4, 4, 5)]
#[case::inner(1, 3, 9)]
fn test_range_sum(#[case] start: usize, #[case] end: usize, #[case] expected: i64) {
    let mut tree = tree_from(&[1, 2, 3, 4, 5]);
    assert_eq!(tree.query(start..=end, &Sum), Ok(expected));
}

#[test]
fn test_every_range_matches_naive_sum() {
    let values: Vec<i64> = (0..13).map(|i| i * i - 7 * i).collect();
    let mut tree = tree_from(&values);

    for start in 0..values.len() {
        for end in start..values.len() {
            let expected: i64 = values[start..=end].iter().sum();
            assert_eq!(
                tree.query(start..=end, &Sum),
                Ok(expected),
                "[{start}, {end}]"
            );
        }
    }
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(6)]
fn test_point_query_matches_range_query(#[case] index: usize) {
    let mut tree = tree_from(&[4, 8, 15, 16, 23, 42, 7]);
    let point = tree.query_at(index, &Get).unwrap();
    assert_eq!(tree.query(index..=index, &Get), Ok(point));
    assert_eq!(tree.query(index..=index, &Sum), Ok(point));
}

#[test]
fn test_stock_queries() {
    let mut tree = tree_from(&[3, -1, 4, 1, -5, 9, 2, 6]);

    assert_eq!(tree.query(0..=7, &Min), Ok(-5));
    assert_eq!(tree.query(0..=3, &Min), Ok(-1));
    assert_eq!(tree.query(0..=7, &Max), Ok(9));
    assert_eq!(tree.query(6..=7, &Max), Ok(6));
    assert_eq!(tree.query(2..=6, &Count), Ok(5));
    assert_eq!(tree.query(2..=5, &Collect), Ok(vec![4, 1, -5, 9]));
    assert_eq!(tree.query(0..=7, &All(|v: &i64| v.abs() < 10)), Ok(true));
    assert_eq!(tree.query(0..=3, &All(|v: &i64| *v > 0)), Ok(false));
    assert_eq!(tree.query(0..=3, &Any(|v: &i64| *v < 0)), Ok(true));
    assert_eq!(tree.query(5..=7, &Any(|v: &i64| *v < 0)), Ok(false));
}

#[test]
fn test_closure_queries_and_changes() {
    // Initializers and changes can be plain closures.
    let mut tree: SegmentTree<String, _, Assign<String>> =
        SegmentTree::new(4, |i: usize| i.to_string()).unwrap();

    tree.update(1..=2, &|s: &String| format!("<{s}>")).unwrap();
    assert_eq!(
        tree.query(0..=3, &Collect),
        Ok(vec![
            "0".to_owned(),
            "<1>".to_owned(),
            "<2>".to_owned(),
            "3".to_owned(),
        ])
    );

    tree.lazy_update(0..=1, Assign("x".to_owned())).unwrap();
    assert_eq!(tree.query_at(1, &Get), Ok("x".to_owned()));
    assert_eq!(tree.query_at(2, &Get), Ok("<2>".to_owned()));
}

#[test]
fn test_query_creates_only_the_path() {
    let (init, calls) = counting_initializer();
    let mut tree: ArithmeticTree<_> = SegmentTree::new(8, init).unwrap();

    assert_eq!(tree.query_at(0, &Get), Ok(0));
    // [0, 7] -> [0, 3] -> [0, 1] -> [0, 0]
    assert_eq!(tree.node_count(), 4);
    assert_eq!(calls.get(), 1);

    assert_eq!(tree.query_at(7, &Get), Ok(7));
    // [4, 7] -> [6, 7] -> [7, 7]
    assert_eq!(tree.node_count(), 7);
    assert_eq!(calls.get(), 2);

    // Querying the same positions again creates nothing and initializes nothing.
    assert_eq!(tree.query_at(0, &Get), Ok(0));
    assert_eq!(tree.query_at(7, &Get), Ok(7));
    assert_eq!(tree.node_count(), 7);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_query_is_idempotent() {
    let mut tree = zero_tree(11);
    tree.lazy_update(2..=9, Arithmetic::Add(3)).unwrap();
    tree.lazy_update(0..=4, Arithmetic::Mul(2)).unwrap();

    let first = tree.query(0..=10, &Collect).unwrap();
    let second = tree.query(0..=10, &Collect).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, vec![0, 0, 6, 6, 6, 3, 3, 3, 3, 3, 0]);
}

#[test]
fn test_unvisited_positions_keep_initial_value() {
    let mut tree: ArithmeticTree = SegmentTree::new(6, Fill(9)).unwrap();
    tree.update(0..=1, &Add(1)).unwrap();
    assert_eq!(tree.query(2..=5, &Collect), Ok(vec![9, 9, 9, 9]));
    assert_eq!(tree.query(0..=5, &Sum), Ok(56));
}
