/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for SegmentTree construction and introspection.

use segment_tree::ops::{Add, Arithmetic, Assign, Fill, Get, Sum};
use segment_tree::{SegmentTree, SegmentTreeError, Span};

use crate::helpers::{ArithmeticTree, counting_initializer, zero_tree};

#[test]
fn test_new_tree() {
    let tree = zero_tree(5);
    assert_eq!(tree.len(), 5);
    assert!(!tree.is_empty());
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.pending_count(), 0);

    let root = tree.root().expect("non-empty tree has a root");
    assert_eq!(root.span(), Span::new(0, 4));
    assert!(!root.is_leaf());
    assert_eq!(root.child_indices(), (None, None));
}

#[test]
fn test_new_tree_does_not_initialize_positions() {
    let (init, calls) = counting_initializer();
    let tree: ArithmeticTree<_> = SegmentTree::new(1000, init).unwrap();

    assert_eq!(calls.get(), 0);
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_empty_tree() {
    let mut tree = zero_tree(0);
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert!(tree.root_index().is_none());
    assert_eq!(tree.node_count(), 0);
    assert!(tree.values().is_empty());
    tree.flush_all();
}

#[test]
fn test_single_position_tree() {
    let (init, calls) = counting_initializer();
    let mut tree: ArithmeticTree<_> = SegmentTree::new(1, init).unwrap();

    // The root of a one-position tree is a leaf, created (and initialized) eagerly.
    assert_eq!(calls.get(), 1);
    assert!(tree.root().unwrap().is_leaf());
    assert_eq!(tree.query_at(0, &Get), Ok(0));

    tree.update_at(0, &Assign(5)).unwrap();
    assert_eq!(tree.query_at(0, &Get), Ok(5));

    // Leaves apply lazy updates right away.
    tree.lazy_update_at(0, Arithmetic::Add(2)).unwrap();
    assert_eq!(tree.pending_count(), 0);
    assert_eq!(tree.root().unwrap().value(), Some(&7));
    assert_eq!(tree.query(0..=0, &Sum), Ok(7));

    assert_eq!(calls.get(), 1);
    assert_eq!(tree.node_count(), 1);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_too_many_positions() {
    type Tree = SegmentTree<u8, Fill<u8>, Add<u8>>;

    let err = Tree::new(Tree::MAXIMUM_LEN + 1, Fill(0)).unwrap_err();
    assert_eq!(
        err,
        SegmentTreeError::TooManyPositions {
            len: Tree::MAXIMUM_LEN + 1,
            max: Tree::MAXIMUM_LEN,
        }
    );

    // The largest supported tree is cheap to build, since nodes are created on demand.
    let mut tree = Tree::new(Tree::MAXIMUM_LEN, Fill(0)).unwrap();
    assert_eq!(tree.node_count(), 1);

    let last = Tree::MAXIMUM_LEN - 1;
    tree.update_at(last, &Add(3)).unwrap();
    assert_eq!(tree.query_at(last, &Get), Ok(3));
    assert_eq!(tree.query_at(0, &Get), Ok(0));
}

#[test]
fn test_full_traversal_creates_every_node() {
    for len in 1..=17 {
        let mut tree = zero_tree(len);
        tree.values();
        assert_eq!(tree.node_count(), 2 * len - 1, "len = {len}");
    }
}

#[test]
fn test_mem_usage_grows_with_nodes() {
    let mut tree = zero_tree(64);
    let before = tree.mem_usage();
    tree.update(0..=63, &Add(1)).unwrap();
    assert!(tree.mem_usage() > before);
}

#[test]
fn test_debug_output() {
    let mut tree = zero_tree(4);
    tree.lazy_update(0..=3, Arithmetic::Add(1)).unwrap();

    let debug = format!("{tree:?}");
    assert!(debug.contains("len: 4"), "{debug}");
    assert!(debug.contains("pending_count: 1"), "{debug}");
}
