/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Debug invariant checks for the segment tree.
//!
//! These checks are gated behind the `unittest` feature flag and run after
//! every public operation that may create nodes or move pending changes, to
//! catch structural violations early.

use super::SegmentTree;
use crate::arena::NodeIndex;
use crate::{SegmentTreeNode, Side, Span};

impl<V, I, C> SegmentTree<V, I, C> {
    /// Verify the structural invariants of the whole tree.
    ///
    /// - The root covers `[0, len - 1]`, and an empty tree has no nodes.
    /// - A child covers exactly the half of its parent's span on its side.
    /// - A pending change lies within the span of the node holding it.
    /// - Every node in the arena is reachable from the root exactly once.
    /// - The arena never holds more than `2 * len - 1` nodes.
    pub(crate) fn check_tree_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.len, 0, "non-empty tree without a root");
            assert_eq!(self.nodes.len(), 0, "empty tree holding nodes");
            return;
        };

        assert_eq!(
            self.nodes[root].span(),
            Span::new(0, self.len - 1),
            "root does not cover the whole tree"
        );
        assert!(
            self.nodes.len() < 2 * self.len,
            "arena holds {} nodes, more than a full tree over {} positions",
            self.nodes.len(),
            self.len
        );

        let mut visited = vec![false; self.nodes.len()];
        self.check_subtree_invariants(root, &mut visited);

        let unreachable = visited.iter().filter(|seen| !**seen).count();
        assert_eq!(
            unreachable, 0,
            "{unreachable} nodes are unreachable from the root"
        );
    }

    fn check_subtree_invariants(&self, node_idx: NodeIndex, visited: &mut [bool]) {
        assert!(
            !visited[node_idx.position()],
            "node {node_idx:?} is reachable through more than one path"
        );
        visited[node_idx.position()] = true;

        let SegmentTreeNode::Internal(internal) = &self.nodes[node_idx] else {
            return;
        };
        let span = internal.span();
        assert!(
            !span.is_point(),
            "internal node {span} covers a single position"
        );

        if let Some(pending) = internal.pending() {
            assert!(
                span.contains(pending.span()),
                "pending change {} escapes node {span}",
                pending.span()
            );
        }

        for side in [Side::Left, Side::Right] {
            if let Some(child) = internal.child_index(side) {
                assert_eq!(
                    self.nodes[child].span(),
                    span.half(side),
                    "{side:?} child of {span} covers the wrong positions"
                );
                self.check_subtree_invariants(child, visited);
            }
        }
    }
}
