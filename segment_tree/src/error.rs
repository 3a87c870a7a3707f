/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Error types for segment tree operations.

/// A specialized Result type for segment tree operations.
pub type Result<T> = std::result::Result<T, SegmentTreeError>;

/// Errors that can occur when building or accessing a [`SegmentTree`](crate::SegmentTree).
///
/// All errors are raised while validating the arguments of a call, before any node
/// is created or modified. A rejected call leaves the tree untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentTreeError {
    /// The requested number of positions cannot be addressed by the node arena.
    #[error("a segment tree cannot hold {len} positions (maximum: {max})")]
    TooManyPositions {
        /// The requested number of positions.
        len: usize,
        /// The largest supported number of positions.
        max: usize,
    },

    /// The initializer cannot produce a value for every position.
    #[error("initializer covers {available} positions, segment tree has {len}")]
    NotEnoughValues {
        /// The requested number of positions.
        len: usize,
        /// The number of positions the initializer can produce a value for.
        available: usize,
    },

    /// An index lies outside of `[0, len)`.
    #[error("index {index} out of range for segment tree of length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The number of positions in the tree.
        len: usize,
    },

    /// The start of a range exceeds its end.
    #[error("range start {start} exceeds range end {end}")]
    InvalidRange {
        /// The requested range start.
        start: usize,
        /// The requested range end.
        end: usize,
    },
}
