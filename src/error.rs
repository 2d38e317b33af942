//! Error type for checked array construction and element access.

use thiserror::Error;

/// Errors returned by the checked array operations.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The number of indices does not match the array rank.
    #[error("rank mismatch: expected {expected} indices, got {found}")]
    RankMismatch {
        /// Array rank.
        expected: usize,
        /// Number of indices given.
        found: usize,
    },
    /// An index is not less than the extent of its axis.
    #[error("index out of bounds: axis {axis} has extent {extent} but the index is {index}")]
    OutOfBounds {
        /// Offending axis.
        axis: usize,
        /// Index given for the axis.
        index: usize,
        /// Number of elements along the axis.
        extent: usize,
    },
    /// A flat index is not less than the number of elements.
    #[error("index out of bounds: the len is {len} but the index is {index}")]
    FlatOutOfBounds {
        /// Flat index given.
        index: usize,
        /// Number of elements in the array.
        len: usize,
    },
    /// A signed index is below zero.
    #[error("negative index {index} on axis {axis}")]
    NegativeIndex {
        /// Offending axis.
        axis: usize,
        /// Index given for the axis.
        index: i64,
    },
    /// The product of the extents overflowed `usize`.
    #[error("shape element count overflow")]
    SizeOverflow,
    /// The number of provided elements does not match the shape.
    #[error("wrong element count: expected {expected}, got {found}")]
    LengthMismatch {
        /// Number of elements given by the shape.
        expected: usize,
        /// Number of elements provided.
        found: usize,
    },
    /// A view does not fit into the buffer of its owner.
    #[error("view of {len} elements at offset {offset} exceeds owner capacity {capacity}")]
    ViewOutOfRange {
        /// Element offset of the view into the owner buffer.
        offset: usize,
        /// Number of elements in the view.
        len: usize,
        /// Number of elements in the owner buffer.
        capacity: usize,
    },
    /// No element type is registered under the name.
    #[error("unknown element type `{0}`")]
    UnknownType(String),
}

/// Result type with [`Error`] as the default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;
