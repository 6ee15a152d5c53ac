//! Errors.

use std::collections::TryReserveError;

use thiserror::Error;

/// Error returned by collection operations.
///
/// Duplicate keys are not errors: see [`Insertion::Occupied`][`crate::Insertion::Occupied`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// Attempt to insert or add an empty node handle.
    #[error("passed node handle is empty")]
    EmptyNode,

    /// Checked positional access beyond the current length.
    #[error("index {index} is out of range for a collection of length {len}")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the collection at the time of the access.
        len: usize,
    },

    /// Storage for a new element could not be reserved.
    #[error("failed to reserve storage for a new element")]
    Allocation(#[from] TryReserveError),
}

/// Result type for collection operations.
pub type Result<T, E = NodeError> = core::result::Result<T, E>;
