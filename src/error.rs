//! Error types for lane-vector operations

use thiserror::Error;

use crate::species::Species;
use crate::Backend;

/// Result type for lane-vector operations
pub type Result<T> = std::result::Result<T, LaneError>;

/// Errors that can occur during lane-vector operations
///
/// Every variant except [`LaneError::DivisionByZero`] is a usage error: the
/// caller passed operands that violate the species or bounds contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaneError {
    /// Operands belong to different species
    #[error("Species mismatch: expected {expected}, got {actual}")]
    SpeciesMismatch {
        /// Species of the receiver
        expected: Species,
        /// Species of the offending operand
        actual: Species,
    },

    /// Lane index outside `[0, lanes)`
    #[error("Lane index {index} out of bounds for {lanes} lanes")]
    LaneIndexOutOfBounds {
        /// Requested lane
        index: usize,
        /// Lane count of the species
        lanes: usize,
    },

    /// Array window `[offset, offset + lanes)` does not fit the array
    #[error("Array window at offset {offset} with {lanes} lanes exceeds length {len}")]
    ArrayOutOfBounds {
        /// Start of the window
        offset: usize,
        /// Window size
        lanes: usize,
        /// Array length
        len: usize,
    },

    /// Integer division by a zero lane
    #[error("Division by zero in lane {lane}")]
    DivisionByZero {
        /// First active lane holding a zero divisor
        lane: usize,
    },

    /// A wide scalar does not fit the lane element type
    #[error("Value {0} is not representable as a lane element")]
    UnrepresentableValue(i64),

    /// Invalid input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Backend not supported on this platform
    #[error("Backend not supported on this platform: {0:?}")]
    UnsupportedBackend(Backend),
}
