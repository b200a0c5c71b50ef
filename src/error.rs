//! Error types for the verdet library.

use thiserror::Error;

/// Result type alias for segmentation operations.
pub type Result<T> = std::result::Result<T, VerdetError>;

/// Errors that can occur while segmenting or refitting a series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerdetError {
    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A sample is NaN or infinite.
    #[error("non-finite value at index {index}")]
    NonFiniteValue { index: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),
}
