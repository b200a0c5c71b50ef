//! Core data structures shared by the segmentation stages.

mod matrix;
mod series;

pub use matrix::DenseMatrix;
pub use series::{first_non_finite, validate_series, MIN_SERIES_LENGTH};
