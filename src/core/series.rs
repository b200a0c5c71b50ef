//! Input checks for one pixel's time series.

use crate::error::{Result, VerdetError};

/// Minimum number of samples a series needs to be segmented.
pub const MIN_SERIES_LENGTH: usize = 2;

/// Index of the first NaN or infinite sample, if any.
pub fn first_non_finite(series: &[f64]) -> Option<usize> {
    series.iter().position(|v| !v.is_finite())
}

/// Check that a series is long enough and contains only finite samples.
///
/// Masked or missing observations must be resolved by the caller; a series
/// that still carries a sentinel such as NaN is rejected here rather than
/// being allowed to poison the dense solves downstream.
pub fn validate_series(series: &[f64]) -> Result<()> {
    if series.len() < MIN_SERIES_LENGTH {
        return Err(VerdetError::InsufficientData {
            needed: MIN_SERIES_LENGTH,
            got: series.len(),
        });
    }
    if let Some(index) = first_non_finite(series) {
        return Err(VerdetError::NonFiniteValue { index });
    }
    Ok(())
}
