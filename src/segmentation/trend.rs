//! Disturbance / regeneration labelling of a piecewise-linear reconstruction.
//!
//! Negative slopes of the fitted trend lines indicate disturbance, positive
//! slopes regeneration.

use crate::error::{Result, VerdetError};

use super::merge::SegmentAssignment;

/// Direction of a fitted trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendKind {
    /// Slope below `-threshold`
    Disturbance,
    /// Slope within `[-threshold, threshold]`
    Stable,
    /// Slope above `threshold`
    Regeneration,
}

/// Classify a per-step slope. A negative threshold is read as its magnitude.
pub fn classify_slope(slope: f64, threshold: f64) -> TrendKind {
    let threshold = threshold.abs();
    if slope < -threshold {
        TrendKind::Disturbance
    } else if slope > threshold {
        TrendKind::Regeneration
    } else {
        TrendKind::Stable
    }
}

/// One vertex-to-vertex span of the reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSegment {
    /// Sample index of the opening vertex
    pub start: usize,
    /// Sample index of the closing vertex (inclusive)
    pub end: usize,
    pub start_value: f64,
    pub end_value: f64,
    /// Change per time step
    pub slope: f64,
    pub kind: TrendKind,
}

impl TrendSegment {
    /// Number of time steps spanned.
    pub fn duration(&self) -> usize {
        self.end - self.start
    }

    /// Total change over the span.
    pub fn magnitude(&self) -> f64 {
        self.end_value - self.start_value
    }
}

/// First differences of a reconstruction (length `n - 1`).
pub fn reconstruction_slopes(reconstruction: &[f64]) -> Vec<f64> {
    reconstruction.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Split a reconstruction at the assignment's vertices and label each span.
///
/// # Errors
/// Returns [`VerdetError::DimensionMismatch`] when the reconstruction and
/// the assignment differ in length.
pub fn trend_segments(
    reconstruction: &[f64],
    assignment: &SegmentAssignment,
    threshold: f64,
) -> Result<Vec<TrendSegment>> {
    if reconstruction.len() != assignment.len() {
        return Err(VerdetError::DimensionMismatch {
            expected: assignment.len(),
            got: reconstruction.len(),
        });
    }

    let segments = assignment
        .vertex_indices()
        .windows(2)
        .map(|w| {
            let (start, end) = (w[0], w[1]);
            let start_value = reconstruction[start];
            let end_value = reconstruction[end];
            let slope = (end_value - start_value) / (end - start) as f64;
            TrendSegment {
                start,
                end,
                start_value,
                end_value,
                slope,
                kind: classify_slope(slope, threshold),
            }
        })
        .collect();

    Ok(segments)
}
