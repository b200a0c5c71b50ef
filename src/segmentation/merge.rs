//! Greedy merging of near-equal slopes into segments.

use crate::core::MIN_SERIES_LENGTH;
use crate::error::{Result, VerdetError};

/// Segment id per sample index.
///
/// Ids start at 0, never decrease and step by at most 1. The final sample
/// always carries its own trailing id, one above the id before it, so a
/// series with `segment_count()` merged-away breaks has
/// `segment_count() + 2` interpolation vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentAssignment {
    ids: Vec<usize>,
}

impl SegmentAssignment {
    /// Wrap a precomputed id sequence after checking its invariants.
    pub fn from_ids(ids: Vec<usize>) -> Result<Self> {
        if ids.len() < MIN_SERIES_LENGTH {
            return Err(VerdetError::InsufficientData {
                needed: MIN_SERIES_LENGTH,
                got: ids.len(),
            });
        }
        if ids[0] != 0 {
            return Err(VerdetError::InvalidParameter(format!(
                "segment ids must start at 0, got {}",
                ids[0]
            )));
        }
        for (i, w) in ids.windows(2).enumerate() {
            if w[1] != w[0] && w[1] != w[0] + 1 {
                return Err(VerdetError::InvalidParameter(format!(
                    "segment ids must step by 0 or 1, got {} -> {} at index {}",
                    w[0],
                    w[1],
                    i + 1
                )));
            }
        }
        let n = ids.len();
        if ids[n - 1] != ids[n - 2] + 1 {
            return Err(VerdetError::InvalidParameter(
                "the last sample must open its own trailing segment id".into(),
            ));
        }
        Ok(Self { ids })
    }

    /// Segment id per sample.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no samples were assigned.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of slope breaks kept by the merger.
    pub fn segment_count(&self) -> usize {
        self.ids[self.ids.len() - 1] - 1
    }

    /// Number of interpolation vertices (`segment_count() + 2`).
    pub fn vertex_count(&self) -> usize {
        self.ids[self.ids.len() - 1] + 1
    }

    /// Sample index of every vertex: index 0 and each index where the id
    /// changes. The last vertex is always the final sample.
    pub fn vertex_indices(&self) -> Vec<usize> {
        std::iter::once(0)
            .chain(
                self.ids
                    .windows(2)
                    .enumerate()
                    .filter(|(_, w)| w[1] != w[0])
                    .map(|(i, _)| i + 1),
            )
            .collect()
    }

    /// Consume into the raw id vector.
    pub fn into_ids(self) -> Vec<usize> {
        self.ids
    }
}

/// Assign a segment id to every sample of a slope estimate.
///
/// Scans left to right in one pass. A new segment opens at `i + 1` when
/// `|slopes[i + 1] - slopes[boundary]|` exceeds `threshold`, where `boundary`
/// is the last confirmed segment start, so small drifts compound against the
/// boundary value rather than the immediately preceding one.
///
/// # Errors
/// Returns [`VerdetError::InsufficientData`] for fewer than two slopes.
pub fn merge_segments(slopes: &[f64], threshold: f64) -> Result<SegmentAssignment> {
    let n = slopes.len();
    if n < MIN_SERIES_LENGTH {
        return Err(VerdetError::InsufficientData {
            needed: MIN_SERIES_LENGTH,
            got: n,
        });
    }

    let mut ids = vec![0usize; n];
    let mut segment_count = 0;
    let mut boundary = 1;

    for i in 1..n - 1 {
        if (slopes[i + 1] - slopes[boundary]).abs() > threshold {
            segment_count += 1;
            boundary = i + 1;
        }
        ids[i] = segment_count;
    }
    // The last sample always ends the current segment
    ids[n - 1] = segment_count + 1;

    tracing::trace!(n, segment_count, "merged slope estimate into segments");

    Ok(SegmentAssignment { ids })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_samples_form_one_segment() {
        let a = merge_segments(&[0.0, 5.0], 0.05).unwrap();
        assert_eq!(a.ids(), &[0, 1]);
        assert_eq!(a.segment_count(), 0);
        assert_eq!(a.vertex_count(), 2);
        assert_eq!(a.vertex_indices(), vec![0, 1]);
    }

    #[test]
    fn flat_slopes_collapse() {
        let slopes = [0.0, 0.01, 0.01, 0.02, 0.01, 0.0];
        let a = merge_segments(&slopes, 0.05).unwrap();
        assert_eq!(a.ids(), &[0, 0, 0, 0, 0, 1]);
        assert_eq!(a.segment_count(), 0);
    }

    #[test]
    fn slope_jump_opens_segment() {
        let slopes = [0.0, 0.1, 0.1, 0.1, -0.2, -0.2, -0.2];
        let a = merge_segments(&slopes, 0.05).unwrap();
        // The jump is seen at i = 3 (comparing slopes[4]) and starts segment 1 there
        assert_eq!(a.ids(), &[0, 0, 0, 1, 1, 1, 2]);
        assert_eq!(a.segment_count(), 1);
        assert_eq!(a.vertex_indices(), vec![0, 3, 6]);
    }

    #[test]
    fn drift_compounds_against_boundary() {
        // Each step is 0.03 (< threshold) but drift from the boundary grows
        let slopes = [0.0, 0.0, 0.03, 0.06, 0.09, 0.12];
        let a = merge_segments(&slopes, 0.05).unwrap();
        // slopes[3] - slopes[1] = 0.06 > 0.05 triggers at i = 2, boundary -> 3
        // slopes[5] - slopes[3] = 0.06 > 0.05 triggers at i = 4, boundary -> 5
        assert_eq!(a.ids(), &[0, 0, 1, 1, 2, 3]);
    }

    #[test]
    fn huge_threshold_yields_single_segment() {
        let slopes = [0.0, 1.0, -1.0, 2.0, -2.0, 0.5];
        let a = merge_segments(&slopes, 1e6).unwrap();
        assert_eq!(a.segment_count(), 0);
        assert_eq!(a.ids(), &[0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn ids_are_non_decreasing_with_unit_steps() {
        let slopes: Vec<f64> = (0..40).map(|i| ((i * 7) % 5) as f64 * 0.04).collect();
        let a = merge_segments(&slopes, 0.05).unwrap();
        assert_eq!(a.ids()[0], 0);
        assert!(a.ids().windows(2).all(|w| w[1] == w[0] || w[1] == w[0] + 1));
        let n = a.len();
        assert_eq!(a.ids()[n - 1], a.ids()[n - 2] + 1);
    }

    #[test]
    fn short_input_is_rejected() {
        assert_eq!(
            merge_segments(&[0.0], 0.05),
            Err(VerdetError::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn from_ids_checks_invariants() {
        assert!(SegmentAssignment::from_ids(vec![0, 0, 1, 1, 2]).is_ok());
        assert!(SegmentAssignment::from_ids(vec![1, 1, 2]).is_err());
        assert!(SegmentAssignment::from_ids(vec![0, 2, 3]).is_err());
        assert!(SegmentAssignment::from_ids(vec![0, 1, 1]).is_err());
        assert!(SegmentAssignment::from_ids(vec![0]).is_err());
    }
}
