//! Piecewise-linear interpolation basis over segment vertices.

use crate::core::DenseMatrix;

use super::merge::SegmentAssignment;

/// Build the `n × vertex_count` interpolation matrix for a segmentation.
///
/// Row `j` inside the segment spanning vertices at sample indices
/// `start < end` holds `1 - w` in column `ids[j]` and `w` in column
/// `ids[j] + 1`, with `w = (j - start) / (end - start)`. Vertex rows therefore
/// carry a single `1.0`, and the final sample is pinned to the last vertex.
/// Every row is a convex combination of at most two neighbouring vertices.
pub fn build_interpolation_matrix(assignment: &SegmentAssignment) -> DenseMatrix {
    let ids = assignment.ids();
    let n = ids.len();
    let mut basis = DenseMatrix::zeros(n, assignment.vertex_count());

    let mut start = 0;
    for i in 1..n {
        if ids[i] != ids[start] {
            let span = (i - start) as f64;
            for j in start..i {
                let weight = (j - start) as f64 / span;
                basis.set(j, ids[j], 1.0 - weight);
                basis.set(j, ids[j] + 1, weight);
            }
            start = i;
        }
    }
    basis.set(n - 1, ids[n - 1], 1.0);

    basis
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assignment(ids: &[usize]) -> SegmentAssignment {
        SegmentAssignment::from_ids(ids.to_vec()).unwrap()
    }

    #[test]
    fn two_samples_give_identity() {
        let basis = build_interpolation_matrix(&assignment(&[0, 1]));
        assert_eq!(basis.nrows(), 2);
        assert_eq!(basis.ncols(), 2);
        assert_eq!(basis.row(0), &[1.0, 0.0]);
        assert_eq!(basis.row(1), &[0.0, 1.0]);
    }

    #[test]
    fn single_segment_interpolates_endpoints() {
        let basis = build_interpolation_matrix(&assignment(&[0, 0, 0, 0, 1]));
        assert_eq!(basis.ncols(), 2);
        let expected = [
            [1.0, 0.0],
            [0.75, 0.25],
            [0.5, 0.5],
            [0.25, 0.75],
            [0.0, 1.0],
        ];
        for (i, row) in expected.iter().enumerate() {
            assert_relative_eq!(basis.get(i, 0), row[0], epsilon = 1e-15);
            assert_relative_eq!(basis.get(i, 1), row[1], epsilon = 1e-15);
        }
    }

    #[test]
    fn two_segments_share_middle_vertex() {
        // Vertices at samples 0, 3, 6
        let basis = build_interpolation_matrix(&assignment(&[0, 0, 0, 1, 1, 1, 2]));
        assert_eq!(basis.ncols(), 3);

        assert_eq!(basis.row(0), &[1.0, 0.0, 0.0]);
        assert_relative_eq!(basis.get(1, 0), 2.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(basis.get(1, 1), 1.0 / 3.0, epsilon = 1e-15);
        assert_eq!(basis.row(3), &[0.0, 1.0, 0.0]);
        assert_relative_eq!(basis.get(5, 1), 1.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(basis.get(5, 2), 2.0 / 3.0, epsilon = 1e-15);
        assert_eq!(basis.row(6), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn rows_are_convex_pairs() {
        let ids = [0, 0, 1, 1, 1, 1, 2, 3, 3, 4];
        let basis = build_interpolation_matrix(&assignment(&ids));
        assert_eq!(basis.ncols(), 5);
        for i in 0..basis.nrows() {
            let row = basis.row(i);
            let nonzero = row.iter().filter(|&&v| v != 0.0).count();
            assert!(nonzero <= 2, "row {} has {} non-zeros", i, nonzero);
            assert!(row.iter().all(|&v| (0.0..=1.0).contains(&v)));
            assert_relative_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
    }
}
