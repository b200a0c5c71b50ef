//! Least-squares fit of vertex values under an interpolation basis.

use crate::core::{first_non_finite, DenseMatrix};
use crate::error::{Result, VerdetError};
use crate::utils::least_squares;

/// Fitted vertex values and the reconstruction they imply.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexFit {
    /// One fitted value per vertex
    pub vertices: Vec<f64>,
    /// Piecewise-linear reconstruction, one value per sample
    pub fitted: Vec<f64>,
}

/// Fit `target` to the vertices of `basis` and reconstruct it.
///
/// The target need not be the series that produced the segmentation, so one
/// index can drive segmentation while another band is refitted on the same
/// breakpoints.
///
/// The reconstruction walks the basis two columns at a time instead of doing
/// a dense product: the column pointer advances once a row's left weight is
/// zero, i.e. once the row has reached the next vertex.
///
/// # Errors
/// Returns [`VerdetError::DimensionMismatch`] when `target` does not have one
/// value per basis row and [`VerdetError::NonFiniteValue`] for NaN/Inf
/// targets.
pub fn fit_to_vertices(basis: &DenseMatrix, target: &[f64]) -> Result<VertexFit> {
    let n = basis.nrows();
    if target.len() != n {
        return Err(VerdetError::DimensionMismatch {
            expected: n,
            got: target.len(),
        });
    }
    if let Some(index) = first_non_finite(target) {
        return Err(VerdetError::NonFiniteValue { index });
    }

    let vertices = least_squares(basis, target)?;
    let vertex = |j: usize| vertices.get(j).copied().unwrap_or(0.0);

    let mut fitted = Vec::with_capacity(n);
    let mut j = 0;
    for i in 0..n {
        let left = basis.get_or_zero(i, j);
        fitted.push(left * vertex(j) + basis.get_or_zero(i, j + 1) * vertex(j + 1));
        if left == 0.0 {
            j += 1;
        }
    }

    Ok(VertexFit { vertices, fitted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::basis::build_interpolation_matrix;
    use crate::segmentation::merge::SegmentAssignment;
    use approx::assert_relative_eq;

    fn basis_for(ids: &[usize]) -> DenseMatrix {
        build_interpolation_matrix(&SegmentAssignment::from_ids(ids.to_vec()).unwrap())
    }

    #[test]
    fn two_samples_are_returned_unchanged() {
        let basis = basis_for(&[0, 1]);
        let fit = fit_to_vertices(&basis, &[0.37, 0.91]).unwrap();
        assert_relative_eq!(fit.fitted[0], 0.37, epsilon = 1e-12);
        assert_relative_eq!(fit.fitted[1], 0.91, epsilon = 1e-12);
        assert_relative_eq!(fit.vertices[0], 0.37, epsilon = 1e-12);
        assert_relative_eq!(fit.vertices[1], 0.91, epsilon = 1e-12);
    }

    #[test]
    fn exact_piecewise_linear_target_is_recovered() {
        // Rise 0.5 -> 0.8 over samples 0..3, fall to 0.2 over 3..6
        let basis = basis_for(&[0, 0, 0, 1, 1, 1, 2]);
        let target = [0.5, 0.6, 0.7, 0.8, 0.6, 0.4, 0.2];
        let fit = fit_to_vertices(&basis, &target).unwrap();

        assert_eq!(fit.vertices.len(), 3);
        assert_relative_eq!(fit.vertices[0], 0.5, epsilon = 1e-10);
        assert_relative_eq!(fit.vertices[1], 0.8, epsilon = 1e-10);
        assert_relative_eq!(fit.vertices[2], 0.2, epsilon = 1e-10);
        for (got, want) in fit.fitted.iter().zip(target.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-10);
        }
    }

    #[test]
    fn reconstruction_matches_dense_product() {
        let basis = basis_for(&[0, 0, 1, 1, 1, 1, 2, 3, 3, 4]);
        let target = [0.9, 0.85, 0.8, 0.7, 0.75, 0.72, 0.3, 0.35, 0.5, 0.6];
        let fit = fit_to_vertices(&basis, &target).unwrap();
        let dense = basis.mul_vec(&fit.vertices);
        for (got, want) in fit.fitted.iter().zip(dense.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
    }

    #[test]
    fn noisy_line_is_smoothed_to_a_line() {
        let basis = basis_for(&[0, 0, 0, 0, 0, 1]);
        let target = [0.0, 0.3, 0.1, 0.4, 0.3, 0.5];
        let fit = fit_to_vertices(&basis, &target).unwrap();
        let step = fit.fitted[1] - fit.fitted[0];
        for w in fit.fitted.windows(2) {
            assert_relative_eq!(w[1] - w[0], step, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_mismatched_target() {
        let basis = basis_for(&[0, 0, 1]);
        assert_eq!(
            fit_to_vertices(&basis, &[0.1, 0.2]),
            Err(VerdetError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn rejects_non_finite_target() {
        let basis = basis_for(&[0, 0, 1]);
        assert_eq!(
            fit_to_vertices(&basis, &[0.1, f64::NAN, 0.3]),
            Err(VerdetError::NonFiniteValue { index: 1 })
        );
    }
}
