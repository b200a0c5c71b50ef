//! Dense linear solvers.
//!
//! Two solvers cover the pipeline: Gaussian elimination with partial pivoting
//! for the square denoiser system, and Householder QR for the tall vertex fit.

use crate::core::DenseMatrix;
use crate::error::{Result, VerdetError};

/// Pivots below this magnitude are treated as singular.
const PIVOT_EPS: f64 = 1e-14;

/// Solve a square system `A x = b` in place using Gaussian elimination with
/// partial pivoting.
///
/// `a` is overwritten by its eliminated form and `b` by the solution.
///
/// # Errors
/// Returns [`VerdetError::DimensionMismatch`] for non-square or mismatched
/// inputs and [`VerdetError::ComputationError`] when a pivot vanishes.
pub fn solve_in_place(a: &mut DenseMatrix, b: &mut [f64]) -> Result<()> {
    let n = b.len();
    if !a.is_square() {
        return Err(VerdetError::DimensionMismatch {
            expected: a.nrows(),
            got: a.ncols(),
        });
    }
    if a.nrows() != n {
        return Err(VerdetError::DimensionMismatch {
            expected: a.nrows(),
            got: n,
        });
    }

    for col in 0..n {
        // Find pivot
        let mut max_row = col;
        let mut max_val = a.get(col, col).abs();
        for row in (col + 1)..n {
            let v = a.get(row, col).abs();
            if v > max_val {
                max_val = v;
                max_row = row;
            }
        }

        if max_val.is_nan() || max_val < PIVOT_EPS {
            return Err(VerdetError::ComputationError(format!(
                "singular system: pivot {:e} in column {}",
                max_val, col
            )));
        }

        a.swap_rows(col, max_row);
        b.swap(col, max_row);

        let pivot = a.get(col, col);
        for row in (col + 1)..n {
            let factor = a.get(row, col) / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                let v = a.get(row, j) - factor * a.get(col, j);
                a.set(row, j, v);
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a.get(i, j) * b[j];
        }
        b[i] = sum / a.get(i, i);
    }

    Ok(())
}

/// Least-squares solution of `A x ≈ b` for an `m × k` matrix with `m ≥ k`.
///
/// Uses Householder QR. When `m == k` this is an exact solve. A column that is
/// numerically dependent on the ones before it leaves a near-zero diagonal in
/// `R`; the matching unknown is set to `0.0` instead of failing, so rank
/// deficient systems still produce a (basic) least-squares solution.
///
/// # Errors
/// Returns [`VerdetError::DimensionMismatch`] when `b` does not have `m`
/// entries and [`VerdetError::InsufficientData`] when `m < k`.
pub fn least_squares(a: &DenseMatrix, b: &[f64]) -> Result<Vec<f64>> {
    let m = a.nrows();
    let k = a.ncols();
    if b.len() != m {
        return Err(VerdetError::DimensionMismatch {
            expected: m,
            got: b.len(),
        });
    }
    if m < k {
        return Err(VerdetError::InsufficientData { needed: k, got: m });
    }

    let mut r = a.clone();
    let mut rhs = b.to_vec();
    let mut v = vec![0.0; m];

    for j in 0..k {
        let norm = (j..m).map(|i| r.get(i, j).powi(2)).sum::<f64>().sqrt();
        if norm == 0.0 {
            continue;
        }

        let diag = r.get(j, j);
        let alpha = if diag >= 0.0 { -norm } else { norm };

        // Householder vector v = x - alpha * e1, stored in v[j..m]
        for i in j..m {
            v[i] = r.get(i, j);
        }
        v[j] -= alpha;
        let v_norm_sq: f64 = v[j..m].iter().map(|x| x * x).sum();
        if v_norm_sq == 0.0 {
            continue;
        }

        for c in j..k {
            let dot: f64 = (j..m).map(|i| v[i] * r.get(i, c)).sum();
            let f = 2.0 * dot / v_norm_sq;
            if f == 0.0 {
                continue;
            }
            for i in j..m {
                let updated = r.get(i, c) - f * v[i];
                r.set(i, c, updated);
            }
        }

        let dot: f64 = (j..m).map(|i| v[i] * rhs[i]).sum();
        let f = 2.0 * dot / v_norm_sq;
        for i in j..m {
            rhs[i] -= f * v[i];
        }
    }

    let max_diag = (0..k).map(|j| r.get(j, j).abs()).fold(0.0, f64::max);
    let rank_tol = f64::EPSILON * m.max(k) as f64 * max_diag;

    let mut x = vec![0.0; k];
    for j in (0..k).rev() {
        let d = r.get(j, j);
        if d.abs() <= rank_tol {
            continue;
        }
        let mut sum = rhs[j];
        for c in (j + 1)..k {
            sum -= r.get(j, c) * x[c];
        }
        x[j] = sum / d;
    }

    Ok(x)
}
