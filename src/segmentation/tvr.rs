//! Total-variation regularized (TVR) denoising of the first derivative.
//!
//! Solves, by iteratively reweighted least squares,
//!
//! ```text
//! minimize ||A u - g||² + alpha · Σ |u[j+1] - u[j]|
//! ```
//!
//! where `g = f - f[0]` and `A` is the lower-triangular all-ones
//! anti-derivative operator. The minimizer `u` is a nearly piecewise-constant
//! slope estimate, i.e. `A u` is nearly piecewise linear.
//!
//! `AᵗA` is never formed as a product: its entries are `n - max(i, j)`, so the
//! dense system is initialized in closed form once per series length and each
//! iteration only rewrites its tridiagonal band.

use crate::core::{validate_series, DenseMatrix};
use crate::error::Result;
use crate::utils::solve_in_place;

use super::config::VerdetConfig;

/// Additive floor in the reweighting denominator.
///
/// Guards the division at exact slope ties. Tied to the nominal `[0, 1]`
/// input scale; rescale it if inputs live on a very different scale.
pub const REWEIGHT_FLOOR: f64 = 1e-6;

/// Iterations run before convergence is examined.
///
/// The check starts once the zero-based iteration index exceeds this value.
/// The first check only primes the previous iterate, which starts at
/// `+inf`, so the earliest possible stop is two iterations later.
pub const CONVERGENCE_WARMUP: usize = 20;

/// Output of the denoiser.
#[derive(Debug, Clone, PartialEq)]
pub struct TvrOutput {
    /// Slope estimate, one value per sample
    pub slopes: Vec<f64>,
    /// Number of reweighting iterations performed
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
}

/// Reusable buffers for the denoiser, keyed on series length.
///
/// Segmenting many series of one length (one per pixel) reuses the dense
/// system matrix and skips re-initializing its static `AᵗA` entries.
#[derive(Debug, Clone, Default)]
pub struct TvrWorkspace {
    size: usize,
    /// `AᵗA` off the band, reweighted band rewritten every iteration
    system: DenseMatrix,
    /// Copy of `system` destroyed by elimination
    scratch: DenseMatrix,
    /// `Aᵗ g`
    target: Vec<f64>,
    /// Right-hand side / solution buffer
    rhs: Vec<f64>,
    /// Iterate from the last convergence check
    previous: Vec<f64>,
}

impl TvrWorkspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Series length the buffers are currently sized for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Size the buffers for `size` samples; a no-op when already sized.
    fn init(&mut self, size: usize) {
        if self.size == size {
            return;
        }
        self.size = size;

        let mut system = DenseMatrix::zeros(size, size);
        for i in 0..size {
            for j in 0..size {
                system.set(i, j, (size - i.max(j)) as f64);
            }
        }
        self.system = system;
        self.scratch = DenseMatrix::zeros(size, size);
        self.target = vec![0.0; size];
        self.rhs = vec![0.0; size];
        self.previous = vec![0.0; size];
    }

    /// Rewrite the tridiagonal band as `AᵗA` plus the reweighted
    /// first-difference penalty for the current iterate.
    fn update_band(&mut self, u: &[f64], alpha: f64) {
        let n = self.size;
        let mut prev = 0.0;
        for j in 0..n - 1 {
            let curr = alpha / (REWEIGHT_FLOOR + (u[j + 1] - u[j]).abs());
            let off = (n - j - 1) as f64 - curr;
            self.system.set(j, j, (n - j) as f64 + prev + curr);
            self.system.set(j, j + 1, off);
            self.system.set(j + 1, j, off);
            prev = curr;
        }
        self.system.set(n - 1, n - 1, 1.0 + prev);
    }

    /// Denoise `series`, returning its slope estimate.
    ///
    /// When the reweighted system turns singular the iterate from the last
    /// successful solve is returned with `converged == false`; `iterations`
    /// counts successful solves only.
    ///
    /// # Errors
    /// Fails on invalid configuration and on a series shorter than two
    /// samples or containing non-finite values.
    pub fn denoise(&mut self, series: &[f64], config: &VerdetConfig) -> Result<TvrOutput> {
        config.validate()?;
        validate_series(series)?;

        let n = series.len();
        self.init(n);

        // Initial guess with the time-zero intercept removed
        let origin = series[0];
        let mut u: Vec<f64> = series.iter().map(|&v| v - origin).collect();

        // Aᵗg as a cumulative sum from the end
        self.target[n - 1] = u[n - 1];
        for i in (0..n - 1).rev() {
            self.target[i] = self.target[i + 1] + u[i];
        }

        self.previous.fill(f64::INFINITY);

        let mut iterations = 0;
        let mut converged = false;
        for iteration in 0..config.max_iterations {
            self.update_band(&u, config.alpha);
            self.scratch.copy_from(&self.system);
            self.rhs.copy_from_slice(&self.target);
            // A huge alpha can cancel the band to a zero pivot. Keep the last
            // iterate; the merge threshold then absorbs every slope break.
            if let Err(err) = solve_in_place(&mut self.scratch, &mut self.rhs) {
                tracing::warn!(
                    iteration,
                    alpha = config.alpha,
                    error = %err,
                    "TVR system became singular, keeping the last iterate"
                );
                break;
            }
            u.copy_from_slice(&self.rhs);
            iterations = iteration + 1;

            if iteration > CONVERGENCE_WARMUP {
                let max_change = self
                    .previous
                    .iter()
                    .zip(&u)
                    .map(|(p, c)| (p - c).abs())
                    .fold(0.0, f64::max);
                if max_change <= config.tolerance {
                    converged = true;
                    tracing::debug!(iterations, max_change, "TVR denoiser converged");
                    break;
                }
                self.previous.copy_from_slice(&u);
            }
        }

        if !converged {
            tracing::debug!(
                iterations,
                tolerance = config.tolerance,
                "TVR denoiser reached the iteration cap"
            );
        }

        Ok(TvrOutput {
            slopes: u,
            iterations,
            converged,
        })
    }
}

/// Denoise a single series with a throwaway workspace.
pub fn denoise(series: &[f64], config: &VerdetConfig) -> Result<TvrOutput> {
    TvrWorkspace::new().denoise(series, config)
}
