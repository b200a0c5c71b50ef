//! End-to-end VeRDET solver: denoise, merge, build basis, refit.

use crate::core::DenseMatrix;
use crate::error::Result;

use super::basis::build_interpolation_matrix;
use super::config::VerdetConfig;
use super::fit::{fit_to_vertices, VertexFit};
use super::merge::{merge_segments, SegmentAssignment};
use super::trend::{trend_segments, TrendSegment};
use super::tvr::TvrWorkspace;

/// Intermediate products of segmenting one series.
///
/// Holds everything needed to refit other series on the same breakpoints,
/// e.g. segment on a vegetation index and refit a single reflectance band.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Denoised slope estimate
    pub slopes: Vec<f64>,
    /// Reweighting iterations run by the denoiser
    pub iterations: usize,
    /// Whether the denoiser met its tolerance
    pub converged: bool,
    /// Segment id per sample
    pub assignment: SegmentAssignment,
    /// `n × vertex_count` interpolation matrix
    pub basis: DenseMatrix,
}

impl Segmentation {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Whether the segmentation covers no samples.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Number of slope breaks kept after merging.
    pub fn segment_count(&self) -> usize {
        self.assignment.segment_count()
    }

    /// Sample indices of the interpolation vertices.
    pub fn vertex_indices(&self) -> Vec<usize> {
        self.assignment.vertex_indices()
    }

    /// Fit `target` on this segmentation, keeping the vertex values.
    pub fn fit_vertices(&self, target: &[f64]) -> Result<VertexFit> {
        fit_to_vertices(&self.basis, target)
    }

    /// Fit `target` on this segmentation and return the reconstruction.
    pub fn fit(&self, target: &[f64]) -> Result<Vec<f64>> {
        Ok(self.fit_vertices(target)?.fitted)
    }

    /// Label the vertex-to-vertex spans of a reconstruction by slope.
    pub fn trends(&self, reconstruction: &[f64], threshold: f64) -> Result<Vec<TrendSegment>> {
        trend_segments(reconstruction, &self.assignment, threshold)
    }
}

/// VeRDET solver.
///
/// Reuses its denoiser buffers across calls as long as the series length is
/// unchanged. Results do not depend on what was solved before.
///
/// # Example
///
/// ```
/// use verdet::segmentation::{Verdet, VerdetConfig};
///
/// let series = vec![0.8, 0.81, 0.79, 0.8, 0.5, 0.2, 0.25, 0.3, 0.35, 0.4];
/// let mut solver = Verdet::new(VerdetConfig::default());
/// let fitted = solver.solve(&series).unwrap();
/// assert_eq!(fitted.len(), series.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Verdet {
    config: VerdetConfig,
    workspace: TvrWorkspace,
}

impl Verdet {
    /// Create a solver. The configuration is validated on every call.
    pub fn new(config: VerdetConfig) -> Self {
        Self {
            config,
            workspace: TvrWorkspace::new(),
        }
    }

    /// Configuration applied to every series.
    pub fn config(&self) -> &VerdetConfig {
        &self.config
    }

    /// Series length the cached buffers are sized for (0 before first use).
    pub fn cached_size(&self) -> usize {
        self.workspace.size()
    }

    /// Denoise, merge and build the interpolation basis for `series`.
    pub fn segment(&mut self, series: &[f64]) -> Result<Segmentation> {
        let tvr = self.workspace.denoise(series, &self.config)?;
        let assignment = merge_segments(&tvr.slopes, self.config.alpha)?;
        let basis = build_interpolation_matrix(&assignment);

        Ok(Segmentation {
            slopes: tvr.slopes,
            iterations: tvr.iterations,
            converged: tvr.converged,
            assignment,
            basis,
        })
    }

    /// Piecewise-linear reconstruction of `series`.
    pub fn solve(&mut self, series: &[f64]) -> Result<Vec<f64>> {
        self.segment(series)?.fit(series)
    }
}

/// Piecewise-linear reconstruction of `series` with a one-off solver.
///
/// # Example
///
/// ```
/// use verdet::segmentation::{solve, VerdetConfig};
///
/// let fitted = solve(&[0.2, 0.9], &VerdetConfig::default()).unwrap();
/// assert!((fitted[0] - 0.2).abs() < 1e-9);
/// assert!((fitted[1] - 0.9).abs() < 1e-9);
/// ```
pub fn solve(series: &[f64], config: &VerdetConfig) -> Result<Vec<f64>> {
    Verdet::new(*config).solve(series)
}
