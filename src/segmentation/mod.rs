//! VeRDET temporal segmentation.
//!
//! Turns one equally spaced series (nominally one value per year) into a
//! piecewise-linear reconstruction whose slopes flag disturbance (negative)
//! and regeneration (positive).
//!
//! # Pipeline
//!
//! 1. **TVR denoiser** ([`tvr`]): iteratively reweighted least squares
//!    approximating total-variation minimization of the first derivative.
//! 2. **Merger** ([`merge`]): greedy left-to-right grouping of slopes that
//!    stay within `alpha` of the last segment boundary.
//! 3. **Basis** ([`basis`]): linear interpolation matrix from segment
//!    vertices to samples.
//! 4. **Vertex fit** ([`fit`]): least-squares vertex values, projected back
//!    to a full-length reconstruction.
//!
//! # Example
//!
//! ```
//! use verdet::segmentation::{solve, VerdetConfig};
//!
//! let series = vec![
//!     0.82, 0.78, 0.77, 0.86, 0.94, 0.95, 0.70, 0.78, 0.61, 0.42,
//!     0.28, 0.18, 0.10, 0.10, 0.12, 0.24, 0.39, 0.43, 0.50, 0.70,
//! ];
//! let fitted = solve(&series, &VerdetConfig::default()).unwrap();
//! assert_eq!(fitted.len(), series.len());
//! ```

pub mod basis;
pub mod config;
pub mod fit;
pub mod merge;
pub mod solver;
pub mod trend;
pub mod tvr;

pub use basis::build_interpolation_matrix;
pub use config::{VerdetConfig, DEFAULT_ALPHA, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
pub use fit::{fit_to_vertices, VertexFit};
pub use merge::{merge_segments, SegmentAssignment};
pub use solver::{solve, Segmentation, Verdet};
pub use trend::{classify_slope, reconstruction_slopes, trend_segments, TrendKind, TrendSegment};
pub use tvr::{denoise, TvrOutput, TvrWorkspace, CONVERGENCE_WARMUP, REWEIGHT_FLOOR};
