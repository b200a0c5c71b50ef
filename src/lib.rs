//! # verdet
//!
//! VeRDET (Vegetation Regeneration and Disturbance Estimates through Time)
//! temporal segmentation for equally spaced series.
//!
//! Each series is denoised with 1-D first-derivative total variation
//! regularization, near-equal slopes are merged into segments, and the
//! series is refitted as a piecewise-linear curve through the segment
//! vertices. Negative fitted slopes indicate disturbance and positive ones
//! regeneration.
//!
//! Only temporal segmentation is performed: masking, spatial segmentation and
//! raster handling belong to the caller. For the default parameters, values
//! should lie roughly in `[0, 1]`.
//!
//! Reference: Hughes, M.J., Kaylor, S.D. and Hayes, D.J., 2017. Patch-based
//! forest change detection from Landsat time series. Forests, 8(5), p.166.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::needless_range_loop)]

pub mod batch;
pub mod core;
pub mod error;
pub mod segmentation;
pub mod utils;

pub use error::{Result, VerdetError};
pub use segmentation::{solve, Segmentation, Verdet, VerdetConfig};

pub mod prelude {
    pub use crate::batch::{solve_batch, solve_rows};
    pub use crate::error::{Result, VerdetError};
    pub use crate::segmentation::{
        solve, Segmentation, TrendKind, TrendSegment, Verdet, VerdetConfig,
    };
}
