//! Segmenting many independent series, e.g. every pixel of a tile.
//!
//! Each series is solved on its own; nothing is shared between them except
//! the configuration. With the `rayon` feature the work is spread over the
//! thread pool with one solver (and one set of denoiser buffers) per worker.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::core::{first_non_finite, MIN_SERIES_LENGTH};
use crate::error::{Result, VerdetError};
use crate::segmentation::{Verdet, VerdetConfig};

/// Solve every series independently.
///
/// A failing series yields its own error and does not affect the others.
pub fn solve_batch(series: &[Vec<f64>], config: &VerdetConfig) -> Vec<Result<Vec<f64>>> {
    #[cfg(feature = "rayon")]
    {
        series
            .par_iter()
            .map_init(|| Verdet::new(*config), |solver, s| solver.solve(s))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        let mut solver = Verdet::new(*config);
        series.iter().map(|s| solver.solve(s)).collect()
    }
}

/// Solve each row of a row-major `rows × n_steps` buffer.
///
/// Rows holding any NaN or infinite sample are treated as masked and
/// skipped (`None`); the rest yield their reconstruction.
///
/// # Errors
/// Fails on an invalid configuration, on `n_steps < 2`, on a buffer whose
/// length is not a multiple of `n_steps`, and on a numerical failure in any
/// unmasked row.
pub fn solve_rows(
    values: &[f64],
    n_steps: usize,
    config: &VerdetConfig,
) -> Result<Vec<Option<Vec<f64>>>> {
    config.validate()?;
    if n_steps < MIN_SERIES_LENGTH {
        return Err(VerdetError::InsufficientData {
            needed: MIN_SERIES_LENGTH,
            got: n_steps,
        });
    }
    if values.len() % n_steps != 0 {
        return Err(VerdetError::InvalidParameter(format!(
            "buffer of {} values is not a whole number of {}-step rows",
            values.len(),
            n_steps
        )));
    }

    let solve_row = |solver: &mut Verdet, (row, samples): (usize, &[f64])| {
        if let Some(index) = first_non_finite(samples) {
            tracing::debug!(row, index, "skipping row with masked sample");
            return Ok(None);
        }
        solver.solve(samples).map(Some)
    };

    #[cfg(feature = "rayon")]
    {
        values
            .par_chunks_exact(n_steps)
            .enumerate()
            .map_init(|| Verdet::new(*config), solve_row)
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        let mut solver = Verdet::new(*config);
        values
            .chunks_exact(n_steps)
            .enumerate()
            .map(|item| solve_row(&mut solver, item))
            .collect()
    }
}
