//! Configuration for the VeRDET segmentation pipeline.

use crate::error::{Result, VerdetError};

/// Default regularization weight and merge threshold (`1/20`).
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default convergence tolerance on the max-abs change between iterates.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default cap on reweighting iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Configuration for VeRDET segmentation.
///
/// `alpha` is a tied pair of knobs: it is both the total-variation weight
/// of the denoiser and the slope-difference threshold of the merger. The
/// defaults assume samples roughly in `[0, 1]`; larger values produce more
/// de-noising and fewer segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdetConfig {
    /// Regularization weight, reused as the segment merge threshold
    pub alpha: f64,
    /// Convergence threshold on the max-abs change between iterates
    pub tolerance: f64,
    /// Maximum number of reweighting iterations
    pub max_iterations: usize,
}

impl Default for VerdetConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl VerdetConfig {
    /// Set the regularization weight / merge threshold.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that every parameter lies in its domain.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(VerdetError::InvalidParameter(format!(
                "alpha must be finite and positive, got {}",
                self.alpha
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(VerdetError::InvalidParameter(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(VerdetError::InvalidParameter(
                "max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_config() {
        let config = VerdetConfig::default();
        assert_relative_eq!(config.alpha, 0.05, epsilon = 1e-15);
        assert_relative_eq!(config.tolerance, 1e-4, epsilon = 1e-15);
        assert_eq!(config.max_iterations, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder() {
        let config = VerdetConfig::default()
            .alpha(0.1)
            .tolerance(1e-6)
            .max_iterations(250);

        assert_relative_eq!(config.alpha, 0.1, epsilon = 1e-15);
        assert_relative_eq!(config.tolerance, 1e-6, epsilon = 1e-15);
        assert_eq!(config.max_iterations, 250);
    }

    #[test]
    fn rejects_non_positive_alpha() {
        for alpha in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let err = VerdetConfig::default().alpha(alpha).validate().unwrap_err();
            assert!(matches!(err, VerdetError::InvalidParameter(_)));
        }
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        let err = VerdetConfig::default()
            .tolerance(0.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("tolerance"));
    }

    #[test]
    fn rejects_zero_iterations() {
        let err = VerdetConfig::default()
            .max_iterations(0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            VerdetError::InvalidParameter("max_iterations must be at least 1".into())
        );
    }
}
