//! Least-squares fit diagnostics.

use nalgebra::DMatrix;
use serde::Serialize;
use tracing::warn;

use crate::outcome::Advisory;

/// Condition numbers above this flag a near-singular design matrix.
pub const ILL_CONDITIONED_THRESHOLD: f64 = 1e6;

/// Quality measures of a least-squares fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FitDiagnostics {
    condition_number: f64,
    error_variance: f64,
}

impl FitDiagnostics {
    /// Bundles a condition number with a residual variance.
    pub fn new(condition_number: f64, error_variance: f64) -> Self {
        Self {
            condition_number,
            error_variance,
        }
    }

    /// Ratio of the largest to the smallest singular value of the design matrix.
    pub fn condition_number(&self) -> f64 {
        self.condition_number
    }

    /// Residual variance of the fit.
    pub fn error_variance(&self) -> f64 {
        self.error_variance
    }

    /// The ill-conditioning advisory, if the condition number exceeds
    /// [`ILL_CONDITIONED_THRESHOLD`].
    pub fn advisory(&self) -> Option<Advisory> {
        conditioning_advisory(self.condition_number)
    }
}

/// Ratio of the largest to the smallest singular value.
///
/// Always >= 1. Returns infinity when the smallest value is zero or the
/// slice is empty.
pub fn condition_number(singular_values: &[f64]) -> f64 {
    let (lo, hi) = singular_values
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    if singular_values.is_empty() || lo <= 0.0 {
        return f64::INFINITY;
    }
    hi / lo
}

/// Condition number of a matrix via its singular values.
pub fn matrix_condition_number(matrix: &DMatrix<f64>) -> f64 {
    let singular = matrix.singular_values();
    condition_number(singular.as_slice())
}

/// Returns [`Advisory::IllConditioned`] above [`ILL_CONDITIONED_THRESHOLD`]
/// and logs a warning.
pub fn conditioning_advisory(condition_number: f64) -> Option<Advisory> {
    if condition_number > ILL_CONDITIONED_THRESHOLD {
        warn!(
            condition_number,
            "design matrix is ill-conditioned; consider fewer frequencies or lags"
        );
        Some(Advisory::IllConditioned { condition_number })
    } else {
        None
    }
}
