//! Impulse and cumulative response functions with error propagation.

use nalgebra::DMatrix;
use serde::Serialize;

/// Lag-domain response of the head to one forcing.
///
/// `coefficients[i]` is the impulse response at `lag_hours[i]`; the
/// cumulative response is their running sum, with standard deviations
/// propagated through the full coefficient covariance.
#[derive(Clone, Debug, Serialize)]
pub struct ResponseFunction {
    lag_hours: Vec<f64>,
    coefficients: Vec<f64>,
    coefficient_sd: Vec<f64>,
    cumulative: Vec<f64>,
    cumulative_sd: Vec<f64>,
}

impl ResponseFunction {
    /// Builds the response from the fitted coefficients of one lag block and
    /// the matching square block of the covariance matrix.
    pub(crate) fn from_block(lag_hours: Vec<f64>, coefficients: Vec<f64>, cov: &DMatrix<f64>) -> Self {
        let n = coefficients.len();
        let coefficient_sd = (0..n).map(|i| cov[(i, i)].sqrt()).collect();
        let cumulative = geotide_stats::cumulative_sum(&coefficients);

        // Var(Σ_{k<=i} c_k) = Σ diag + 2·Σ strictly-lower over the leading i+1 block.
        let mut cumulative_sd = Vec::with_capacity(n);
        let mut var = 0.0;
        for i in 0..n {
            var += cov[(i, i)];
            for j in 0..i {
                var += 2.0 * cov[(i, j)];
            }
            cumulative_sd.push(var.sqrt());
        }

        Self {
            lag_hours,
            coefficients,
            coefficient_sd,
            cumulative,
            cumulative_sd,
        }
    }

    /// Lag of each coefficient (hours).
    pub fn lag_hours(&self) -> &[f64] {
        &self.lag_hours
    }

    /// Impulse response coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Standard deviation of each impulse coefficient.
    pub fn coefficient_sd(&self) -> &[f64] {
        &self.coefficient_sd
    }

    /// Cumulative response (running sum of the impulse response).
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Standard deviation of the cumulative response.
    pub fn cumulative_sd(&self) -> &[f64] {
        &self.cumulative_sd
    }

    /// Number of lags including lag 0.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns `true` if there are no coefficients.
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}
