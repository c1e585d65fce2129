//! SVD-based linear least squares.

use nalgebra::{DMatrix, DVector, SVD};

use crate::diagnostics::condition_number;
use crate::error::SignalError;

/// Weight on a dropped singular vector above which a coefficient counts as
/// unidentified.
const UNIDENTIFIED_WEIGHT: f64 = 1e-8;

/// Solution of `min ||X·c - y||²`.
#[derive(Clone, Debug)]
pub struct LeastSquares {
    coefficients: DVector<f64>,
    fitted: DVector<f64>,
    singular_values: Vec<f64>,
    v_t: DMatrix<f64>,
    cutoff: f64,
    residual_sum_of_squares: f64,
}

impl LeastSquares {
    /// Fitted coefficients, one per design column.
    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    /// Design matrix times coefficients.
    pub fn fitted(&self) -> &DVector<f64> {
        &self.fitted
    }

    /// Singular values of the design matrix.
    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    /// Largest over smallest singular value.
    pub fn condition_number(&self) -> f64 {
        condition_number(&self.singular_values)
    }

    /// Sum of squared residuals.
    pub fn residual_sum_of_squares(&self) -> f64 {
        self.residual_sum_of_squares
    }

    /// `(XᵀX)⁺ = V·Σ⁻²·Vᵀ`, dropping singular values below the rank cutoff.
    ///
    /// Multiply by the residual variance to get the coefficient covariance.
    pub fn unscaled_covariance(&self) -> DMatrix<f64> {
        let p = self.v_t.ncols();
        let mut cov = DMatrix::zeros(p, p);
        for (k, &s) in self.singular_values.iter().enumerate() {
            if s <= self.cutoff {
                continue;
            }
            let row = self.v_t.row(k);
            let w = 1.0 / (s * s);
            for i in 0..p {
                for j in 0..p {
                    cov[(i, j)] += w * row[i] * row[j];
                }
            }
        }
        cov
    }

    /// Indices of coefficients the design cannot identify: those carrying
    /// weight on a right singular vector dropped by the rank cutoff.
    pub fn unidentified(&self) -> Vec<usize> {
        let p = self.v_t.ncols();
        (0..p)
            .filter(|&i| {
                self.singular_values
                    .iter()
                    .enumerate()
                    .any(|(k, &s)| s <= self.cutoff && self.v_t[(k, i)].abs() > UNIDENTIFIED_WEIGHT)
            })
            .collect()
    }

    /// Coefficient covariance `error_variance · (XᵀX)⁺`, with infinite
    /// variance on every [unidentified](Self::unidentified) coefficient.
    pub fn covariance(&self, error_variance: f64) -> DMatrix<f64> {
        let mut cov = self.unscaled_covariance() * error_variance;
        for i in self.unidentified() {
            cov[(i, i)] = f64::INFINITY;
        }
        cov
    }
}

/// Solve the linear least-squares problem `design · c ≈ y` via SVD.
///
/// Singular values below `ε·max(n, p)·σ_max` are treated as zero, giving
/// the minimum-norm solution for rank-deficient designs.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SignalError::LengthMismatch`] | `y.len() != design.nrows()` |
/// | [`SignalError::SolveFailed`] | the SVD solve breaks down |
pub fn least_squares(design: &DMatrix<f64>, y: &DVector<f64>) -> Result<LeastSquares, SignalError> {
    let (n, p) = design.shape();
    if y.len() != n {
        return Err(SignalError::LengthMismatch {
            what: "observations",
            expected: n,
            got: y.len(),
        });
    }

    let svd = SVD::new(design.clone(), true, true);
    let singular_values: Vec<f64> = svd.singular_values.iter().copied().collect();
    let max_sv = singular_values.iter().copied().fold(0.0, f64::max);
    let cutoff = f64::EPSILON * n.max(p) as f64 * max_sv;

    let coefficients = svd
        .solve(y, cutoff)
        .map_err(|e| SignalError::SolveFailed(e.to_string()))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| SignalError::SolveFailed("right singular vectors missing".into()))?;

    let fitted = design * &coefficients;
    let residual_sum_of_squares = (y - &fitted).norm_squared();

    Ok(LeastSquares {
        coefficients,
        fitted,
        singular_values,
        v_t,
        cutoff,
        residual_sum_of_squares,
    })
}
