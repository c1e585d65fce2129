//! FFT-based circular auto- and cross-correlation.

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::error::SignalError;
use crate::series::{check_finite, check_lengths};

/// Normalised circular autocorrelation of `x` for lags `0..N/2`.
///
/// The mean is removed first; lag 0 equals 1.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SignalError::SeriesTooShort`] | fewer than 2 samples |
/// | [`SignalError::NonFiniteData`] | a value is NaN or infinite |
/// | [`SignalError::ZeroVariance`] | `x` is constant |
pub fn autocorrelation(x: &[f64]) -> Result<Vec<f64>, SignalError> {
    cross_correlation(x, x)
}

/// Circular cross-correlation `Σ_k x'(k)·y'(k + lag)` for lags `0..N/2`,
/// normalised by `Σ x'²` where `'` denotes mean removal.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SignalError::LengthMismatch`] | `y.len() != x.len()` |
/// | [`SignalError::SeriesTooShort`] | fewer than 2 samples |
/// | [`SignalError::NonFiniteData`] | a value is NaN or infinite |
/// | [`SignalError::ZeroVariance`] | `x` is constant |
pub fn cross_correlation(x: &[f64], y: &[f64]) -> Result<Vec<f64>, SignalError> {
    check_lengths(x, y, "y")?;
    let n = x.len();
    if n < 2 {
        return Err(SignalError::SeriesTooShort { len: n, min: 2 });
    }
    check_finite(x, "x")?;
    check_finite(y, "y")?;

    let mut fx = centred(x);
    let mut fy = centred(y);
    let norm: f64 = fx.iter().map(|c| c.re * c.re).sum();
    if norm == 0.0 {
        return Err(SignalError::ZeroVariance { what: "x" });
    }

    let mut planner = FftPlanner::new();
    let forward = planner.plan_fft_forward(n);
    forward.process(&mut fx);
    forward.process(&mut fy);

    let mut product: Vec<Complex64> = fx.iter().zip(&fy).map(|(a, b)| a.conj() * b).collect();
    planner.plan_fft_inverse(n).process(&mut product);

    // rustfft is unnormalized
    let scale = 1.0 / (n as f64 * norm);
    Ok(product[..n / 2].iter().map(|c| c.re * scale).collect())
}

fn centred(data: &[f64]) -> Vec<Complex64> {
    let mean = geotide_stats::mean(data);
    data.iter().map(|&v| Complex64::new(v - mean, 0.0)).collect()
}
