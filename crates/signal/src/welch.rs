//! Welch-averaged cross-spectral density.

use std::f64::consts::TAU;

use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::Serialize;

use crate::error::SignalError;
use crate::series::{check_finite, check_lengths};

/// Default segment length.
const DEFAULT_SEGMENT: usize = 256;

/// Configuration for [`cross_spectral_density`].
///
/// # Example
///
/// ```ignore
/// use geotide_signal::WelchConfig;
///
/// // Hourly data, 10-day segments, 75% overlap.
/// let config = WelchConfig::new()
///     .with_sampling_frequency(24.0)
///     .with_segment_length(240)
///     .with_overlap(180);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WelchConfig {
    /// Samples per unit time.
    sampling_frequency: f64,
    /// Samples per segment; clipped to the record length.
    segment_length: usize,
    /// Samples shared by consecutive segments (None = half a segment).
    overlap: Option<usize>,
}

impl WelchConfig {
    /// Defaults: `sampling_frequency = 1`, `segment_length = 256`, half-segment overlap.
    pub fn new() -> Self {
        Self {
            sampling_frequency: 1.0,
            segment_length: DEFAULT_SEGMENT,
            overlap: None,
        }
    }

    /// Sets the sampling frequency.
    pub fn with_sampling_frequency(mut self, fs: f64) -> Self {
        self.sampling_frequency = fs;
        self
    }

    /// Sets the segment length in samples.
    pub fn with_segment_length(mut self, n: usize) -> Self {
        self.segment_length = n;
        self
    }

    /// Sets the segment overlap in samples.
    pub fn with_overlap(mut self, n: usize) -> Self {
        self.overlap = Some(n);
        self
    }

    /// Returns the sampling frequency.
    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Returns the requested segment length.
    pub fn segment_length(&self) -> usize {
        self.segment_length
    }

    /// Returns the requested overlap, if set.
    pub fn overlap(&self) -> Option<usize> {
        self.overlap
    }
}

impl Default for WelchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One-sided Welch spectra of a pair of records.
#[derive(Clone, Debug, Serialize)]
pub struct CrossSpectrum {
    frequencies: Vec<f64>,
    pxx: Vec<f64>,
    pxy: Vec<Complex64>,
    segments: usize,
}

impl CrossSpectrum {
    /// Bin frequencies, `k·fs/nperseg` for `k = 0..=nperseg/2`.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Power spectral density of `x`.
    pub fn pxx(&self) -> &[f64] {
        &self.pxx
    }

    /// Cross-spectral density `E[conj(X)·Y]`.
    pub fn pxy(&self) -> &[Complex64] {
        &self.pxy
    }

    /// Number of averaged segments.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// `|Pxy| / Pxx` for every bin where `Pxx` is not negligible.
    pub fn gain(&self) -> Vec<f64> {
        let max = self.pxx.iter().copied().fold(0.0, f64::max);
        let floor = f64::EPSILON * max;
        self.pxx
            .iter()
            .zip(&self.pxy)
            .filter(|(p, _)| **p > floor)
            .map(|(p, c)| c.norm() / p)
            .collect()
    }
}

/// Welch estimate of the cross-spectral density of `x` and `y`.
///
/// Segments use a periodic Hann window and have their mean removed;
/// densities are scaled by `1 / (fs·Σw²)` and doubled for bins strictly
/// between DC and Nyquist.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SignalError::LengthMismatch`] | `y.len() != x.len()` |
/// | [`SignalError::SeriesTooShort`] | fewer than 2 samples |
/// | [`SignalError::NonFiniteData`] | a value is NaN or infinite |
/// | [`SignalError::InvalidConfig`] | non-positive sampling frequency, or overlap >= segment |
pub fn cross_spectral_density(
    x: &[f64],
    y: &[f64],
    config: &WelchConfig,
) -> Result<CrossSpectrum, SignalError> {
    check_lengths(x, y, "y")?;
    let n = x.len();
    if n < 2 {
        return Err(SignalError::SeriesTooShort { len: n, min: 2 });
    }
    check_finite(x, "x")?;
    check_finite(y, "y")?;

    let fs = config.sampling_frequency;
    if !(fs > 0.0) || !fs.is_finite() {
        return Err(SignalError::InvalidConfig(
            "sampling frequency must be finite and > 0".to_string(),
        ));
    }
    let nperseg = config.segment_length.min(n).max(2);
    let noverlap = config.overlap.unwrap_or(nperseg / 2);
    if noverlap >= nperseg {
        return Err(SignalError::InvalidConfig(format!(
            "overlap {noverlap} must be smaller than segment length {nperseg}"
        )));
    }
    let step = nperseg - noverlap;
    let segments = (n - noverlap) / step;

    let window = hann_periodic(nperseg);
    let scale = 1.0 / (fs * window.iter().map(|w| w * w).sum::<f64>());
    let n_bins = nperseg / 2 + 1;

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(nperseg);

    let mut pxx = vec![0.0; n_bins];
    let mut pxy = vec![Complex64::new(0.0, 0.0); n_bins];
    for s in 0..segments {
        let range = s * step..s * step + nperseg;
        let mut fx = windowed_segment(&x[range.clone()], &window);
        let mut fy = windowed_segment(&y[range], &window);
        fft.process(&mut fx);
        fft.process(&mut fy);
        for k in 0..n_bins {
            pxx[k] += fx[k].norm_sqr();
            pxy[k] += fx[k].conj() * fy[k];
        }
    }

    let last_doubled = if nperseg % 2 == 0 { n_bins - 1 } else { n_bins };
    for k in 0..n_bins {
        let one_sided = if k > 0 && k < last_doubled { 2.0 } else { 1.0 };
        let factor = one_sided * scale / segments as f64;
        pxx[k] *= factor;
        pxy[k] *= factor;
    }

    let frequencies = (0..n_bins).map(|k| k as f64 * fs / nperseg as f64).collect();
    Ok(CrossSpectrum {
        frequencies,
        pxx,
        pxy,
        segments,
    })
}

/// Periodic Hann window `0.5 - 0.5·cos(2πk/N)`.
fn hann_periodic(n: usize) -> Vec<f64> {
    (0..n)
        .map(|k| 0.5 - 0.5 * (TAU * k as f64 / n as f64).cos())
        .collect()
}

fn windowed_segment(data: &[f64], window: &[f64]) -> Vec<Complex64> {
    let mean = geotide_stats::mean(data);
    data.iter()
        .zip(window)
        .map(|(&v, &w)| Complex64::new((v - mean) * w, 0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    fn noise(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0).unwrap();
        (0..n).map(|_| normal.sample(&mut rng)).collect()
    }

    #[test]
    fn scaled_copy_has_constant_gain() {
        let x = noise(2048, 7);
        let y: Vec<f64> = x.iter().map(|v| -0.4 * v).collect();
        let csd = cross_spectral_density(&x, &y, &WelchConfig::new()).unwrap();
        assert_eq!(csd.frequencies().len(), 129);
        assert_eq!(csd.segments(), 15);
        for g in csd.gain() {
            assert_relative_eq!(g, 0.4, epsilon = 1e-9);
        }
    }

    #[test]
    fn white_noise_psd_integrates_to_variance() {
        let x = noise(8192, 11);
        let csd = cross_spectral_density(&x, &x, &WelchConfig::new()).unwrap();
        let df = csd.frequencies()[1];
        let power: f64 = csd.pxx().iter().sum::<f64>() * df;
        assert_relative_eq!(power, 1.0, epsilon = 0.1);
    }

    #[test]
    fn segment_clipped_to_record() {
        let x = noise(100, 3);
        let csd = cross_spectral_density(&x, &x, &WelchConfig::new()).unwrap();
        assert_eq!(csd.segments(), 1);
        assert_eq!(csd.frequencies().len(), 51);
    }

    #[test]
    fn overlap_must_be_smaller_than_segment() {
        let x = noise(512, 5);
        let config = WelchConfig::new().with_overlap(256);
        let err = cross_spectral_density(&x, &x, &config).unwrap_err();
        assert!(matches!(err, SignalError::InvalidConfig(_)));
    }
}
