//! Hann-windowed FFT amplitude spectrum.

use std::f64::consts::TAU;

use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::Serialize;
use tracing::debug;

use crate::component::FrequencyComponent;
use crate::constituents::ConstituentTable;
use crate::error::SignalError;
use crate::series::TimeSeries;

/// Configuration for [`fft_spectrum`].
#[derive(Clone, Debug)]
pub struct FftConfig {
    /// Shortest record accepted (days).
    min_duration_days: f64,
}

impl FftConfig {
    /// Defaults: `min_duration_days = 60`.
    pub fn new() -> Self {
        Self {
            min_duration_days: 60.0,
        }
    }

    /// Sets the shortest record accepted (days).
    pub fn with_min_duration_days(mut self, days: f64) -> Self {
        self.min_duration_days = days;
        self
    }

    /// Returns the shortest record accepted (days).
    pub fn min_duration_days(&self) -> f64 {
        self.min_duration_days
    }
}

impl Default for FftConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One-sided amplitude spectrum of a record.
///
/// Bin values follow the [`FrequencyComponent`] encoding (real = cosine
/// coefficient, imaginary = sine coefficient), so a cosine at a bin
/// frequency has zero phase.
#[derive(Clone, Debug, Serialize)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    values: Vec<Complex64>,
    dc: f64,
}

impl Spectrum {
    /// Bin frequencies (cycles/day), `k·fs/N` for `k < N/2`.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Complex amplitude per bin.
    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    /// Magnitude of the zero-frequency bin.
    pub fn dc(&self) -> f64 {
        self.dc
    }

    /// Amplitude per bin.
    pub fn amplitudes(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.norm()).collect()
    }

    /// The bin nearest to `frequency`, or `None` for an empty spectrum.
    pub fn component_at(&self, frequency: f64) -> Option<FrequencyComponent> {
        let idx = self
            .frequencies
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - frequency).abs().total_cmp(&(*b - frequency).abs()))
            .map(|(i, _)| i)?;
        Some(FrequencyComponent::new(self.frequencies[idx], self.values[idx]))
    }

    /// Nearest-bin components for every constituent in `table`, named.
    pub fn components(&self, table: &ConstituentTable) -> Vec<FrequencyComponent> {
        table
            .constituents()
            .iter()
            .filter_map(|c| {
                self.component_at(c.frequency)
                    .map(|comp| comp.with_name(c.name.clone()))
            })
            .collect()
    }
}

/// Computes the Hann-windowed amplitude spectrum of a regularly sampled record.
///
/// Each bin is scaled by `2 / (N/2)` so that a sinusoid of amplitude `A`
/// centred on a bin reads close to `A`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SignalError::InsufficientDuration`] | record shorter than `min_duration_days` |
/// | [`SignalError::IrregularSampling`] | sampling interval is not constant |
#[tracing::instrument(skip_all, fields(n = series.len()))]
pub fn fft_spectrum(series: &TimeSeries, config: &FftConfig) -> Result<Spectrum, SignalError> {
    series.require_span(config.min_duration_days)?;
    let dt = series.regular_step()?;
    let samples_per_day = 1.0 / dt;

    let n = series.len();
    let window = hann_symmetric(n);
    let mut buffer: Vec<Complex64> = series
        .values()
        .iter()
        .zip(&window)
        .map(|(&x, &w)| Complex64::new(x * w, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let half = n / 2;
    let scale = 2.0 / half as f64;
    // The DFT bin of a·cos + b·sin is proportional to a - i·b.
    let values: Vec<Complex64> = buffer[..half].iter().map(|&c| (c * scale).conj()).collect();
    let frequencies = (0..half)
        .map(|k| k as f64 * samples_per_day / n as f64)
        .collect();
    let dc = values.first().map_or(0.0, |v| v.norm());
    debug!(dc, bins = half, "spectrum computed");

    Ok(Spectrum {
        frequencies,
        values,
        dc,
    })
}

/// Symmetric Hann window `0.5 - 0.5·cos(2πk/(N-1))`.
pub(crate) fn hann_symmetric(n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![1.0; n];
    }
    let denom = (n - 1) as f64;
    (0..n)
        .map(|k| 0.5 - 0.5 * (TAU * k as f64 / denom).cos())
        .collect()
}
