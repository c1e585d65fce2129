//! Harmonic least squares (HALS) extraction of tidal components.
//!
//! Fits `y(t) = Σ_j [a_j·cos(2πf_j·t) + b_j·sin(2πf_j·t)] + c` to a
//! record and reports each `a_j + i·b_j` as a [`FrequencyComponent`].

use std::f64::consts::TAU;

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use tracing::debug;

use crate::component::FrequencyComponent;
use crate::constituents::ConstituentTable;
use crate::diagnostics::FitDiagnostics;
use crate::error::SignalError;
use crate::lstsq::least_squares;
use crate::outcome::Outcome;
use crate::series::TimeSeries;

/// Configuration for [`hals`].
///
/// # Example
///
/// ```ignore
/// use geotide_signal::{ConstituentTable, HalsConfig};
///
/// let config = HalsConfig::new()
///     .with_min_duration_days(30.0)
///     .with_names(ConstituentTable::earth_tide());
/// ```
#[derive(Clone, Debug)]
pub struct HalsConfig {
    /// Shortest record accepted (days).
    min_duration_days: f64,
    /// Table used to name fitted frequencies.
    names: ConstituentTable,
}

impl HalsConfig {
    /// Defaults: `min_duration_days = 20`, names from the groundwater table.
    pub fn new() -> Self {
        Self {
            min_duration_days: 20.0,
            names: ConstituentTable::groundwater(),
        }
    }

    /// Sets the shortest record accepted (days).
    pub fn with_min_duration_days(mut self, days: f64) -> Self {
        self.min_duration_days = days;
        self
    }

    /// Sets the table used to name fitted frequencies.
    pub fn with_names(mut self, names: ConstituentTable) -> Self {
        self.names = names;
        self
    }

    /// Returns the shortest record accepted (days).
    pub fn min_duration_days(&self) -> f64 {
        self.min_duration_days
    }

    /// Returns the naming table.
    pub fn names(&self) -> &ConstituentTable {
        &self.names
    }
}

impl Default for HalsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a harmonic least-squares fit.
#[derive(Clone, Debug, Serialize)]
pub struct HalsResult {
    components: Vec<FrequencyComponent>,
    offset: f64,
    diagnostics: FitDiagnostics,
    fitted: Vec<f64>,
}

impl HalsResult {
    /// One component per requested frequency, in request order.
    pub fn components(&self) -> &[FrequencyComponent] {
        &self.components
    }

    /// The component named `name`, if it was fitted.
    pub fn component(&self, name: &str) -> Option<&FrequencyComponent> {
        self.components.iter().find(|c| c.name() == Some(name))
    }

    /// Constant term of the fit.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Condition number and residual variance (`SSR / N`).
    pub fn diagnostics(&self) -> &FitDiagnostics {
        &self.diagnostics
    }

    /// Fitted harmonic model at each sample.
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }
}

/// Fits harmonics at `frequencies` (cycles/day) to `series`.
///
/// Time is shifted by `floor(t[0])` before fitting, so phases refer to the
/// start of the first day of the record.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SignalError::InvalidConfig`] | no frequencies, or a non-finite/non-positive frequency |
/// | [`SignalError::InsufficientDuration`] | record shorter than `min_duration_days` |
/// | [`SignalError::SolveFailed`] | the least-squares solve breaks down |
#[tracing::instrument(skip_all, fields(n = series.len(), n_freq = frequencies.len()))]
pub fn hals(
    series: &TimeSeries,
    frequencies: &[f64],
    config: &HalsConfig,
) -> Result<Outcome<HalsResult>, SignalError> {
    validate_frequencies(frequencies)?;
    series.require_span(config.min_duration_days)?;

    let t0 = series.time()[0].floor();
    let design = harmonic_design(series.time(), t0, frequencies);
    let y = DVector::from_column_slice(series.values());
    let fit = least_squares(&design, &y)?;

    let coefs = fit.coefficients();
    let m = frequencies.len();
    let components = frequencies
        .iter()
        .enumerate()
        .map(|(j, &f)| {
            let c = FrequencyComponent::from_coefficients(f, coefs[2 * j], coefs[2 * j + 1]);
            match config.names.name_of(f) {
                Some(name) => c.with_name(name),
                None => c,
            }
        })
        .collect();
    let offset = coefs[2 * m];

    let error_variance = fit.residual_sum_of_squares() / series.len() as f64;
    let diagnostics = FitDiagnostics::new(fit.condition_number(), error_variance);
    debug!(
        condition_number = diagnostics.condition_number(),
        error_variance, offset, "harmonic fit complete"
    );

    let advisories = diagnostics.advisory().into_iter().collect();
    Ok(Outcome::new(
        HalsResult {
            components,
            offset,
            diagnostics,
            fitted: fit.fitted().iter().copied().collect(),
        },
        advisories,
    ))
}

/// Design matrix `[cos_1, sin_1, ..., cos_m, sin_m, 1]` over `t - t0`.
fn harmonic_design(time: &[f64], t0: f64, frequencies: &[f64]) -> DMatrix<f64> {
    let m = frequencies.len();
    DMatrix::from_fn(time.len(), 2 * m + 1, |i, j| {
        if j == 2 * m {
            return 1.0;
        }
        let arg = TAU * frequencies[j / 2] * (time[i] - t0);
        if j % 2 == 0 { arg.cos() } else { arg.sin() }
    })
}

fn validate_frequencies(frequencies: &[f64]) -> Result<(), SignalError> {
    if frequencies.is_empty() {
        return Err(SignalError::InvalidConfig(
            "at least one frequency is required".to_string(),
        ));
    }
    if let Some(f) = frequencies.iter().find(|f| !f.is_finite() || **f <= 0.0) {
        return Err(SignalError::InvalidConfig(format!(
            "frequencies must be finite and > 0, got {f}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constituents::{M2, S2};
    use approx::assert_relative_eq;

    fn hourly_series(days: usize, f: impl Fn(f64) -> f64) -> TimeSeries {
        let time: Vec<f64> = (0..days * 24).map(|i| i as f64 / 24.0).collect();
        let values = time.iter().map(|&t| f(t)).collect();
        TimeSeries::new(time, values).unwrap()
    }

    #[test]
    fn recovers_exact_harmonics() {
        let series = hourly_series(30, |t| {
            0.7 + 2.0 * (TAU * M2 * t).cos() - 0.5 * (TAU * M2 * t).sin()
                + 0.3 * (TAU * S2 * t).sin()
        });
        let outcome = hals(&series, &[M2, S2], &HalsConfig::new()).unwrap();
        assert!(outcome.is_clean());
        let result = outcome.value();

        let m2 = result.component("M2").unwrap();
        assert_relative_eq!(m2.cos(), 2.0, epsilon = 1e-8);
        assert_relative_eq!(m2.sin(), -0.5, epsilon = 1e-8);
        let s2 = result.component("S2").unwrap();
        assert_relative_eq!(s2.cos(), 0.0, epsilon = 1e-8);
        assert_relative_eq!(s2.sin(), 0.3, epsilon = 1e-8);
        assert_relative_eq!(result.offset(), 0.7, epsilon = 1e-8);
        assert!(result.diagnostics().error_variance() < 1e-16);
        assert!(result.diagnostics().condition_number() >= 1.0);
    }

    #[test]
    fn unnamed_frequency_has_no_name() {
        let series = hourly_series(25, |t| (TAU * 1.5 * t).cos());
        let result = hals(&series, &[1.5], &HalsConfig::new()).unwrap().into_value();
        assert!(result.components()[0].name().is_none());
        assert_relative_eq!(result.components()[0].amplitude(), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn phase_refers_to_start_of_first_day() {
        // Same signal, record starting mid-day: floor(t0) = 100.
        let time: Vec<f64> = (0..30 * 24).map(|i| 100.5 + i as f64 / 24.0).collect();
        let values = time
            .iter()
            .map(|&t| (TAU * S2 * (t - 100.0)).cos())
            .collect();
        let series = TimeSeries::new(time, values).unwrap();
        let result = hals(&series, &[S2], &HalsConfig::new()).unwrap().into_value();
        assert_relative_eq!(result.components()[0].phase(), 0.0, epsilon = 1e-8);
    }

    #[test]
    fn short_record_rejected() {
        let series = hourly_series(10, |t| t.sin());
        let err = hals(&series, &[M2], &HalsConfig::new()).unwrap_err();
        assert!(matches!(err, SignalError::InsufficientDuration { .. }));
    }

    #[test]
    fn empty_frequencies_rejected() {
        let series = hourly_series(30, |t| t.sin());
        let err = hals(&series, &[], &HalsConfig::new()).unwrap_err();
        assert!(matches!(err, SignalError::InvalidConfig(_)));
    }

    #[test]
    fn duplicated_frequency_is_ill_conditioned() {
        let series = hourly_series(30, |t| (TAU * M2 * t).cos());
        let outcome = hals(&series, &[M2, M2], &HalsConfig::new()).unwrap();
        assert!(!outcome.is_clean());
        assert!(outcome.value().diagnostics().condition_number() > 1e6);
    }
}
