//! Regression deconvolution of head records.
//!
//! Differenced heads are regressed on lagged, differenced barometric
//! pressure (and optionally Earth tides):
//!
//! ```text
//! ΔGW[r] = c0 + Σ_j b_j·(−ΔBP[r−j]) + Earth-tide terms + ε
//! ```
//!
//! The barometric coefficients form the impulse response; their running
//! sum is the cumulative barometric response function.

use geotide_signal::{
    ConstituentTable, FitDiagnostics, FrequencyComponent, Outcome, SignalError, least_squares,
    regular_step,
};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use tracing::debug;

use crate::config::{DeconvConfig, EarthTide};
use crate::design::{harmonic_block, lagged_block, with_intercept};
use crate::error::DeconvError;
use crate::response::ResponseFunction;

/// Starting value of every coefficient in the iterative fit.
const INITIAL_COEFFICIENT: f64 = 0.5;

/// Earth-tide part of a deconvolution result.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "mode", content = "response", rename_all = "snake_case")]
pub enum EarthTideResponse {
    /// Earth tides were not modelled.
    None,
    /// Complex response per frequency, for the differenced head.
    Harmonic(Vec<FrequencyComponent>),
    /// Lag response to the Earth-tide record.
    Series(ResponseFunction),
}

/// Result of [`deconvolve`].
#[derive(Clone, Debug, Serialize)]
pub struct Deconvolution {
    corrected_head: Vec<f64>,
    barometric: ResponseFunction,
    earth_tide: EarthTideResponse,
    intercept: f64,
    diagnostics: FitDiagnostics,
}

impl Deconvolution {
    /// Head with the fitted barometric and Earth-tide effects removed,
    /// shifted to keep the mean of the original head.
    pub fn corrected_head(&self) -> &[f64] {
        &self.corrected_head
    }

    /// Barometric response function.
    pub fn barometric(&self) -> &ResponseFunction {
        &self.barometric
    }

    /// Earth-tide response.
    pub fn earth_tide(&self) -> &EarthTideResponse {
        &self.earth_tide
    }

    /// Constant drift term of the differenced head.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Condition number of the design matrix and residual variance
    /// `SSR / (n − p)`.
    pub fn diagnostics(&self) -> &FitDiagnostics {
        &self.diagnostics
    }
}

/// Estimates barometric (and optionally Earth-tide) response functions of a
/// well by regression deconvolution.
///
/// Sign convention: the barometric columns hold `−ΔBP`, so a head that
/// falls as pressure rises gives positive coefficients.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`DeconvError::Signal`] | length mismatch, non-finite data, or irregular sampling |
/// | [`DeconvError::InvalidLag`] | `lag_hours` negative or not finite |
/// | [`DeconvError::TooFewSamples`] | no more differenced samples than lags |
/// | [`DeconvError::InvalidFrequencies`] | harmonic mode with no or non-positive frequencies |
#[tracing::instrument(skip_all, fields(n = time.len(), earth_tide = earth_tide.label()))]
pub fn deconvolve(
    time: &[f64],
    head: &[f64],
    pressure: &[f64],
    earth_tide: EarthTide<'_>,
    config: &DeconvConfig,
) -> Result<Outcome<Deconvolution>, DeconvError> {
    validate_inputs(time, head, pressure, earth_tide)?;
    let lag_hours = config.lag_hours();
    if !lag_hours.is_finite() || lag_hours < 0.0 {
        return Err(DeconvError::InvalidLag { lag_hours });
    }

    let dt = regular_step(time)?;
    let samples_per_day = (1.0 / dt).round() as usize;
    let nlag = config.lag_count(samples_per_day);

    let d_head = geotide_stats::diff(head);
    let d_pressure = geotide_stats::diff(pressure);
    let n = d_head.len();
    if n <= nlag {
        return Err(DeconvError::TooFewSamples {
            samples: n,
            lags: nlag + 1,
        });
    }

    let mut blocks = vec![lagged_block(&d_pressure, nlag, -1.0)];
    match earth_tide {
        EarthTide::Ignore => {}
        EarthTide::Harmonic(freqs) => blocks.push(harmonic_block(&time[..n], freqs)),
        EarthTide::Series(et) => blocks.push(lagged_block(&geotide_stats::diff(et), nlag, 1.0)),
    }
    let z = with_intercept(&blocks, n);
    let p = z.ncols();

    // Linear in the coefficients: one Gauss-Newton step from the start point
    // reaches the least-squares optimum.
    let y = DVector::from_vec(d_head);
    let c0 = DVector::from_element(p, INITIAL_COEFFICIENT);
    let residual0 = &y - &z * &c0;
    let fit = least_squares(&z, &residual0)?;
    let coefs = &c0 + fit.coefficients();

    let ssr = fit.residual_sum_of_squares();
    let dof = n.saturating_sub(p);
    let (error_variance, covariance) = if dof > 0 {
        let s2 = ssr / dof as f64;
        (s2, fit.covariance(s2))
    } else {
        (f64::INFINITY, DMatrix::from_element(p, p, f64::INFINITY))
    };
    let diagnostics = FitDiagnostics::new(fit.condition_number(), error_variance);
    debug!(
        nlag,
        columns = p,
        condition_number = diagnostics.condition_number(),
        error_variance,
        "deconvolution solved"
    );

    let x = z.columns(1, p - 1).into_owned();
    let corrected_head = corrected_head(head, &x, &coefs.rows(1, p - 1).into_owned());

    let nm = nlag + 1;
    let lag_axis = linspace(0.0, lag_hours, nm);
    let barometric = ResponseFunction::from_block(
        lag_axis.clone(),
        coefs.rows(1, nm).iter().copied().collect(),
        &covariance.view((1, 1), (nm, nm)).into_owned(),
    );

    let earth_tide = match earth_tide {
        EarthTide::Ignore => EarthTideResponse::None,
        EarthTide::Harmonic(freqs) => {
            EarthTideResponse::Harmonic(harmonic_response(freqs, &coefs, nm + 1, config.names()))
        }
        EarthTide::Series(_) => {
            let start = nm + 1;
            EarthTideResponse::Series(ResponseFunction::from_block(
                lag_axis,
                coefs.rows(start, nm).iter().copied().collect(),
                &covariance.view((start, start), (nm, nm)).into_owned(),
            ))
        }
    };

    let advisories = diagnostics.advisory().into_iter().collect();
    Ok(Outcome::new(
        Deconvolution {
            corrected_head,
            barometric,
            earth_tide,
            intercept: coefs[0],
            diagnostics,
        },
        advisories,
    ))
}

fn validate_inputs(
    time: &[f64],
    head: &[f64],
    pressure: &[f64],
    earth_tide: EarthTide<'_>,
) -> Result<(), DeconvError> {
    let check = |data: &[f64], what: &'static str| -> Result<(), SignalError> {
        if data.len() != time.len() {
            return Err(SignalError::LengthMismatch {
                what,
                expected: time.len(),
                got: data.len(),
            });
        }
        if !data.iter().all(|v| v.is_finite()) {
            return Err(SignalError::NonFiniteData { what });
        }
        Ok(())
    };
    check(time, "time")?;
    check(head, "head")?;
    check(pressure, "pressure")?;
    match earth_tide {
        EarthTide::Ignore => {}
        EarthTide::Series(et) => check(et, "earth tide")?,
        EarthTide::Harmonic(freqs) => {
            if freqs.is_empty() {
                return Err(DeconvError::InvalidFrequencies(
                    "at least one frequency is required".to_string(),
                ));
            }
            if let Some(f) = freqs.iter().find(|f| !f.is_finite() || **f <= 0.0) {
                return Err(DeconvError::InvalidFrequencies(format!(
                    "frequencies must be finite and > 0, got {f}"
                )));
            }
        }
    }
    Ok(())
}

/// `head − [0, cumsum(X·c)]`, shifted back to the mean of `head`.
fn corrected_head(head: &[f64], x: &DMatrix<f64>, coefs: &DVector<f64>) -> Vec<f64> {
    let effect = x * coefs;
    let cumulative = geotide_stats::cumulative_sum(effect.as_slice());
    let mut corrected: Vec<f64> = head
        .iter()
        .enumerate()
        .map(|(i, &h)| if i == 0 { h } else { h - cumulative[i - 1] })
        .collect();
    let shift = geotide_stats::mean(head) - geotide_stats::mean(&corrected);
    corrected.iter_mut().for_each(|v| *v += shift);
    corrected
}

/// Complex harmonic coefficients `cos_k + i·sin_k`, named from `names`.
fn harmonic_response(
    freqs: &[f64],
    coefs: &DVector<f64>,
    start: usize,
    names: &ConstituentTable,
) -> Vec<FrequencyComponent> {
    let m = freqs.len();
    freqs
        .iter()
        .enumerate()
        .map(|(k, &f)| {
            let c = FrequencyComponent::from_coefficients(f, coefs[start + k], coefs[start + m + k]);
            match names.name_of(f) {
                Some(name) => c.with_name(name),
                None => c,
            }
        })
        .collect()
}

/// `n` evenly spaced points from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}
