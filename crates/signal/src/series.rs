//! Validated, regularly indexed time series.

use geotide_stats::round_to;

use crate::error::SignalError;

/// Decimal places used when comparing sampling intervals.
const STEP_DECIMALS: i32 = 6;

/// A validated time series of finite `f64` values on a time axis in days.
///
/// Guarantees:
/// - `time` and `values` have equal length >= 2
/// - every time stamp and value is finite
/// - time is strictly increasing
///
/// # Example
///
/// ```ignore
/// use geotide_signal::TimeSeries;
///
/// let ts = TimeSeries::new(vec![0.0, 0.5, 1.0], vec![1.0, 2.0, 3.0])?;
/// assert_eq!(ts.len(), 3);
/// assert_eq!(ts.span(), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct TimeSeries {
    time: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Creates a new `TimeSeries` after validating both arrays.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SignalError::LengthMismatch`] | `values.len() != time.len()` |
    /// | [`SignalError::SeriesTooShort`] | fewer than 2 samples |
    /// | [`SignalError::NonFiniteData`] | any time stamp or value is NaN or infinite |
    /// | [`SignalError::NonMonotonicTime`] | time is not strictly increasing |
    pub fn new(time: Vec<f64>, values: Vec<f64>) -> Result<Self, SignalError> {
        check_lengths(&time, &values, "values")?;
        if time.len() < 2 {
            return Err(SignalError::SeriesTooShort {
                len: time.len(),
                min: 2,
            });
        }
        check_finite(&time, "time")?;
        check_finite(&values, "values")?;
        check_increasing(&time)?;
        Ok(Self { time, values })
    }

    /// Returns the time stamps (days).
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Returns the observed values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of observations.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if the series is empty.
    ///
    /// Note: a valid `TimeSeries` is never empty (minimum length is 2).
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Time between the first and last sample (days).
    pub fn span(&self) -> f64 {
        self.time[self.time.len() - 1] - self.time[0]
    }

    /// The constant sampling interval (days).
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::IrregularSampling`] when the smallest and
    /// largest steps differ after rounding to six decimals.
    pub fn regular_step(&self) -> Result<f64, SignalError> {
        regular_step(&self.time)
    }

    /// Fails with [`SignalError::InsufficientDuration`] when the record is
    /// shorter than `min_days`.
    pub fn require_span(&self, min_days: f64) -> Result<(), SignalError> {
        let span_days = self.span();
        if span_days < min_days {
            return Err(SignalError::InsufficientDuration {
                span_days,
                min_days,
            });
        }
        Ok(())
    }
}

/// Constant sampling interval of a time axis (days).
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SignalError::SeriesTooShort`] | fewer than 2 samples |
/// | [`SignalError::IrregularSampling`] | min and max step differ at six decimals |
pub fn regular_step(time: &[f64]) -> Result<f64, SignalError> {
    if time.len() < 2 {
        return Err(SignalError::SeriesTooShort {
            len: time.len(),
            min: 2,
        });
    }
    let (min_step, max_step) = time
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        });
    if round_to(min_step, STEP_DECIMALS) != round_to(max_step, STEP_DECIMALS) {
        return Err(SignalError::IrregularSampling { min_step, max_step });
    }
    Ok(time[1] - time[0])
}

/// Round `data` onto a grid of spacing `step`: `step * floor(data / step + 1/2)`.
pub fn quantise(data: &[f64], step: f64) -> Vec<f64> {
    data.iter()
        .map(|&x| step * (x / step + 0.5).floor())
        .collect()
}

pub(crate) fn check_lengths(
    reference: &[f64],
    other: &[f64],
    what: &'static str,
) -> Result<(), SignalError> {
    if reference.len() != other.len() {
        return Err(SignalError::LengthMismatch {
            what,
            expected: reference.len(),
            got: other.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_finite(data: &[f64], what: &'static str) -> Result<(), SignalError> {
    if data.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SignalError::NonFiniteData { what })
    }
}

pub(crate) fn check_increasing(time: &[f64]) -> Result<(), SignalError> {
    match time.windows(2).position(|w| w[1] <= w[0]) {
        Some(i) => Err(SignalError::NonMonotonicTime { index: i + 1 }),
        None => Ok(()),
    }
}

impl AsRef<[f64]> for TimeSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
