//! Overlapping-window linear detrending.

use geotide_stats::line_fit;
use tracing::debug;

use crate::error::SignalError;
use crate::series::{check_finite, check_increasing, check_lengths};

/// Configuration for [`detrend_windowed`].
#[derive(Clone, Debug)]
pub struct DetrendConfig {
    /// Window length (days).
    window_days: f64,
    /// Fewest valid samples a window needs to be fitted.
    min_samples: usize,
    /// Number of overlapping windows per window length.
    overlaps: usize,
}

impl DetrendConfig {
    /// Defaults: `window_days = 3`, `min_samples = 3`, `overlaps = 3`.
    pub fn new() -> Self {
        Self {
            window_days: 3.0,
            min_samples: 3,
            overlaps: 3,
        }
    }

    /// Sets the window length (days).
    pub fn with_window_days(mut self, days: f64) -> Self {
        self.window_days = days;
        self
    }

    /// Sets the fewest valid samples a window needs.
    pub fn with_min_samples(mut self, n: usize) -> Self {
        self.min_samples = n;
        self
    }

    /// Sets the number of overlapping windows per window length.
    pub fn with_overlaps(mut self, n: usize) -> Self {
        self.overlaps = n;
        self
    }

    /// Returns the window length (days).
    pub fn window_days(&self) -> f64 {
        self.window_days
    }

    /// Returns the minimum samples per window.
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Returns the overlap count.
    pub fn overlaps(&self) -> usize {
        self.overlaps
    }

    /// Distance between successive window centres (days).
    pub fn step_days(&self) -> f64 {
        self.window_days / (self.overlaps + 1) as f64
    }
}

impl Default for DetrendConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes slow trends by averaging linear detrends over overlapping windows.
///
/// Window centres run on a grid of spacing `window / (overlaps + 1)` that
/// extends one window beyond each end of the record. Each window covers
/// `(centre - window/2, centre + window/2]`; windows with fewer than
/// `min_samples` finite values are skipped. Every sample's output is the
/// mean of its detrended values over all fitted windows covering it.
/// NaN samples and samples no window covers come out as 0.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SignalError::LengthMismatch`] | `values.len() != time.len()` |
/// | [`SignalError::SeriesTooShort`] | fewer than 2 samples |
/// | [`SignalError::NonFiniteData`] | a time stamp is not finite |
/// | [`SignalError::NonMonotonicTime`] | time is not strictly increasing |
/// | [`SignalError::InvalidConfig`] | window is not positive or `min_samples < 2` |
pub fn detrend_windowed(
    time: &[f64],
    values: &[f64],
    config: &DetrendConfig,
) -> Result<Vec<f64>, SignalError> {
    validate_config(config)?;
    check_lengths(time, values, "values")?;
    if time.len() < 2 {
        return Err(SignalError::SeriesTooShort {
            len: time.len(),
            min: 2,
        });
    }
    check_finite(time, "time")?;
    check_increasing(time)?;

    let n = time.len();
    let window = config.window_days;
    let half = window / 2.0;
    let step = config.step_days();
    let start = time[0] - (time[1] - time[0]) - window;
    let stop = time[n - 1] + window;
    let n_windows = ((stop - start) / step).ceil() as usize;

    let mut sum = vec![0.0; n];
    let mut count = vec![0_usize; n];
    let mut fitted_windows = 0_usize;

    for w in 0..n_windows {
        let centre = start + w as f64 * step;
        let lo = time.partition_point(|&t| t <= centre - half);
        let hi = time.partition_point(|&t| t <= centre + half);

        let idx: Vec<usize> = (lo..hi).filter(|&i| values[i].is_finite()).collect();
        if idx.len() < config.min_samples {
            continue;
        }
        let tx: Vec<f64> = idx.iter().map(|&i| time[i]).collect();
        let vy: Vec<f64> = idx.iter().map(|&i| values[i]).collect();
        let Some(fit) = line_fit(&tx, &vy) else {
            continue;
        };
        for &i in &idx {
            sum[i] += values[i] - fit.predict(time[i]);
            count[i] += 1;
        }
        fitted_windows += 1;
    }
    debug!(n_windows, fitted_windows, "windowed detrend complete");

    Ok(sum
        .into_iter()
        .zip(count)
        .map(|(s, c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect())
}

fn validate_config(config: &DetrendConfig) -> Result<(), SignalError> {
    if !(config.window_days > 0.0) || !config.window_days.is_finite() {
        return Err(SignalError::InvalidConfig(
            "window length must be finite and > 0".to_string(),
        ));
    }
    if config.min_samples < 2 {
        return Err(SignalError::InvalidConfig(
            "min_samples must be >= 2".to_string(),
        ));
    }
    Ok(())
}
