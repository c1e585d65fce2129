//! Deconvolution configuration and Earth-tide treatment.

use geotide_signal::ConstituentTable;

/// How Earth-tide influences enter the regression.
#[derive(Clone, Copy, Debug)]
pub enum EarthTide<'a> {
    /// Barometric response only.
    Ignore,
    /// Sine/cosine columns at these frequencies (cycles/day).
    Harmonic(&'a [f64]),
    /// Lagged columns of a measured or synthetic Earth-tide record,
    /// sampled on the same time axis as the heads.
    Series(&'a [f64]),
}

impl EarthTide<'_> {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ignore => "none",
            Self::Harmonic(_) => "harmonic",
            Self::Series(_) => "series",
        }
    }
}

/// Configuration for [`deconvolve`](crate::deconvolve).
///
/// # Example
///
/// ```
/// use geotide_deconv::DeconvConfig;
///
/// let config = DeconvConfig::new().with_lag_hours(48.0);
/// assert_eq!(config.lag_hours(), 48.0);
/// ```
#[derive(Clone, Debug)]
pub struct DeconvConfig {
    /// Length of the response window (hours).
    lag_hours: f64,
    /// Table used to name harmonic Earth-tide coefficients.
    names: ConstituentTable,
}

impl DeconvConfig {
    /// Defaults: `lag_hours = 24`, names from the Earth-tide table.
    pub fn new() -> Self {
        Self {
            lag_hours: 24.0,
            names: ConstituentTable::earth_tide(),
        }
    }

    /// Sets the response window (hours).
    pub fn with_lag_hours(mut self, hours: f64) -> Self {
        self.lag_hours = hours;
        self
    }

    /// Sets the table used to name harmonic coefficients.
    pub fn with_names(mut self, names: ConstituentTable) -> Self {
        self.names = names;
        self
    }

    /// Returns the response window (hours).
    pub fn lag_hours(&self) -> f64 {
        self.lag_hours
    }

    /// Returns the naming table.
    pub fn names(&self) -> &ConstituentTable {
        &self.names
    }

    /// Number of lags beyond lag 0 for a record with `samples_per_day`.
    pub fn lag_count(&self, samples_per_day: usize) -> usize {
        (self.lag_hours / 24.0 * samples_per_day as f64).floor() as usize
    }
}

impl Default for DeconvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_count_hourly() {
        let config = DeconvConfig::new().with_lag_hours(24.0);
        assert_eq!(config.lag_count(24), 24);
    }

    #[test]
    fn lag_count_truncates() {
        let config = DeconvConfig::new().with_lag_hours(10.0);
        // 10 h at 4 samples per day is 1.67 samples.
        assert_eq!(config.lag_count(4), 1);
    }

    #[test]
    fn earth_tide_labels() {
        assert_eq!(EarthTide::Ignore.label(), "none");
        assert_eq!(EarthTide::Harmonic(&[1.0]).label(), "harmonic");
        assert_eq!(EarthTide::Series(&[]).label(), "series");
    }
}
