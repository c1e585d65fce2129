//! Error types for the geotide-deconv crate.

use geotide_signal::SignalError;

/// Error type for all fallible operations in the geotide-deconv crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeconvError {
    /// Input validation or least-squares failure from the signal layer.
    #[error(transparent)]
    Signal(#[from] SignalError),

    /// Returned when the lag window is negative or not finite.
    #[error("invalid lag window: {lag_hours} hours")]
    InvalidLag {
        /// Requested lag window (hours).
        lag_hours: f64,
    },

    /// Returned when the record has no more differenced samples than lags.
    #[error("too few samples: {samples} differenced samples for {lags} lags")]
    TooFewSamples {
        /// Number of differenced samples.
        samples: usize,
        /// Number of lag coefficients requested.
        lags: usize,
    },

    /// Returned when the harmonic Earth-tide mode is given no usable frequencies.
    #[error("invalid Earth-tide frequencies: {0}")]
    InvalidFrequencies(String),
}
