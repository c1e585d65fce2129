//! Error types for the geotide-efficiency crate.

use geotide_signal::SignalError;

/// Error type for all fallible operations in the geotide-efficiency crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EfficiencyError {
    /// Returned when the pressure and head series differ in length.
    #[error("length mismatch: pressure has {x} samples, head has {y}")]
    LengthMismatch {
        /// Pressure series length.
        x: usize,
        /// Head series length.
        y: usize,
    },

    /// Returned when the series are too short for the method.
    #[error("series too short: got {len} samples, need at least {min}")]
    SeriesTooShort {
        /// Number of samples provided.
        len: usize,
        /// Minimum required by the method.
        min: usize,
    },

    /// Returned when the input contains NaN or infinite values.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when no head/pressure ratio survives filtering.
    #[error("no valid ratios: every pressure sample is zero or the ratio is not finite")]
    NoValidRatios,

    /// Returned when a regression has no spread in its regressor.
    #[error("{method}: regression is degenerate (regressor has zero spread)")]
    DegenerateRegression {
        /// Estimator name.
        method: &'static str,
    },

    /// Returned when the estimator divides by zero.
    #[error("{method}: zero denominator")]
    ZeroDenominator {
        /// Estimator name.
        method: &'static str,
    },

    /// Returned when a tidal component needed as a divisor is zero.
    #[error("{what} is zero")]
    ZeroComponent {
        /// Name of the component, e.g. `"BP S2"`.
        what: &'static str,
    },

    /// Returned when a required constituent is missing from a component list.
    #[error("{channel} has no {constituent} component")]
    MissingConstituent {
        /// Channel label.
        channel: &'static str,
        /// Constituent name.
        constituent: &'static str,
    },

    /// Returned when the amplitude damping factor is not positive.
    #[error("amplitude ratio must be finite and > 0, got {0}")]
    InvalidAmplitudeRatio(f64),

    /// Spectral estimation failure.
    #[error(transparent)]
    Signal(#[from] SignalError),
}
