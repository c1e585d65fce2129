//! Error types for the geotide-signal crate.

/// Error type for all fallible operations in the geotide-signal crate.
///
/// Covers input validation failures and numerical breakdowns of the
/// least-squares and spectral estimators.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignalError {
    /// Returned when two paired arrays differ in length.
    #[error("length mismatch: {what} has {got} samples, expected {expected}")]
    LengthMismatch {
        /// Name of the offending array.
        what: &'static str,
        /// Length of the reference array.
        expected: usize,
        /// Length of the offending array.
        got: usize,
    },

    /// Returned when the input series is shorter than the minimum required length.
    #[error("series too short: got {len} observations, need at least {min}")]
    SeriesTooShort {
        /// Number of observations provided.
        len: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("{what} contains non-finite values")]
    NonFiniteData {
        /// Name of the offending array.
        what: &'static str,
    },

    /// Returned when the time axis is not sorted in increasing order.
    #[error("time axis is not increasing at index {index}")]
    NonMonotonicTime {
        /// First index whose time is not greater than its predecessor.
        index: usize,
    },

    /// Returned when the sampling interval is not constant.
    #[error("irregular sampling: time steps range from {min_step} to {max_step} days")]
    IrregularSampling {
        /// Smallest time step (days).
        min_step: f64,
        /// Largest time step (days).
        max_step: f64,
    },

    /// Returned when the record is too short in time for the estimator.
    #[error("record spans {span_days:.3} days, need at least {min_days} days")]
    InsufficientDuration {
        /// Span of the record (days).
        span_days: f64,
        /// Minimum span required (days).
        min_days: f64,
    },

    /// Returned when a series has no variance to normalise by.
    #[error("{what} has zero variance")]
    ZeroVariance {
        /// Name of the offending array.
        what: &'static str,
    },

    /// Returned when configuration parameters are invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned when the least-squares solve breaks down.
    #[error("least-squares solve failed: {0}")]
    SolveFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_length_mismatch() {
        let err = SignalError::LengthMismatch {
            what: "values",
            expected: 10,
            got: 9,
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: values has 9 samples, expected 10"
        );
    }

    #[test]
    fn error_series_too_short() {
        let err = SignalError::SeriesTooShort { len: 1, min: 2 };
        assert_eq!(
            err.to_string(),
            "series too short: got 1 observations, need at least 2"
        );
    }

    #[test]
    fn error_non_finite_data() {
        let err = SignalError::NonFiniteData { what: "values" };
        assert_eq!(err.to_string(), "values contains non-finite values");
    }

    #[test]
    fn error_non_monotonic_time() {
        let err = SignalError::NonMonotonicTime { index: 4 };
        assert_eq!(err.to_string(), "time axis is not increasing at index 4");
    }

    #[test]
    fn error_irregular_sampling() {
        let err = SignalError::IrregularSampling {
            min_step: 0.5,
            max_step: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "irregular sampling: time steps range from 0.5 to 1 days"
        );
    }

    #[test]
    fn error_insufficient_duration() {
        let err = SignalError::InsufficientDuration {
            span_days: 12.5,
            min_days: 20.0,
        };
        assert_eq!(
            err.to_string(),
            "record spans 12.500 days, need at least 20 days"
        );
    }

    #[test]
    fn error_zero_variance() {
        let err = SignalError::ZeroVariance { what: "x" };
        assert_eq!(err.to_string(), "x has zero variance");
    }

    #[test]
    fn error_invalid_config() {
        let err = SignalError::InvalidConfig("window must be > 0".into());
        assert_eq!(err.to_string(), "invalid configuration: window must be > 0");
    }

    #[test]
    fn error_solve_failed() {
        let err = SignalError::SolveFailed("SVD did not converge".into());
        assert_eq!(
            err.to_string(),
            "least-squares solve failed: SVD did not converge"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SignalError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SignalError>();
    }
}
