//! Results tagged with non-fatal numerical-quality advisories.

use std::fmt;

use serde::Serialize;

/// A caveat about the numerical quality of an otherwise valid result.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The design matrix is close to singular.
    IllConditioned {
        /// Ratio of largest to smallest singular value.
        condition_number: f64,
    },
    /// The well damps the tidal signal, so an amplitude correction is needed.
    AmplitudeDamping {
        /// Phase of the GW/ET ratio at M2 (degrees).
        phase_shift_deg: f64,
    },
    /// The Earth-tide signal in the head exceeds the atmospheric one.
    EarthTideDominated {
        /// Head amplitude at M2.
        gw_m2_amplitude: f64,
        /// Head amplitude at S2.
        gw_s2_amplitude: f64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllConditioned { condition_number } => write!(
                f,
                "ill-conditioned design matrix (condition number {condition_number:.3e})"
            ),
            Self::AmplitudeDamping { phase_shift_deg } => write!(
                f,
                "M2 phase shift of {phase_shift_deg:.2} degrees suggests amplitude damping; \
                 supply an amplitude ratio"
            ),
            Self::EarthTideDominated {
                gw_m2_amplitude,
                gw_s2_amplitude,
            } => write!(
                f,
                "head M2 amplitude {gw_m2_amplitude:.4e} exceeds S2 amplitude {gw_s2_amplitude:.4e}; \
                 Earth-tide influence may bias the estimate"
            ),
        }
    }
}

/// A successful result, optionally carrying advisories.
///
/// Failures are reported through the crate's `Result` error type, so an
/// `Outcome` is always usable.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[must_use]
pub enum Outcome<T> {
    /// No caveats.
    Clean {
        /// The result.
        value: T,
    },
    /// Valid result with caveats attached.
    Warned {
        /// The result.
        value: T,
        /// The caveats, in the order they were raised.
        advisories: Vec<Advisory>,
    },
}

impl<T> Outcome<T> {
    /// Wraps `value`, tagging it `Warned` when `advisories` is non-empty.
    pub fn new(value: T, advisories: Vec<Advisory>) -> Self {
        if advisories.is_empty() {
            Self::Clean { value }
        } else {
            Self::Warned { value, advisories }
        }
    }

    /// Wraps `value` with no advisories.
    pub fn clean(value: T) -> Self {
        Self::Clean { value }
    }

    /// Borrow the result.
    pub fn value(&self) -> &T {
        match self {
            Self::Clean { value } | Self::Warned { value, .. } => value,
        }
    }

    /// Take the result, discarding advisories.
    pub fn into_value(self) -> T {
        match self {
            Self::Clean { value } | Self::Warned { value, .. } => value,
        }
    }

    /// Advisories attached to the result (empty when clean).
    pub fn advisories(&self) -> &[Advisory] {
        match self {
            Self::Clean { .. } => &[],
            Self::Warned { advisories, .. } => advisories,
        }
    }

    /// Returns `true` if no advisory was raised.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean { .. })
    }

    /// Split into the result and its advisories.
    pub fn into_parts(self) -> (T, Vec<Advisory>) {
        match self {
            Self::Clean { value } => (value, Vec::new()),
            Self::Warned { value, advisories } => (value, advisories),
        }
    }

    /// Transform the result, keeping the advisories.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        let (value, advisories) = self.into_parts();
        Outcome::new(f(value), advisories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_without_advisories_is_clean() {
        let outcome = Outcome::new(1.5, Vec::new());
        assert!(outcome.is_clean());
        assert!(outcome.advisories().is_empty());
        assert_eq!(*outcome.value(), 1.5);
    }

    #[test]
    fn new_with_advisories_is_warned() {
        let outcome = Outcome::new(
            2.0,
            vec![Advisory::IllConditioned {
                condition_number: 1e7,
            }],
        );
        assert!(!outcome.is_clean());
        assert_eq!(outcome.advisories().len(), 1);
        assert_eq!(outcome.into_value(), 2.0);
    }

    #[test]
    fn map_keeps_advisories() {
        let outcome = Outcome::new(
            2,
            vec![Advisory::AmplitudeDamping {
                phase_shift_deg: 8.0,
            }],
        )
        .map(|v| v * 10);
        let (value, advisories) = outcome.into_parts();
        assert_eq!(value, 20);
        assert_eq!(advisories.len(), 1);
    }

    #[test]
    fn advisory_display() {
        let a = Advisory::IllConditioned {
            condition_number: 2.5e6,
        };
        assert_eq!(
            a.to_string(),
            "ill-conditioned design matrix (condition number 2.500e6)"
        );
    }
}
