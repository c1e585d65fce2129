//! Complex amplitude of a single tidal frequency.

use num_complex::Complex64;
use serde::Serialize;

/// Complex amplitude of one frequency in a record.
///
/// The complex value encodes the harmonic `a·cos(2πft) + b·sin(2πft)` as
/// `a + i·b`: the real part is the cosine coefficient and the imaginary part
/// the sine coefficient. Amplitude is `|value|` and phase is `atan2(b, a)`.
/// Every estimator in this workspace produces and consumes this encoding.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrequencyComponent {
    frequency: f64,
    name: Option<String>,
    value: Complex64,
}

impl FrequencyComponent {
    /// Wraps a complex amplitude already in cosine/sine encoding.
    pub fn new(frequency: f64, value: Complex64) -> Self {
        Self {
            frequency,
            name: None,
            value,
        }
    }

    /// Builds a component from its cosine and sine coefficients.
    pub fn from_coefficients(frequency: f64, cos: f64, sin: f64) -> Self {
        Self::new(frequency, Complex64::new(cos, sin))
    }

    /// Attaches a constituent name such as `"M2"`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Frequency in cycles per day.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Constituent name, if the frequency matched a known constituent.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Complex amplitude `cos + i·sin`.
    pub fn value(&self) -> Complex64 {
        self.value
    }

    /// Cosine coefficient.
    pub fn cos(&self) -> f64 {
        self.value.re
    }

    /// Sine coefficient.
    pub fn sin(&self) -> f64 {
        self.value.im
    }

    /// Amplitude `|value|`.
    pub fn amplitude(&self) -> f64 {
        self.value.norm()
    }

    /// Phase in radians, `atan2(sin, cos)`.
    pub fn phase(&self) -> f64 {
        self.value.arg()
    }

    /// Evaluates the harmonic at time `t` (days).
    pub fn evaluate(&self, t: f64) -> f64 {
        let arg = std::f64::consts::TAU * self.frequency * t;
        self.value.re * arg.cos() + self.value.im * arg.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn cosine_has_zero_phase() {
        let c = FrequencyComponent::from_coefficients(2.0, 3.0, 0.0);
        assert_relative_eq!(c.amplitude(), 3.0);
        assert_relative_eq!(c.phase(), 0.0);
    }

    #[test]
    fn sine_has_quarter_turn_phase() {
        let c = FrequencyComponent::from_coefficients(2.0, 0.0, 1.5);
        assert_relative_eq!(c.amplitude(), 1.5);
        assert_relative_eq!(c.phase(), FRAC_PI_2);
    }

    #[test]
    fn evaluate_matches_coefficients() {
        let c = FrequencyComponent::from_coefficients(1.0, 2.0, -1.0);
        assert_relative_eq!(c.evaluate(0.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(c.evaluate(0.25), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn name_is_optional() {
        let c = FrequencyComponent::from_coefficients(1.932274, 1.0, 0.0);
        assert!(c.name().is_none());
        assert_eq!(c.with_name("M2").name(), Some("M2"));
    }
}
