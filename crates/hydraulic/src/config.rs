//! Solver and regime settings for the K/Ss estimators.

use geotide_signal::M2;

use crate::error::HydraulicError;

/// Configuration shared by the Hsieh and Wang estimators.
///
/// The phase boundary splits the two models' regimes: Hsieh accepts phase
/// shifts at or below it and Wang accepts those above it, so no input is
/// valid for both.
///
/// # Example
///
/// ```
/// use geotide_hydraulic::HydraulicConfig;
///
/// let config = HydraulicConfig::new()
///     .with_max_iterations(5_000)
///     .with_sd_tolerance(1e-14);
/// assert_eq!(config.phase_boundary_deg(), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HydraulicConfig {
    /// M2 frequency in cycles per day.
    frequency: f64,
    /// Regime boundary in degrees.
    phase_boundary_deg: f64,
    max_iterations: u64,
    /// Nelder-Mead stops once the simplex cost spread falls below this.
    sd_tolerance: f64,
    /// Edge length of the initial simplex in log10 units.
    simplex_step: f64,
}

impl HydraulicConfig {
    /// Defaults: M2 frequency, 0° boundary, 2000 iterations, tolerance
    /// 1e-12, simplex step 0.5.
    pub fn new() -> Self {
        Self {
            frequency: M2,
            phase_boundary_deg: 0.0,
            max_iterations: 2_000,
            sd_tolerance: 1e-12,
            simplex_step: 0.5,
        }
    }

    /// Sets the tidal frequency (cycles/day) the models are evaluated at.
    pub fn with_frequency(mut self, cycles_per_day: f64) -> Self {
        self.frequency = cycles_per_day;
        self
    }

    /// Sets the phase shift (degrees) separating the Hsieh and Wang regimes.
    pub fn with_phase_boundary_deg(mut self, degrees: f64) -> Self {
        self.phase_boundary_deg = degrees;
        self
    }

    /// Sets the Nelder-Mead iteration cap.
    pub fn with_max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the simplex cost-spread tolerance.
    pub fn with_sd_tolerance(mut self, tolerance: f64) -> Self {
        self.sd_tolerance = tolerance;
        self
    }

    /// Sets the initial simplex edge length (log10 units).
    pub fn with_simplex_step(mut self, step: f64) -> Self {
        self.simplex_step = step;
        self
    }

    /// Returns the tidal frequency (cycles/day).
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Returns the regime boundary (degrees).
    pub fn phase_boundary_deg(&self) -> f64 {
        self.phase_boundary_deg
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    pub fn sd_tolerance(&self) -> f64 {
        self.sd_tolerance
    }

    pub fn simplex_step(&self) -> f64 {
        self.simplex_step
    }

    pub(crate) fn validate(&self) -> Result<(), HydraulicError> {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(HydraulicError::InvalidConfig(format!(
                "frequency must be finite and > 0, got {}",
                self.frequency
            )));
        }
        if !self.phase_boundary_deg.is_finite() {
            return Err(HydraulicError::InvalidConfig(
                "phase boundary must be finite".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(HydraulicError::InvalidConfig(
                "max_iterations must be > 0".into(),
            ));
        }
        if !(self.sd_tolerance.is_finite() && self.sd_tolerance > 0.0) {
            return Err(HydraulicError::InvalidConfig(format!(
                "sd_tolerance must be finite and > 0, got {}",
                self.sd_tolerance
            )));
        }
        if !(self.simplex_step.is_finite() && self.simplex_step > 0.0) {
            return Err(HydraulicError::InvalidConfig(format!(
                "simplex_step must be finite and > 0, got {}",
                self.simplex_step
            )));
        }
        Ok(())
    }
}

impl Default for HydraulicConfig {
    fn default() -> Self {
        Self::new()
    }
}
