//! Observed strain response and the model families that explain it.

use std::fmt;

use geotide_signal::NANOSTRAIN;
use num_complex::Complex64;
use serde::Serialize;

use crate::error::HydraulicError;

/// Analytical well-response model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HydraulicModel {
    /// Hsieh et al. (1987): horizontal flow to a confined well, phase lag.
    Hsieh,
    /// Wang (2000): vertical flow to the water table, phase lead.
    Wang,
}

impl HydraulicModel {
    /// Whether `phase_deg` lies in this model's regime.
    ///
    /// Hsieh accepts `phase_deg <= boundary_deg` and Wang the rest. With the
    /// default 0° boundary Hsieh therefore rejects small positive shifts
    /// (0° to 1°) that the published 1° tolerance would admit; pass
    /// `boundary_deg = 1.0` to restore that tolerance, which moves the same
    /// band out of Wang's regime.
    pub fn accepts(self, phase_deg: f64, boundary_deg: f64) -> bool {
        match self {
            Self::Hsieh => phase_deg <= boundary_deg,
            Self::Wang => phase_deg > boundary_deg,
        }
    }

    /// The model whose regime contains `phase_deg`.
    pub fn for_phase(phase_deg: f64, boundary_deg: f64) -> Self {
        if Self::Hsieh.accepts(phase_deg, boundary_deg) {
            Self::Hsieh
        } else {
            Self::Wang
        }
    }

    pub(crate) fn require_regime(
        self,
        phase_deg: f64,
        boundary_deg: f64,
    ) -> Result<(), HydraulicError> {
        if self.accepts(phase_deg, boundary_deg) {
            Ok(())
        } else {
            Err(HydraulicError::PhaseOutOfRange {
                model: self,
                phase_deg,
                boundary_deg,
            })
        }
    }
}

impl fmt::Display for HydraulicModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hsieh => f.write_str("hsieh"),
            Self::Wang => f.write_str("wang"),
        }
    }
}

/// Amplitude ratio and phase shift predicted by a model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ModelResponse {
    /// Head amplitude relative to the undamped response (-).
    pub amplitude_ratio: f64,
    /// Phase of head relative to Earth tide (radians).
    pub phase_shift: f64,
}

/// Head response to Earth-tide strain at M2.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StrainResponse {
    amplitude: f64,
    phase_shift: f64,
}

impl StrainResponse {
    /// `A_str = |GW / (ET·1e-9)|` and `dφ = arg(GW / ET)`, with ET in
    /// nanostrain and GW in metres.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`HydraulicError::NonFiniteComponent`] | a component is NaN or infinite |
    /// | [`HydraulicError::ZeroEarthTide`] | `et_m2 == 0` |
    pub fn new(et_m2: Complex64, gw_m2: Complex64) -> Result<Self, HydraulicError> {
        if !(et_m2.re.is_finite() && et_m2.im.is_finite()) {
            return Err(HydraulicError::NonFiniteComponent { what: "earth tide" });
        }
        if !(gw_m2.re.is_finite() && gw_m2.im.is_finite()) {
            return Err(HydraulicError::NonFiniteComponent { what: "head" });
        }
        if et_m2.norm() == 0.0 {
            return Err(HydraulicError::ZeroEarthTide);
        }
        let ratio = gw_m2 / et_m2;
        Ok(Self {
            amplitude: ratio.norm() / NANOSTRAIN,
            phase_shift: ratio.arg(),
        })
    }

    /// Amplitude strain response `A_str` (m per unit strain).
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Phase shift `dφ` (radians).
    pub fn phase_shift(&self) -> f64 {
        self.phase_shift
    }

    /// Phase shift `dφ` (degrees).
    pub fn phase_shift_deg(&self) -> f64 {
        self.phase_shift.to_degrees()
    }

    /// `[A_str·Ss − Ar, dφ − dφ_model]`.
    pub fn residuals(&self, specific_storage: f64, model: ModelResponse) -> [f64; 2] {
        [
            self.amplitude * specific_storage - model.amplitude_ratio,
            self.phase_shift - model.phase_shift,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn regimes_are_complementary() {
        for phase in [-10.0, -1.0, 0.0, 1e-9, 0.5, 1.0, 30.0] {
            for boundary in [0.0, 1.0] {
                let hsieh = HydraulicModel::Hsieh.accepts(phase, boundary);
                let wang = HydraulicModel::Wang.accepts(phase, boundary);
                assert!(hsieh ^ wang, "phase {phase}, boundary {boundary}");
            }
        }
        assert_eq!(HydraulicModel::for_phase(0.0, 0.0), HydraulicModel::Hsieh);
        assert_eq!(HydraulicModel::for_phase(0.1, 0.0), HydraulicModel::Wang);
    }

    #[test]
    fn small_lag_band_follows_boundary() {
        assert!(!HydraulicModel::Hsieh.accepts(0.5, 0.0));
        assert!(HydraulicModel::Wang.accepts(0.5, 0.0));
        assert!(HydraulicModel::Hsieh.accepts(0.5, 1.0));
        assert!(!HydraulicModel::Wang.accepts(0.5, 1.0));
        assert_eq!(HydraulicModel::for_phase(1.0, 1.0), HydraulicModel::Hsieh);
    }

    #[test]
    fn strain_response_from_components() {
        let et = Complex64::new(10.0, 0.0);
        let gw = Complex64::from_polar(0.001, -0.2);
        let response = StrainResponse::new(et, gw).unwrap();
        assert_relative_eq!(response.amplitude(), 1e5, max_relative = 1e-12);
        assert_relative_eq!(response.phase_shift(), -0.2, epsilon = 1e-12);
    }

    #[test]
    fn zero_earth_tide_rejected() {
        let err = StrainResponse::new(Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, HydraulicError::ZeroEarthTide));
    }

    #[test]
    fn out_of_regime_is_recoverable_error() {
        let err = HydraulicModel::Hsieh.require_regime(2.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            HydraulicError::PhaseOutOfRange {
                model: HydraulicModel::Hsieh,
                ..
            }
        ));
    }
}
