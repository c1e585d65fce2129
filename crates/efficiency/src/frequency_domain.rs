//! Frequency-domain barometric efficiency from M2 and S2 tidal components.
//!
//! Both estimators separate the Earth-tide part of the head S2 component
//! from the atmospheric part by scaling the head/Earth-tide ratio observed
//! at M2, where atmospheric forcing is absent.

use geotide_signal::{Advisory, FrequencyComponent, M2, Outcome, S2};
use num_complex::Complex64;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::EfficiencyError;

/// Degrees of M2 phase shift beyond which an undamped response is doubtful.
const DAMPING_PHASE_LIMIT_DEG: f64 = 5.0;

/// Frequency tolerance used when a component carries no name (cycles/day).
const FREQUENCY_TOLERANCE: f64 = 1e-6;

/// The five complex tidal components the frequency-domain estimators need.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TidalComponents {
    bp_s2: Complex64,
    et_m2: Complex64,
    et_s2: Complex64,
    gw_m2: Complex64,
    gw_s2: Complex64,
}

impl TidalComponents {
    /// Builds the set from explicit complex amplitudes.
    pub fn new(
        bp_s2: Complex64,
        et_m2: Complex64,
        et_s2: Complex64,
        gw_m2: Complex64,
        gw_s2: Complex64,
    ) -> Self {
        Self {
            bp_s2,
            et_m2,
            et_s2,
            gw_m2,
            gw_s2,
        }
    }

    /// Picks M2 and S2 out of per-channel component lists, such as the
    /// output of HALS or [`Spectrum::components`](geotide_signal::Spectrum::components).
    ///
    /// Components are matched by name first, then by frequency.
    ///
    /// # Errors
    ///
    /// Returns [`EfficiencyError::MissingConstituent`] when a channel lacks
    /// the constituent it must provide.
    pub fn from_components(
        barometric: &[FrequencyComponent],
        earth_tide: &[FrequencyComponent],
        head: &[FrequencyComponent],
    ) -> Result<Self, EfficiencyError> {
        Ok(Self {
            bp_s2: find(barometric, "barometric pressure", "S2", S2)?,
            et_m2: find(earth_tide, "earth tide", "M2", M2)?,
            et_s2: find(earth_tide, "earth tide", "S2", S2)?,
            gw_m2: find(head, "head", "M2", M2)?,
            gw_s2: find(head, "head", "S2", S2)?,
        })
    }

    /// Barometric pressure at S2.
    pub fn bp_s2(&self) -> Complex64 {
        self.bp_s2
    }

    /// Earth tide at M2.
    pub fn et_m2(&self) -> Complex64 {
        self.et_m2
    }

    /// Earth tide at S2.
    pub fn et_s2(&self) -> Complex64 {
        self.et_s2
    }

    /// Head at M2.
    pub fn gw_m2(&self) -> Complex64 {
        self.gw_m2
    }

    /// Head at S2.
    pub fn gw_s2(&self) -> Complex64 {
        self.gw_s2
    }

    fn require_nonzero(&self) -> Result<(), EfficiencyError> {
        if self.bp_s2.norm() == 0.0 {
            return Err(EfficiencyError::ZeroComponent { what: "BP S2" });
        }
        if self.et_m2.norm() == 0.0 {
            return Err(EfficiencyError::ZeroComponent { what: "ET M2" });
        }
        Ok(())
    }
}

fn find(
    components: &[FrequencyComponent],
    channel: &'static str,
    constituent: &'static str,
    frequency: f64,
) -> Result<Complex64, EfficiencyError> {
    components
        .iter()
        .find(|c| c.name() == Some(constituent))
        .or_else(|| {
            components
                .iter()
                .find(|c| (c.frequency() - frequency).abs() < FREQUENCY_TOLERANCE)
        })
        .map(FrequencyComponent::value)
        .ok_or(EfficiencyError::MissingConstituent {
            channel,
            constituent,
        })
}

/// Rau et al. (2018):
///
/// ```text
/// GW_ET_S2 = (GW_M2 / ET_M2) · ET_S2
/// GW_AT_S2 = GW_S2 − GW_ET_S2
/// BE       = |GW_AT_S2 / BP_S2| / amplitude_ratio
/// ```
///
/// With `amplitude_ratio == 1` the well is assumed undamped; when the M2
/// phase of head relative to Earth tide then exceeds 5° the result carries
/// [`Advisory::AmplitudeDamping`].
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`EfficiencyError::InvalidAmplitudeRatio`] | `amplitude_ratio` not finite and positive |
/// | [`EfficiencyError::ZeroComponent`] | BP S2 or ET M2 is zero |
pub fn rau(
    components: &TidalComponents,
    amplitude_ratio: f64,
) -> Result<Outcome<f64>, EfficiencyError> {
    if !amplitude_ratio.is_finite() || amplitude_ratio <= 0.0 {
        return Err(EfficiencyError::InvalidAmplitudeRatio(amplitude_ratio));
    }
    components.require_nonzero()?;

    let ratio_m2 = components.gw_m2 / components.et_m2;
    let gw_et_s2 = ratio_m2 * components.et_s2;
    let gw_at_s2 = components.gw_s2 - gw_et_s2;
    let be = (gw_at_s2 / components.bp_s2).norm() / amplitude_ratio;

    let mut advisories = Vec::new();
    let phase_shift_deg = ratio_m2.arg().to_degrees();
    if amplitude_ratio == 1.0 && phase_shift_deg.abs() > DAMPING_PHASE_LIMIT_DEG {
        warn!(phase_shift_deg, "M2 phase shift suggests amplitude damping");
        advisories.push(Advisory::AmplitudeDamping { phase_shift_deg });
    }
    info!(be, amplitude_ratio, "rau barometric efficiency");
    Ok(Outcome::new(be, advisories))
}

/// Acworth et al. (2016):
///
/// ```text
/// BE = (|GW_S2| + |ET_S2|·cos(φ_BP_S2 − φ_ET_S2)·|GW_M2|/|ET_M2|) / |BP_S2|
/// ```
///
/// Attaches [`Advisory::EarthTideDominated`] when `|GW_M2| > |GW_S2|`.
///
/// # Errors
///
/// Returns [`EfficiencyError::ZeroComponent`] when BP S2 or ET M2 is zero.
pub fn acworth(components: &TidalComponents) -> Result<Outcome<f64>, EfficiencyError> {
    components.require_nonzero()?;
    let c = components;

    let phase_gap = c.bp_s2.arg() - c.et_s2.arg();
    let be = (c.gw_s2.norm() + c.et_s2.norm() * phase_gap.cos() * c.gw_m2.norm() / c.et_m2.norm())
        / c.bp_s2.norm();

    let mut advisories = Vec::new();
    if c.gw_m2.norm() > c.gw_s2.norm() {
        warn!(
            gw_m2 = c.gw_m2.norm(),
            gw_s2 = c.gw_s2.norm(),
            "head M2 exceeds S2; Earth tides may bias the estimate"
        );
        advisories.push(Advisory::EarthTideDominated {
            gw_m2_amplitude: c.gw_m2.norm(),
            gw_s2_amplitude: c.gw_s2.norm(),
        });
    }
    info!(be, "acworth barometric efficiency");
    Ok(Outcome::new(be, advisories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Head built from a known BE and a small M2 phase lag.
    fn synthetic(be: f64, lag_rad: f64) -> TidalComponents {
        let et_m2 = Complex64::new(10.0, 0.0);
        let et_s2 = Complex64::from_polar(4.0, 0.3);
        let bp_s2 = Complex64::from_polar(0.5, 1.0);
        let ratio = Complex64::from_polar(0.002, lag_rad);
        let gw_m2 = ratio * et_m2;
        let gw_s2 = ratio * et_s2 - be * bp_s2;
        TidalComponents::new(bp_s2, et_m2, et_s2, gw_m2, gw_s2)
    }

    #[test]
    fn rau_recovers_efficiency() {
        let outcome = rau(&synthetic(0.3, 0.02), 1.0).unwrap();
        assert!(outcome.is_clean());
        assert_relative_eq!(*outcome.value(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn rau_applies_amplitude_ratio() {
        let outcome = rau(&synthetic(0.3, 0.02), 0.5).unwrap();
        assert_relative_eq!(*outcome.value(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn rau_flags_large_phase_shift() {
        let components = synthetic(0.3, 10f64.to_radians());
        let outcome = rau(&components, 1.0).unwrap();
        match outcome.advisories() {
            [Advisory::AmplitudeDamping { phase_shift_deg }] => {
                assert_relative_eq!(*phase_shift_deg, 10.0, epsilon = 1e-9);
            }
            other => panic!("unexpected advisories: {other:?}"),
        }
        // A supplied damping factor silences the advisory.
        assert!(rau(&components, 0.9).unwrap().is_clean());
    }

    #[test]
    fn rau_rejects_bad_ratio() {
        let err = rau(&synthetic(0.3, 0.0), 0.0).unwrap_err();
        assert!(matches!(err, EfficiencyError::InvalidAmplitudeRatio(_)));
    }

    #[test]
    fn acworth_formula() {
        let components = TidalComponents::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(4.0, 0.0),
            Complex64::from_polar(2.0, std::f64::consts::FRAC_PI_3),
            Complex64::new(0.1, 0.0),
            Complex64::new(0.5, 0.0),
        );
        let outcome = acworth(&components).unwrap();
        assert!(outcome.is_clean());
        assert_relative_eq!(*outcome.value(), 0.525, epsilon = 1e-12);
    }

    #[test]
    fn acworth_flags_earth_tide_dominance() {
        let components = TidalComponents::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(4.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(0.6, 0.0),
            Complex64::new(0.5, 0.0),
        );
        let outcome = acworth(&components).unwrap();
        assert!(matches!(
            outcome.advisories(),
            [Advisory::EarthTideDominated { .. }]
        ));
    }

    #[test]
    fn zero_pressure_component_rejected() {
        let components = TidalComponents::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(4.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(0.1, 0.0),
            Complex64::new(0.5, 0.0),
        );
        assert!(matches!(
            acworth(&components).unwrap_err(),
            EfficiencyError::ZeroComponent { what: "BP S2" }
        ));
    }

    #[test]
    fn from_components_matches_name_then_frequency() {
        let bp = [FrequencyComponent::new(S2, Complex64::new(1.0, 0.0))];
        let et = [
            FrequencyComponent::new(M2, Complex64::new(4.0, 0.0)).with_name("M2"),
            FrequencyComponent::new(S2, Complex64::new(2.0, 0.0)).with_name("S2"),
        ];
        let gw = [
            FrequencyComponent::new(M2, Complex64::new(0.1, 0.0)),
            FrequencyComponent::new(S2, Complex64::new(0.5, 0.0)),
        ];
        let components = TidalComponents::from_components(&bp, &et, &gw).unwrap();
        assert_eq!(components.et_m2(), Complex64::new(4.0, 0.0));
        assert_eq!(components.gw_s2(), Complex64::new(0.5, 0.0));

        let err = TidalComponents::from_components(&bp, &et[..1], &gw).unwrap_err();
        assert!(matches!(
            err,
            EfficiencyError::MissingConstituent {
                channel: "earth tide",
                constituent: "S2"
            }
        ));
    }
}
