//! Hsieh et al. (1987): horizontal flow between aquifer and well.

use std::f64::consts::{SQRT_2, TAU};

use geotide_signal::SECONDS_PER_DAY;
use num_complex::Complex64;

use crate::config::HydraulicConfig;
use crate::error::HydraulicError;
use crate::estimate::{LogSpaceFit, PropertyFit};
use crate::kelvin::{Kelvin, kelvin};
use crate::model::{HydraulicModel, ModelResponse, StrainResponse};
use crate::well::WellGeometry;

/// Search starts at K = 1e-4 m/s, Ss = 1e-4 1/m.
const START: [f64; 2] = [-4.0, -4.0];

/// Amplitude ratio and phase lag of a well screened in a confined aquifer.
///
/// `hydraulic_conductivity` is in m/s and `frequency` in cycles/day. The
/// model uses the screen radius for the aquifer-facing flow and the casing
/// radius for the storage in the well bore.
pub fn hsieh_response(
    hydraulic_conductivity: f64,
    specific_storage: f64,
    well: &WellGeometry,
    frequency: f64,
) -> ModelResponse {
    // Evaluated in days.
    let k = hydraulic_conductivity * SECONDS_PER_DAY;
    let omega = TAU * frequency;
    let diffusivity = k / specific_storage;
    let transmissivity = k * well.screen_length();
    let alpha = well.screen_radius() * (omega / diffusivity).sqrt();

    let Kelvin {
        ker0,
        kei0,
        ker1,
        kei1,
    } = kelvin(alpha);
    let denominator = SQRT_2 * alpha * (ker1 * ker1 + kei1 * kei1);
    let psi = -(ker1 - kei1) / denominator;
    let phi = -(ker1 + kei1) / denominator;

    let scale = omega * well.casing_radius().powi(2) / (2.0 * transmissivity);
    let e = 1.0 - scale * (psi * ker0 + phi * kei0);
    let f = scale * (phi * ker0 - psi * kei0);
    ModelResponse {
        amplitude_ratio: (e * e + f * f).powf(-0.5),
        phase_shift: -(f / e).atan(),
    }
}

/// Fits K and Ss to the M2 head/Earth-tide response with the Hsieh model.
///
/// `et_m2` is in nanostrain and `gw_m2` in metres.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`HydraulicError::PhaseOutOfRange`] | phase shift above the configured boundary |
/// | [`HydraulicError::ZeroEarthTide`] | `et_m2 == 0` |
/// | [`HydraulicError::NonFiniteComponent`] | a component is NaN or infinite |
/// | [`HydraulicError::InvalidGeometry`] | a well dimension is not positive |
/// | [`HydraulicError::InvalidConfig`] | invalid solver settings |
/// | [`HydraulicError::Solver`] | the optimiser could not run |
#[tracing::instrument(skip_all, fields(model = "hsieh"))]
pub fn hsieh(
    et_m2: Complex64,
    gw_m2: Complex64,
    well: &WellGeometry,
    config: &HydraulicConfig,
) -> Result<PropertyFit, HydraulicError> {
    config.validate()?;
    well.validate()?;
    let response = StrainResponse::new(et_m2, gw_m2)?;
    HydraulicModel::Hsieh.require_regime(response.phase_shift_deg(), config.phase_boundary_deg())?;

    let frequency = config.frequency();
    let forward = |k: f64, ss: f64| hsieh_response(k, ss, well, frequency);
    LogSpaceFit {
        model: HydraulicModel::Hsieh,
        response,
        well: *well,
        start: START,
        bounds: None,
        forward: &forward,
    }
    .run(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geotide_signal::M2;

    #[test]
    fn forward_model_reference_point() {
        let well = WellGeometry::new()
            .with_casing_radius(0.1)
            .with_screen_radius(0.1)
            .with_screen_length(10.0);
        let response = hsieh_response(0.1 / SECONDS_PER_DAY, 1e-5, &well, M2);
        assert_relative_eq!(response.amplitude_ratio, 0.9051670325568568, max_relative = 1e-9);
        assert_relative_eq!(response.phase_shift, -0.3229301335252816, max_relative = 1e-9);
    }

    #[test]
    fn wider_casing_damps_more() {
        let narrow = WellGeometry::new().with_screen_length(10.0);
        let wide = narrow.with_casing_radius(0.2);
        let a = hsieh_response(1e-6, 1e-5, &narrow, M2);
        let b = hsieh_response(1e-6, 1e-5, &wide, M2);
        assert!(b.amplitude_ratio < a.amplitude_ratio);
        assert!(b.phase_shift < a.phase_shift);
    }

    #[test]
    fn positive_phase_rejected() {
        let err = hsieh(
            Complex64::new(10.0, 0.0),
            Complex64::from_polar(1e-3, 0.05),
            &WellGeometry::new(),
            &HydraulicConfig::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            HydraulicError::PhaseOutOfRange {
                model: HydraulicModel::Hsieh,
                ..
            }
        ));
    }
}
