//! Wang (2000): vertical flow between a screened interval and the water table.

use std::f64::consts::TAU;

use geotide_signal::SECONDS_PER_DAY;
use num_complex::Complex64;

use crate::config::HydraulicConfig;
use crate::error::HydraulicError;
use crate::estimate::{LogSpaceFit, PropertyFit};
use crate::model::{HydraulicModel, ModelResponse, StrainResponse};
use crate::well::WellGeometry;

/// Search starts at K = 0.01 m/s, Ss = 0.01 1/m.
const START: [f64; 2] = [-2.0, -2.0];

/// Both parameters stay within [1e-20, 1e-2] (log10 units).
const BOUNDS: (f64, f64) = (-20.0, -2.0);

/// Amplitude ratio and phase lead for drainage to the water table.
///
/// `hydraulic_conductivity` is in m/s and `frequency` in cycles/day. With
/// `δ = sqrt(2D/ω)` and `r = z/δ`:
///
/// ```text
/// Ar = sqrt(1 − 2·e^{−r}·cos r + e^{−2r})
/// dφ = atan(e^{−r}·sin r / (1 − e^{−r}·cos r))
/// ```
pub fn wang_response(
    hydraulic_conductivity: f64,
    specific_storage: f64,
    well: &WellGeometry,
    frequency: f64,
) -> ModelResponse {
    let omega = TAU * frequency / SECONDS_PER_DAY;
    let diffusivity = hydraulic_conductivity / specific_storage;
    let skin_depth = (2.0 * diffusivity / omega).sqrt();
    let r = well.screen_depth() / skin_depth;
    let decay = (-r).exp();
    ModelResponse {
        amplitude_ratio: (1.0 - 2.0 * decay * r.cos() + decay * decay).sqrt(),
        phase_shift: (decay * r.sin() / (1.0 - decay * r.cos())).atan(),
    }
}

/// Fits K and Ss to the M2 head/Earth-tide response with the Wang model.
///
/// `et_m2` is in nanostrain and `gw_m2` in metres.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`HydraulicError::PhaseOutOfRange`] | phase shift at or below the configured boundary |
/// | [`HydraulicError::ZeroEarthTide`] | `et_m2 == 0` |
/// | [`HydraulicError::NonFiniteComponent`] | a component is NaN or infinite |
/// | [`HydraulicError::InvalidGeometry`] | a well dimension is not positive |
/// | [`HydraulicError::InvalidConfig`] | invalid solver settings |
/// | [`HydraulicError::Solver`] | the optimiser could not run |
#[tracing::instrument(skip_all, fields(model = "wang"))]
pub fn wang(
    et_m2: Complex64,
    gw_m2: Complex64,
    well: &WellGeometry,
    config: &HydraulicConfig,
) -> Result<PropertyFit, HydraulicError> {
    config.validate()?;
    well.validate()?;
    let response = StrainResponse::new(et_m2, gw_m2)?;
    HydraulicModel::Wang.require_regime(response.phase_shift_deg(), config.phase_boundary_deg())?;

    let frequency = config.frequency();
    let forward = |k: f64, ss: f64| wang_response(k, ss, well, frequency);
    LogSpaceFit {
        model: HydraulicModel::Wang,
        response,
        well: *well,
        start: START,
        bounds: Some(BOUNDS),
        forward: &forward,
    }
    .run(config)
}
