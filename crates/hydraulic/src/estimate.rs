//! Nelder-Mead fitting of (K, Ss) and the estimate records it produces.

use argmin::core::{CostFunction, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;
use num_complex::Complex64;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::HydraulicConfig;
use crate::error::HydraulicError;
use crate::model::{HydraulicModel, ModelResponse, StrainResponse};
use crate::well::WellGeometry;
use crate::{hsieh, wang};

/// Weight of the squared distance outside the search box.
const PENALTY_WEIGHT: f64 = 1e3;

/// Fitted aquifer properties.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhysicalEstimate {
    model: HydraulicModel,
    hydraulic_conductivity: f64,
    specific_storage: f64,
    strain_response: StrainResponse,
    amplitude_ratio: f64,
    residuals: [f64; 2],
    iterations: u64,
    well: WellGeometry,
}

impl PhysicalEstimate {
    /// Model that produced the estimate.
    pub fn model(&self) -> HydraulicModel {
        self.model
    }

    /// Hydraulic conductivity `K` (m/s).
    pub fn hydraulic_conductivity(&self) -> f64 {
        self.hydraulic_conductivity
    }

    /// Specific storage `Ss` (1/m).
    pub fn specific_storage(&self) -> f64 {
        self.specific_storage
    }

    /// Observed amplitude response and phase shift.
    pub fn strain_response(&self) -> &StrainResponse {
        &self.strain_response
    }

    /// `A_str·Ss`, the amplitude ratio implied by the fit.
    pub fn amplitude_ratio(&self) -> f64 {
        self.amplitude_ratio
    }

    /// Amplitude and phase residuals at the optimum.
    pub fn residuals(&self) -> [f64; 2] {
        self.residuals
    }

    /// Nelder-Mead iterations used.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Well geometry the model was evaluated with.
    pub fn well(&self) -> &WellGeometry {
        &self.well
    }
}

/// Result of a K/Ss fit.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[must_use]
pub enum PropertyFit {
    /// The solver converged.
    Converged(PhysicalEstimate),
    /// The solver stopped without converging; no estimate is reported.
    NotConverged {
        /// Model that was being fitted.
        model: HydraulicModel,
        /// Termination status reported by the solver.
        reason: String,
        /// Iterations used.
        iterations: u64,
    },
}

impl PropertyFit {
    /// The estimate, if the fit converged.
    pub fn estimate(&self) -> Option<&PhysicalEstimate> {
        match self {
            Self::Converged(estimate) => Some(estimate),
            Self::NotConverged { .. } => None,
        }
    }

    /// Returns `true` if the fit converged.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged(_))
    }
}

/// Fits K and Ss with whichever model's phase regime contains the observed
/// phase shift.
///
/// # Errors
///
/// Same as [`hsieh::hsieh`] and [`wang::wang`], except that
/// [`HydraulicError::PhaseOutOfRange`] cannot occur.
pub fn estimate_properties(
    et_m2: Complex64,
    gw_m2: Complex64,
    well: &WellGeometry,
    config: &HydraulicConfig,
) -> Result<PropertyFit, HydraulicError> {
    let response = StrainResponse::new(et_m2, gw_m2)?;
    let model = HydraulicModel::for_phase(response.phase_shift_deg(), config.phase_boundary_deg());
    info!(
        %model,
        phase_deg = response.phase_shift_deg(),
        "selected model by phase regime"
    );
    match model {
        HydraulicModel::Hsieh => hsieh::hsieh(et_m2, gw_m2, well, config),
        HydraulicModel::Wang => wang::wang(et_m2, gw_m2, well, config),
    }
}

/// Search problem over `(log10 K, log10 Ss)`.
pub(crate) struct LogSpaceFit<'a, F> {
    pub(crate) model: HydraulicModel,
    pub(crate) response: StrainResponse,
    pub(crate) well: WellGeometry,
    /// Starting point in log10 units.
    pub(crate) start: [f64; 2],
    /// Box applied to both log10 coordinates.
    pub(crate) bounds: Option<(f64, f64)>,
    /// Forward model `(K [m/s], Ss) -> response`.
    pub(crate) forward: &'a F,
}

impl<F> LogSpaceFit<'_, F>
where
    F: Fn(f64, f64) -> ModelResponse,
{
    fn residuals_at(&self, point: [f64; 2]) -> [f64; 2] {
        let k = 10f64.powf(point[0]);
        let ss = 10f64.powf(point[1]);
        self.response.residuals(ss, (self.forward)(k, ss))
    }

    pub(crate) fn run(&self, config: &HydraulicConfig) -> Result<PropertyFit, HydraulicError> {
        let step = config.simplex_step();
        let [k0, s0] = self.start;
        let simplex = vec![vec![k0, s0], vec![k0 - step, s0], vec![k0, s0 - step]];
        let model = self.model;

        let solver = NelderMead::new(simplex)
            .with_sd_tolerance(config.sd_tolerance())
            .map_err(|e| HydraulicError::Solver(e.to_string()))?;
        let result = Executor::new(LogSpaceFit { ..*self }, solver)
            .configure(|state| state.max_iters(config.max_iterations()))
            .run()
            .map_err(|e| HydraulicError::Solver(e.to_string()))?;

        let state = result.state();
        let iterations = state.get_iter();
        let status = state.get_termination_status();
        let converged = matches!(
            status,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        );
        if !converged {
            warn!(%model, iterations, ?status, "solver did not converge");
            return Ok(PropertyFit::NotConverged {
                model,
                reason: format!("{status:?}"),
                iterations,
            });
        }
        let best = state
            .best_param
            .as_ref()
            .ok_or_else(|| HydraulicError::Solver("no best parameter".into()))?;

        let (point, _) = clamp(best, self.bounds);
        let residuals = self.residuals_at(point);
        let hydraulic_conductivity = 10f64.powf(point[0]);
        let specific_storage = 10f64.powf(point[1]);
        info!(
            %model,
            hydraulic_conductivity,
            specific_storage,
            iterations,
            "fitted aquifer properties"
        );
        Ok(PropertyFit::Converged(PhysicalEstimate {
            model,
            hydraulic_conductivity,
            specific_storage,
            strain_response: self.response,
            amplitude_ratio: self.response.amplitude() * specific_storage,
            residuals,
            iterations,
            well: self.well,
        }))
    }
}

/// Clamps a point into the box on both coordinates, returning the squared
/// distance moved.
fn clamp(point: &[f64], bounds: Option<(f64, f64)>) -> ([f64; 2], f64) {
    let mut clamped = [point[0], point[1]];
    let mut distance = 0.0;
    if let Some((lo, hi)) = bounds {
        for v in &mut clamped {
            let inside = v.clamp(lo, hi);
            distance += (*v - inside).powi(2);
            *v = inside;
        }
    }
    (clamped, distance)
}

impl<F> CostFunction for LogSpaceFit<'_, F>
where
    F: Fn(f64, f64) -> ModelResponse,
{
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let (point, outside) = clamp(params, self.bounds);
        let [amplitude, phase] = self.residuals_at(point);
        let cost = amplitude * amplitude + phase * phase + PENALTY_WEIGHT * outside;
        Ok(if cost.is_finite() { cost } else { f64::MAX })
    }
}
