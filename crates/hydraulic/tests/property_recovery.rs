//! Integration tests for geotide-hydraulic: recover K and Ss from responses
//! generated by the forward models.

use approx::assert_relative_eq;
use geotide_hydraulic::{
    HydraulicConfig, HydraulicModel, PropertyFit, WellGeometry, estimate_properties, hsieh,
    hsieh_response, wang, wang_response,
};
use geotide_signal::{M2, NANOSTRAIN, SECONDS_PER_DAY};
use num_complex::Complex64;

const ET_M2: f64 = 10.0;

/// Head M2 component implied by a model response at `(K, Ss)`.
fn head_component(amplitude_ratio: f64, phase_shift: f64, specific_storage: f64) -> Complex64 {
    let amplitude = amplitude_ratio / specific_storage * NANOSTRAIN * ET_M2;
    Complex64::from_polar(amplitude, phase_shift)
}

fn converged(fit: PropertyFit) -> geotide_hydraulic::PhysicalEstimate {
    match fit {
        PropertyFit::Converged(estimate) => estimate,
        PropertyFit::NotConverged { reason, .. } => panic!("not converged: {reason}"),
    }
}

#[test]
fn hsieh_recovers_properties() {
    let well = WellGeometry::new()
        .with_casing_radius(0.1)
        .with_screen_radius(0.1)
        .with_screen_length(10.0);
    let k = 0.1 / SECONDS_PER_DAY;
    let ss = 1e-5;
    let response = hsieh_response(k, ss, &well, M2);
    let gw = head_component(response.amplitude_ratio, response.phase_shift, ss);

    let estimate = converged(
        hsieh(Complex64::new(ET_M2, 0.0), gw, &well, &HydraulicConfig::new()).unwrap(),
    );
    assert_eq!(estimate.model(), HydraulicModel::Hsieh);
    assert_relative_eq!(estimate.hydraulic_conductivity(), k, max_relative = 0.01);
    assert_relative_eq!(estimate.specific_storage(), ss, max_relative = 0.01);
    assert_relative_eq!(
        estimate.amplitude_ratio(),
        response.amplitude_ratio,
        max_relative = 0.01
    );
    let [amp_residual, phase_residual] = estimate.residuals();
    assert!(amp_residual.abs() < 1e-4 && phase_residual.abs() < 1e-4);
    assert_eq!(estimate.well(), &well);
}

#[test]
fn wang_recovers_properties() {
    let well = WellGeometry::new().with_screen_depth(20.0);
    let k = 1e-7;
    let ss = 1e-5;
    let response = wang_response(k, ss, &well, M2);
    let gw = head_component(response.amplitude_ratio, response.phase_shift, ss);

    let estimate = converged(
        wang(Complex64::new(ET_M2, 0.0), gw, &well, &HydraulicConfig::new()).unwrap(),
    );
    assert_eq!(estimate.model(), HydraulicModel::Wang);
    assert_relative_eq!(
        estimate.strain_response().amplitude(),
        103654.38792356859,
        max_relative = 1e-9
    );
    assert_relative_eq!(estimate.hydraulic_conductivity(), k, max_relative = 0.01);
    assert_relative_eq!(estimate.specific_storage(), ss, max_relative = 0.01);
}

#[test]
fn dispatch_follows_phase_sign() {
    let well = WellGeometry::new().with_screen_length(10.0);
    let et = Complex64::new(ET_M2, 0.0);
    let config = HydraulicConfig::new();

    let lag = hsieh_response(0.1 / SECONDS_PER_DAY, 1e-5, &well, M2);
    let gw = head_component(lag.amplitude_ratio, lag.phase_shift, 1e-5);
    let fit = estimate_properties(et, gw, &well, &config).unwrap();
    assert_eq!(fit.estimate().map(|e| e.model()), Some(HydraulicModel::Hsieh));

    let lead = wang_response(1e-7, 1e-5, &well, M2);
    let gw = head_component(lead.amplitude_ratio, lead.phase_shift, 1e-5);
    let fit = estimate_properties(et, gw, &well, &config).unwrap();
    assert_eq!(fit.estimate().map(|e| e.model()), Some(HydraulicModel::Wang));
}

#[test]
fn models_never_share_an_input() {
    let well = WellGeometry::new();
    let config = HydraulicConfig::new();
    let et = Complex64::new(ET_M2, 0.0);
    for phase in [-0.3, -0.01, 0.0, 0.01, 0.3] {
        let gw = Complex64::from_polar(1e-3, phase);
        let h = hsieh(et, gw, &well, &config).is_ok();
        let w = wang(et, gw, &well, &config).is_ok();
        assert!(h ^ w, "phase {phase}");
    }
}
