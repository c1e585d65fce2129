//! Integration tests for geotide-efficiency on synthetic records.

use std::f64::consts::TAU;

use approx::assert_relative_eq;
use geotide_efficiency::{
    BeMethod, TidalComponents, acworth, average_of_ratios, clark, davis_rasmussen,
    linear_regression, median_of_ratios, rahi, rau, rojstaczer,
};
use geotide_signal::{HalsConfig, M2, S2, TimeSeries, WelchConfig, hals};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const BE: f64 = 0.4;

/// Pressure differences and a head response `sign·BE·x` plus noise.
fn differences(n: usize, sign: f64, noise_sd: f64, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let pressure = Normal::new(0.0, 1.0).unwrap();
    let noise = Normal::new(0.0, noise_sd).unwrap();
    let x: Vec<f64> = (0..n).map(|_| pressure.sample(&mut rng)).collect();
    let y = x
        .iter()
        .map(|&v| sign * BE * v + noise.sample(&mut rng))
        .collect();
    (x, y)
}

#[test]
fn ratio_methods_on_exact_response() {
    let (x, y) = differences(500, 1.0, 0.0, 3);
    assert_relative_eq!(average_of_ratios(&x, &y).unwrap(), BE, epsilon = 1e-8);
    assert_relative_eq!(median_of_ratios(&x, &y).unwrap(), BE, epsilon = 1e-8);
    assert_relative_eq!(linear_regression(&x, &y).unwrap(), 1.0 / BE, epsilon = 1e-8);
}

#[test]
fn cumulative_methods_on_noisy_response() {
    let (x, y) = differences(2000, 1.0, 0.01, 5);
    assert_relative_eq!(median_of_ratios(&x, &y).unwrap(), BE, epsilon = 0.01);
    assert_relative_eq!(clark(&x, &y).unwrap(), BE, epsilon = 0.02);
}

#[test]
fn opposite_sign_methods_on_noisy_response() {
    // Rahi and Davis & Rasmussen read a head falling under rising pressure.
    let (x, y) = differences(2000, -1.0, 0.01, 7);
    assert_relative_eq!(rahi(&x, &y).unwrap(), BE, epsilon = 0.02);

    let pressure: Vec<f64> = geotide_stats::cumulative_sum(&x);
    let head: Vec<f64> = geotide_stats::cumulative_sum(&y);
    assert_relative_eq!(davis_rasmussen(&pressure, &head).unwrap(), BE, epsilon = 0.02);
}

#[test]
fn rojstaczer_mean_gain() {
    let (x, y) = differences(4096, 1.0, 0.01, 11);
    let be = rojstaczer(&x, &y, &WelchConfig::new().with_segment_length(256)).unwrap();
    assert_relative_eq!(be, BE, epsilon = 0.01);
}

#[test]
fn every_method_runs_through_dispatch() {
    let (x, y) = differences(1024, -1.0, 0.01, 13);
    for method in BeMethod::all() {
        let value = method.estimate(&x, &y);
        match method {
            // Opposite-sign changes count against the Clark sum.
            BeMethod::Clark => assert!(value.unwrap() < 0.0),
            _ => assert!(value.unwrap().is_finite(), "{}", method.name()),
        }
    }
}

/// Hourly head built from Earth tide and pressure, fitted with HALS, then
/// passed to the frequency-domain estimators.
#[test]
fn harmonic_components_feed_rau_and_acworth() {
    let be = 0.3;
    let time: Vec<f64> = (0..60 * 24).map(|i| i as f64 / 24.0).collect();
    let et: Vec<f64> = time
        .iter()
        .map(|&t| 10.0 * (TAU * M2 * t).cos() + 4.0 * (TAU * S2 * t - 0.7).cos())
        .collect();
    let bp: Vec<f64> = time
        .iter()
        .map(|&t| 0.5 * (TAU * S2 * t - 0.7).cos())
        .collect();
    let gw: Vec<f64> = et.iter().zip(&bp).map(|(e, b)| 0.002 * e - be * b).collect();

    let freqs = [M2, S2];
    let fit = |values: &[f64]| {
        let series = TimeSeries::new(time.clone(), values.to_vec()).unwrap();
        hals(&series, &freqs, &HalsConfig::new())
            .unwrap()
            .into_value()
            .components()
            .to_vec()
    };
    let components = TidalComponents::from_components(&fit(&bp), &fit(&et), &fit(&gw)).unwrap();

    let rau_be = rau(&components, 1.0).unwrap();
    assert!(rau_be.is_clean());
    assert_relative_eq!(*rau_be.value(), be, epsilon = 1e-8);

    let acworth_be = acworth(&components).unwrap();
    assert!(acworth_be.is_clean());
    assert_relative_eq!(*acworth_be.value(), be, epsilon = 1e-8);
}
