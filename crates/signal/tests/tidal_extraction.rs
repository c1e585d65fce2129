//! Integration tests for geotide-signal: HALS and FFT on synthetic tidal records.

use std::f64::consts::TAU;

use approx::assert_relative_eq;
use geotide_signal::{
    ConstituentTable, DetrendConfig, FftConfig, HalsConfig, M2, S2, TimeSeries, detrend_windowed,
    fft_spectrum, hals,
};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Hourly record of M2 and S2 with Gaussian noise.
fn tidal_record(days: usize, noise_sd: f64, seed: u64) -> TimeSeries {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, noise_sd).unwrap();
    let time: Vec<f64> = (0..days * 24).map(|i| i as f64 / 24.0).collect();
    let values = time
        .iter()
        .map(|&t| {
            0.04 * (TAU * M2 * t).cos() + 0.03 * (TAU * M2 * t).sin()
                + 0.02 * (TAU * S2 * t).cos()
                + normal.sample(&mut rng)
        })
        .collect();
    TimeSeries::new(time, values).unwrap()
}

#[test]
fn hals_recovers_noisy_constituents() {
    let series = tidal_record(60, 0.01, 42);
    let table = ConstituentTable::earth_tide();
    let result = hals(&series, &table.frequencies(), &HalsConfig::new())
        .unwrap()
        .into_value();

    assert_eq!(result.components().len(), table.len());
    let m2 = result.component("M2").unwrap();
    assert_relative_eq!(m2.amplitude(), 0.05, epsilon = 2e-3);
    assert_relative_eq!(m2.phase(), 0.03_f64.atan2(0.04), epsilon = 0.05);
    let s2 = result.component("S2").unwrap();
    assert_relative_eq!(s2.amplitude(), 0.02, epsilon = 2e-3);
    let o1 = result.component("O1").unwrap();
    assert!(o1.amplitude() < 3e-3);

    let var = result.diagnostics().error_variance();
    assert!(var > 0.5e-4 && var < 2e-4, "error variance {var}");
}

#[test]
fn hals_and_fft_agree_at_s2() {
    // 64 days hourly puts S2 exactly on an FFT bin.
    let series = tidal_record(64, 0.0, 1);
    let hals_s2 = hals(&series, &[M2, S2], &HalsConfig::new())
        .unwrap()
        .into_value()
        .component("S2")
        .cloned()
        .unwrap();
    let fft_s2 = fft_spectrum(&series, &FftConfig::new())
        .unwrap()
        .component_at(S2)
        .unwrap();

    assert_relative_eq!(fft_s2.frequency(), S2, epsilon = 1e-12);
    assert_relative_eq!(fft_s2.amplitude(), hals_s2.amplitude(), epsilon = 2e-3);
    assert!((fft_s2.phase() - hals_s2.phase()).abs() < 0.05);
}

#[test]
fn detrend_then_hals_recovers_tide_under_drift() {
    let clean = tidal_record(40, 0.0, 3);
    let drifted: Vec<f64> = clean
        .time()
        .iter()
        .zip(clean.values())
        .map(|(&t, &v)| v + 10.0 + 0.05 * t + 0.002 * t * t)
        .collect();
    let detrended = detrend_windowed(clean.time(), &drifted, &DetrendConfig::new()).unwrap();
    let series = TimeSeries::new(clean.time().to_vec(), detrended).unwrap();
    let result = hals(&series, &[M2, S2], &HalsConfig::new())
        .unwrap()
        .into_value();
    assert_relative_eq!(result.component("M2").unwrap().amplitude(), 0.05, epsilon = 5e-3);
}
