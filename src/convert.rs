//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::*;

use geotide_deconv::DeconvConfig;
use geotide_efficiency::BeMethod;
use geotide_hydraulic::{HydraulicConfig, WellGeometry};
use geotide_signal::{ConstituentTable, DetrendConfig, FftConfig, HalsConfig, WelchConfig};

/// Earth-tide treatment in the deconvolution regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarthTideMode {
    None,
    Harmonic,
    Series,
}

/// Harmonic extraction method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralMethod {
    Hals,
    Fft,
}

impl SpectralMethod {
    pub fn name(self) -> &'static str {
        match self {
            Self::Hals => "hals",
            Self::Fft => "fft",
        }
    }
}

/// Parses a constituent table name into the corresponding table.
pub fn parse_table(s: &str) -> Result<ConstituentTable> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "earth_tide" => Ok(ConstituentTable::earth_tide()),
        "earth_tide_extended" => Ok(ConstituentTable::earth_tide_extended()),
        "atmospheric" => Ok(ConstituentTable::atmospheric()),
        "groundwater" => Ok(ConstituentTable::groundwater()),
        other => bail!("unknown constituent table: {other:?}"),
    }
}

/// Parses an Earth-tide mode name into the corresponding enum variant.
pub fn parse_earth_tide_mode(s: &str) -> Result<EarthTideMode> {
    match s.to_lowercase().as_str() {
        "none" => Ok(EarthTideMode::None),
        "harmonic" => Ok(EarthTideMode::Harmonic),
        "series" => Ok(EarthTideMode::Series),
        other => bail!("unknown earth tide mode: {other:?}"),
    }
}

/// Parses a harmonic extraction method name into the corresponding enum variant.
pub fn parse_spectral_method(s: &str) -> Result<SpectralMethod> {
    match s.to_lowercase().as_str() {
        "hals" => Ok(SpectralMethod::Hals),
        "fft" => Ok(SpectralMethod::Fft),
        other => bail!("unknown harmonic method: {other:?}"),
    }
}

/// Parses a barometric efficiency method name into the corresponding enum
/// variant. Rojstaczer takes the supplied Welch settings.
pub fn parse_be_method(s: &str, welch: &WelchConfig) -> Result<BeMethod> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "average-of-ratios" => Ok(BeMethod::AverageOfRatios),
        "median-of-ratios" => Ok(BeMethod::MedianOfRatios),
        "linear-regression" => Ok(BeMethod::LinearRegression),
        "clark" => Ok(BeMethod::Clark),
        "davis-rasmussen" => Ok(BeMethod::DavisRasmussen),
        "rahi" => Ok(BeMethod::Rahi),
        "rojstaczer" => Ok(BeMethod::Rojstaczer(welch.clone())),
        other => bail!("unknown barometric efficiency method: {other:?}"),
    }
}

/// Builds a [`DeconvConfig`] from the TOML deconvolution configuration.
pub fn build_deconv_config(deconv: &DeconvolutionToml) -> Result<DeconvConfig> {
    let names = parse_table(&deconv.constituents)?;
    Ok(DeconvConfig::new()
        .with_lag_hours(deconv.lag_hours)
        .with_names(names))
}

/// Builds a [`HalsConfig`] naming components from `table`.
pub fn build_hals_config(harmonics: &HarmonicsToml, table: ConstituentTable) -> HalsConfig {
    let mut cfg = HalsConfig::new().with_names(table);
    if let Some(days) = harmonics.min_duration_days {
        cfg = cfg.with_min_duration_days(days);
    }
    cfg
}

/// Builds an [`FftConfig`] from the TOML harmonics configuration.
pub fn build_fft_config(harmonics: &HarmonicsToml) -> FftConfig {
    let mut cfg = FftConfig::new();
    if let Some(days) = harmonics.min_duration_days {
        cfg = cfg.with_min_duration_days(days);
    }
    cfg
}

/// Builds a [`DetrendConfig`], or `None` when detrending is off.
pub fn build_detrend_config(harmonics: &HarmonicsToml) -> Option<DetrendConfig> {
    harmonics
        .detrend
        .then(|| DetrendConfig::new().with_window_days(harmonics.detrend_window_days))
}

/// Builds a [`WelchConfig`] for records sampled `samples_per_day` times a day.
pub fn build_welch_config(efficiency: &EfficiencyToml, samples_per_day: f64) -> WelchConfig {
    let mut cfg = WelchConfig::new()
        .with_sampling_frequency(samples_per_day)
        .with_segment_length(efficiency.segment_length);
    if let Some(overlap) = efficiency.overlap {
        cfg = cfg.with_overlap(overlap);
    }
    cfg
}

/// Parses every configured method name.
pub fn build_be_methods(efficiency: &EfficiencyToml, welch: &WelchConfig) -> Result<Vec<BeMethod>> {
    if efficiency.methods.is_empty() {
        bail!("[efficiency].methods must name at least one method");
    }
    efficiency
        .methods
        .iter()
        .map(|m| parse_be_method(m, welch))
        .collect()
}

/// Builds a [`WellGeometry`] from the TOML well configuration.
pub fn build_well_geometry(well: &WellToml) -> WellGeometry {
    WellGeometry::new()
        .with_casing_radius(well.casing_radius)
        .with_screen_radius(well.screen_radius)
        .with_screen_length(well.screen_length)
        .with_screen_depth(well.screen_depth)
}

/// Builds a [`HydraulicConfig`] from the TOML well configuration.
pub fn build_hydraulic_config(well: &WellToml) -> HydraulicConfig {
    HydraulicConfig::new()
        .with_phase_boundary_deg(well.phase_boundary_deg)
        .with_max_iterations(well.max_iterations)
}
