use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level geotide configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GeotideConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Regression-deconvolution settings.
    #[serde(default)]
    pub deconvolution: DeconvolutionToml,

    /// Harmonic extraction settings.
    #[serde(default)]
    pub harmonics: HarmonicsToml,

    /// Barometric efficiency settings.
    #[serde(default)]
    pub efficiency: EfficiencyToml,

    /// Well construction and K/Ss solver settings.
    #[serde(default)]
    pub well: WellToml,
}

impl GeotideConfig {
    /// Loads a TOML file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeconvolutionToml {
    #[serde(default = "default_lag_hours")]
    pub lag_hours: f64,
    /// `"none"`, `"harmonic"` or `"series"`.
    #[serde(default = "default_earth_tide")]
    pub earth_tide: String,
    /// Constituent table for the harmonic mode.
    #[serde(default = "default_deconv_table")]
    pub constituents: String,
}

impl Default for DeconvolutionToml {
    fn default() -> Self {
        Self {
            lag_hours: default_lag_hours(),
            earth_tide: default_earth_tide(),
            constituents: default_deconv_table(),
        }
    }
}

fn default_lag_hours() -> f64 {
    24.0
}
fn default_earth_tide() -> String {
    "harmonic".to_string()
}
fn default_deconv_table() -> String {
    "earth_tide".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarmonicsToml {
    /// `"hals"` or `"fft"`.
    #[serde(default = "default_spectral_method")]
    pub method: String,
    /// Overrides the method's minimum record length (days).
    #[serde(default)]
    pub min_duration_days: Option<f64>,
    /// Remove a moving linear trend before extraction.
    #[serde(default)]
    pub detrend: bool,
    #[serde(default = "default_detrend_window")]
    pub detrend_window_days: f64,
}

impl Default for HarmonicsToml {
    fn default() -> Self {
        Self {
            method: default_spectral_method(),
            min_duration_days: None,
            detrend: false,
            detrend_window_days: default_detrend_window(),
        }
    }
}

fn default_spectral_method() -> String {
    "hals".to_string()
}
fn default_detrend_window() -> f64 {
    3.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EfficiencyToml {
    /// Time-domain methods to run, by name.
    #[serde(default = "default_be_methods")]
    pub methods: Vec<String>,
    /// Feed first differences rather than raw levels to the time-domain methods.
    #[serde(default = "default_true")]
    pub differences: bool,
    #[serde(default = "default_segment_length")]
    pub segment_length: usize,
    #[serde(default)]
    pub overlap: Option<usize>,
    /// Damping factor for the Rau estimator.
    #[serde(default = "default_amplitude_ratio")]
    pub amplitude_ratio: f64,
}

impl Default for EfficiencyToml {
    fn default() -> Self {
        Self {
            methods: default_be_methods(),
            differences: true,
            segment_length: default_segment_length(),
            overlap: None,
            amplitude_ratio: default_amplitude_ratio(),
        }
    }
}

fn default_be_methods() -> Vec<String> {
    [
        "average-of-ratios",
        "median-of-ratios",
        "linear-regression",
        "clark",
        "davis-rasmussen",
        "rahi",
        "rojstaczer",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_true() -> bool {
    true
}
fn default_segment_length() -> usize {
    256
}
fn default_amplitude_ratio() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WellToml {
    #[serde(default = "default_radius")]
    pub casing_radius: f64,
    #[serde(default = "default_radius")]
    pub screen_radius: f64,
    #[serde(default = "default_screen_length")]
    pub screen_length: f64,
    #[serde(default = "default_screen_depth")]
    pub screen_depth: f64,
    #[serde(default)]
    pub phase_boundary_deg: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
}

impl Default for WellToml {
    fn default() -> Self {
        Self {
            casing_radius: default_radius(),
            screen_radius: default_radius(),
            screen_length: default_screen_length(),
            screen_depth: default_screen_depth(),
            phase_boundary_deg: 0.0,
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_radius() -> f64 {
    0.1
}
fn default_screen_length() -> f64 {
    2.0
}
fn default_screen_depth() -> f64 {
    20.0
}
fn default_max_iterations() -> u64 {
    2_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: GeotideConfig = toml::from_str("").unwrap();
        assert_eq!(config.deconvolution.lag_hours, 24.0);
        assert_eq!(config.harmonics.method, "hals");
        assert_eq!(config.efficiency.methods.len(), 7);
        assert!(config.efficiency.differences);
        assert_eq!(config.well.screen_depth, 20.0);
    }

    #[test]
    fn sections_override_defaults() {
        let config: GeotideConfig = toml::from_str(
            r#"
            [io]
            input = "well.json"

            [deconvolution]
            lag_hours = 48.0
            earth_tide = "series"

            [efficiency]
            methods = ["clark", "rahi"]
            amplitude_ratio = 0.8

            [well]
            casing_radius = 0.05
            "#,
        )
        .unwrap();
        assert_eq!(config.io.input, Some(PathBuf::from("well.json")));
        assert_eq!(config.deconvolution.lag_hours, 48.0);
        assert_eq!(config.deconvolution.earth_tide, "series");
        assert_eq!(config.efficiency.methods, vec!["clark", "rahi"]);
        assert_eq!(config.well.casing_radius, 0.05);
        assert_eq!(config.well.screen_radius, 0.1);
    }

    #[test]
    fn unknown_field_rejected() {
        let result: Result<GeotideConfig, _> = toml::from_str("[well]\nradius = 1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn no_path_gives_defaults() {
        let config = GeotideConfig::load(None).unwrap();
        assert_eq!(config.harmonics.detrend_window_days, 3.0);
    }
}
