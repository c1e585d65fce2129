//! Uniform dispatch over the time-domain estimators.

use geotide_signal::WelchConfig;

use crate::error::EfficiencyError;
use crate::time_domain;

/// A time-domain barometric efficiency estimator.
#[derive(Clone, Debug, PartialEq)]
pub enum BeMethod {
    /// [`time_domain::average_of_ratios`]
    AverageOfRatios,
    /// [`time_domain::median_of_ratios`]
    MedianOfRatios,
    /// [`time_domain::linear_regression`]
    LinearRegression,
    /// [`time_domain::clark`]
    Clark,
    /// [`time_domain::davis_rasmussen`]
    DavisRasmussen,
    /// [`time_domain::rahi`]
    Rahi,
    /// [`time_domain::rojstaczer`]
    Rojstaczer(WelchConfig),
}

impl BeMethod {
    /// Every method, with default Welch settings for Rojstaczer.
    pub fn all() -> Vec<Self> {
        vec![
            Self::AverageOfRatios,
            Self::MedianOfRatios,
            Self::LinearRegression,
            Self::Clark,
            Self::DavisRasmussen,
            Self::Rahi,
            Self::Rojstaczer(WelchConfig::default()),
        ]
    }

    /// Stable kebab-case identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AverageOfRatios => "average-of-ratios",
            Self::MedianOfRatios => "median-of-ratios",
            Self::LinearRegression => "linear-regression",
            Self::Clark => "clark",
            Self::DavisRasmussen => "davis-rasmussen",
            Self::Rahi => "rahi",
            Self::Rojstaczer(_) => "rojstaczer",
        }
    }

    /// Runs the estimator on pressure `x` and head `y`.
    ///
    /// # Errors
    ///
    /// Propagates the selected estimator's error.
    pub fn estimate(&self, x: &[f64], y: &[f64]) -> Result<f64, EfficiencyError> {
        match self {
            Self::AverageOfRatios => time_domain::average_of_ratios(x, y),
            Self::MedianOfRatios => time_domain::median_of_ratios(x, y),
            Self::LinearRegression => time_domain::linear_regression(x, y),
            Self::Clark => time_domain::clark(x, y),
            Self::DavisRasmussen => time_domain::davis_rasmussen(x, y),
            Self::Rahi => time_domain::rahi(x, y),
            Self::Rojstaczer(config) => time_domain::rojstaczer(x, y, config),
        }
    }
}
