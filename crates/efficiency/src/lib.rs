//! # geotide-efficiency
//!
//! Barometric efficiency (BE) estimators: the fraction of an atmospheric
//! pressure change that appears as a change in well head.
//!
//! ## Time domain
//!
//! Each takes pressure `x` and head `y` in the same units, usually first
//! differences of regularly sampled records.
//!
//! | Function | Method |
//! |----------|--------|
//! | [`average_of_ratios`] | mean of `y/x` |
//! | [`median_of_ratios`] | median of finite `y/x` |
//! | [`linear_regression`] | slope of `x` regressed on `y` |
//! | [`clark`] | Clark (1967) cumulative slope |
//! | [`davis_rasmussen`] | Davis & Rasmussen (1993) |
//! | [`rahi`] | Rahi (2010) filtered cumulative slope |
//! | [`rojstaczer`] | mean Welch gain `|Pxy|/Pxx` |
//!
//! [`BeMethod`] dispatches over them by value.
//!
//! ## Frequency domain
//!
//! ```mermaid
//! graph LR
//!     HALS[HALS / FFT components] --> TC[TidalComponents]
//!     TC --> RAU[rau]
//!     TC --> ACW[acworth]
//!     RAU --> O[Outcome f64]
//!     ACW --> O
//! ```
//!
//! [`rau`] and [`acworth`] use the M2 and S2 components of head, pressure
//! and Earth tide. Both return an [`Outcome`](geotide_signal::Outcome) that
//! may carry advisories about the validity of their assumptions.

mod error;
mod frequency_domain;
mod method;
mod time_domain;

pub use error::EfficiencyError;
pub use frequency_domain::{TidalComponents, acworth, rau};
pub use method::BeMethod;
pub use time_domain::{
    average_of_ratios, clark, davis_rasmussen, linear_regression, median_of_ratios, rahi,
    rojstaczer,
};
