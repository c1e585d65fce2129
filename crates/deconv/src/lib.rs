//! # geotide-deconv
//!
//! Regression deconvolution of groundwater heads against barometric
//! pressure, with optional Earth-tide terms (Rasmussen & Crawford, 1997).
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["time, head, pressure"] -->|"diff"| B["ΔGW, ΔBP"]
//!     B -->|"lagged −ΔBP columns"| C["design matrix"]
//!     E["EarthTide::Harmonic / Series"] --> C
//!     C -->|"least squares"| D["coefficients + covariance"]
//!     D --> F["ResponseFunction (barometric)"]
//!     D --> G["EarthTideResponse"]
//!     D --> H["corrected head"]
//! ```
//!
//! ## Earth-tide Modes
//!
//! | Mode | Columns | Response |
//! |------|---------|----------|
//! | [`EarthTide::Ignore`] | none | [`EarthTideResponse::None`] |
//! | [`EarthTide::Harmonic`] | cos/sin per frequency | complex coefficient per frequency |
//! | [`EarthTide::Series`] | lagged `+ΔET` | lag response function |
//!
//! ## Quick Start
//!
//! ```ignore
//! use geotide_deconv::{DeconvConfig, EarthTide, deconvolve};
//!
//! let outcome = deconvolve(&time, &head, &pressure, EarthTide::Ignore, &DeconvConfig::new())?;
//! for advisory in outcome.advisories() {
//!     eprintln!("{advisory}");
//! }
//! let brf = outcome.value().barometric();
//! println!("BE ≈ {}", brf.cumulative().last().copied().unwrap_or(f64::NAN));
//! ```

mod config;
mod deconvolve;
mod design;
mod error;
mod response;

pub use config::{DeconvConfig, EarthTide};
pub use deconvolve::{Deconvolution, EarthTideResponse, deconvolve};
pub use error::DeconvError;
pub use response::ResponseFunction;
