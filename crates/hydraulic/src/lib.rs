//! # geotide-hydraulic
//!
//! Hydraulic conductivity `K` and specific storage `Ss` from the response
//! of well head to Earth-tide strain at the M2 frequency.
//!
//! ```mermaid
//! graph LR
//!     ET[ET M2] --> SR[StrainResponse]
//!     GW[GW M2] --> SR
//!     SR -->|dφ ≤ boundary| H[Hsieh 1987]
//!     SR -->|dφ > boundary| W[Wang 2000]
//!     H --> PF[PropertyFit]
//!     W --> PF
//! ```
//!
//! | Model | Flow | Phase regime | Well inputs |
//! |-------|------|--------------|-------------|
//! | [`hsieh`] | horizontal, confined | lag (`dφ ≤ boundary`) | casing radius, screen radius, screen length |
//! | [`wang`] | vertical, to the water table | lead (`dφ > boundary`) | screen depth |
//!
//! The boundary defaults to 0°, so exactly one model accepts any input. A
//! model called outside its regime returns
//! [`HydraulicError::PhaseOutOfRange`]; [`estimate_properties`] picks the
//! model for you.
//!
//! Both fits minimise the squared amplitude and phase residuals over
//! `(log10 K, log10 Ss)` with Nelder-Mead. A run that stops without
//! converging is reported as [`PropertyFit::NotConverged`], not as an error.
//!
//! ## Example
//!
//! ```
//! use geotide_hydraulic::{HydraulicConfig, WellGeometry, estimate_properties};
//! use num_complex::Complex64;
//!
//! let et_m2 = Complex64::new(10.0, 0.0);
//! let gw_m2 = Complex64::from_polar(1.0e-3, 0.18);
//! let well = WellGeometry::new().with_screen_depth(20.0);
//! let fit = estimate_properties(et_m2, gw_m2, &well, &HydraulicConfig::new()).unwrap();
//! if let Some(estimate) = fit.estimate() {
//!     assert!(estimate.hydraulic_conductivity() > 0.0);
//! }
//! ```

mod config;
mod error;
mod estimate;
mod hsieh;
mod kelvin;
mod model;
mod wang;
mod well;

pub use config::HydraulicConfig;
pub use error::HydraulicError;
pub use estimate::{PhysicalEstimate, PropertyFit, estimate_properties};
pub use hsieh::{hsieh, hsieh_response};
pub use kelvin::{Kelvin, kelvin};
pub use model::{HydraulicModel, ModelResponse, StrainResponse};
pub use wang::{wang, wang_response};
pub use well::WellGeometry;
