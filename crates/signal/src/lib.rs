//! # geotide-signal
//!
//! Harmonic and spectral building blocks for separating barometric and
//! Earth-tide influences in groundwater head records.
//!
//! ## Analysis Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeries::new(t, y)?"] -->|"validate"| B["TimeSeries"]
//!     B -->|"hals(&ts, &freqs, &config)?"| C["Outcome&lt;HalsResult&gt;"]
//!     B -->|"fft_spectrum(&ts, &config)?"| D["Spectrum"]
//!     C --> E[".component(\"M2\")"]
//!     D --> F[".components(&table)"]
//!     E --> G["FrequencyComponent"]
//!     F --> G
//! ```
//!
//! ## Complex Encoding
//!
//! Every [`FrequencyComponent`] stores `a·cos(2πft) + b·sin(2πft)` as
//! `a + i·b`, so phase is `atan2(b, a)`. HALS, the FFT spectrum and the
//! harmonic deconvolution mode all report in this encoding.
//!
//! ## Utilities
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`detrend_windowed`] | overlapping-window linear detrend, NaN tolerant |
//! | [`autocorrelation`] / [`cross_correlation`] | circular FFT correlation |
//! | [`cross_spectral_density`] | Welch CSD |
//! | [`least_squares`] | SVD least squares with condition number |
//! | [`quantise`] | snap values to a grid |

mod component;
mod constituents;
mod correlation;
mod detrend;
mod diagnostics;
mod error;
mod fft;
mod hals;
mod lstsq;
mod outcome;
mod series;
mod welch;

pub use component::FrequencyComponent;
pub use constituents::{
    Category, Constituent, ConstituentTable, M2, NANOSTRAIN, S2, SECONDS_PER_DAY,
};
pub use correlation::{autocorrelation, cross_correlation};
pub use detrend::{DetrendConfig, detrend_windowed};
pub use diagnostics::{
    FitDiagnostics, ILL_CONDITIONED_THRESHOLD, condition_number, conditioning_advisory,
    matrix_condition_number,
};
pub use error::SignalError;
pub use fft::{FftConfig, Spectrum, fft_spectrum};
pub use hals::{HalsConfig, HalsResult, hals};
pub use lstsq::{LeastSquares, least_squares};
pub use outcome::{Advisory, Outcome};
pub use series::{TimeSeries, quantise, regular_step};
pub use welch::{CrossSpectrum, WelchConfig, cross_spectral_density};
