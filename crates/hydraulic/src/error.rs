//! Error types for the geotide-hydraulic crate.

use crate::model::HydraulicModel;

/// Error type for all fallible operations in the geotide-hydraulic crate.
///
/// Solver non-convergence is not an error; see
/// [`PropertyFit::NotConverged`](crate::PropertyFit::NotConverged).
#[derive(Debug, Clone, thiserror::Error)]
pub enum HydraulicError {
    /// Returned when the phase shift lies outside the regime of the model.
    ///
    /// Recoverable: the complementary model accepts this phase.
    #[error(
        "{model}: phase shift {phase_deg:.3} degrees is outside the model regime \
         (boundary {boundary_deg} degrees)"
    )]
    PhaseOutOfRange {
        /// Model that rejected the input.
        model: HydraulicModel,
        /// Observed phase shift (degrees).
        phase_deg: f64,
        /// Configured regime boundary (degrees).
        boundary_deg: f64,
    },

    /// Returned when the Earth-tide M2 component is zero.
    #[error("earth tide M2 component is zero")]
    ZeroEarthTide,

    /// Returned when a tidal component is NaN or infinite.
    #[error("{what} M2 component is not finite")]
    NonFiniteComponent {
        /// `"earth tide"` or `"head"`.
        what: &'static str,
    },

    /// Returned when a well dimension is not finite and positive.
    #[error("invalid well geometry: {what} must be finite and > 0, got {value}")]
    InvalidGeometry {
        /// Name of the dimension.
        what: &'static str,
        /// Value supplied.
        value: f64,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned when the optimiser itself fails to run.
    #[error("solver failed: {0}")]
    Solver(String),
}
