//! Well construction parameters.

use serde::Serialize;

use crate::error::HydraulicError;

/// Well construction used by the response models.
///
/// | Field | Used by | Default |
/// |-------|---------|---------|
/// | casing radius `r_c` (m) | Hsieh | 0.1 |
/// | screen radius `r_w` (m) | Hsieh | 0.1 |
/// | screen length `b` (m) | Hsieh | 2.0 |
/// | screen depth `z` below the water table (m) | Wang | 20.0 |
///
/// # Example
///
/// ```
/// use geotide_hydraulic::WellGeometry;
///
/// let well = WellGeometry::new()
///     .with_casing_radius(0.05)
///     .with_screen_radius(0.08)
///     .with_screen_length(10.0);
/// assert!(well.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WellGeometry {
    casing_radius: f64,
    screen_radius: f64,
    screen_length: f64,
    screen_depth: f64,
}

impl WellGeometry {
    pub fn new() -> Self {
        Self {
            casing_radius: 0.1,
            screen_radius: 0.1,
            screen_length: 2.0,
            screen_depth: 20.0,
        }
    }

    pub fn with_casing_radius(mut self, metres: f64) -> Self {
        self.casing_radius = metres;
        self
    }

    pub fn with_screen_radius(mut self, metres: f64) -> Self {
        self.screen_radius = metres;
        self
    }

    pub fn with_screen_length(mut self, metres: f64) -> Self {
        self.screen_length = metres;
        self
    }

    pub fn with_screen_depth(mut self, metres: f64) -> Self {
        self.screen_depth = metres;
        self
    }

    /// Casing radius `r_c` (m).
    pub fn casing_radius(&self) -> f64 {
        self.casing_radius
    }

    /// Screen (well) radius `r_w` (m).
    pub fn screen_radius(&self) -> f64 {
        self.screen_radius
    }

    /// Screened aquifer thickness `b` (m).
    pub fn screen_length(&self) -> f64 {
        self.screen_length
    }

    /// Screen depth below the water table `z` (m).
    pub fn screen_depth(&self) -> f64 {
        self.screen_depth
    }

    /// Checks that every dimension is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`HydraulicError::InvalidGeometry`] naming the first bad field.
    pub fn validate(&self) -> Result<(), HydraulicError> {
        let fields = [
            ("casing radius", self.casing_radius),
            ("screen radius", self.screen_radius),
            ("screen length", self.screen_length),
            ("screen depth", self.screen_depth),
        ];
        for (what, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(HydraulicError::InvalidGeometry { what, value });
            }
        }
        Ok(())
    }
}

impl Default for WellGeometry {
    fn default() -> Self {
        Self::new()
    }
}
