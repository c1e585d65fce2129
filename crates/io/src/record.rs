//! The hand-off record produced by the data-preparation layer.

use serde::{Deserialize, Serialize};

use crate::error::IoError;
use crate::validate::{ValidationCollector, validate_finite, validate_lengths, validate_time};

/// Regularly prepared, gap-filled well record.
///
/// `time` is in float days; `gw` (head), `bp` (barometric pressure, in head
/// units) and the optional `et` (Earth-tide strain, nanostrain) share its
/// length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    time: Vec<f64>,
    gw: Vec<f64>,
    bp: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    et: Option<Vec<f64>>,
}

impl Record {
    /// Builds and validates a record.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn new(
        time: Vec<f64>,
        gw: Vec<f64>,
        bp: Vec<f64>,
        et: Option<Vec<f64>>,
    ) -> Result<Self, IoError> {
        let record = Self { time, gw, bp, et };
        record.validate()?;
        Ok(record)
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn gw(&self) -> &[f64] {
        &self.gw
    }

    pub fn bp(&self) -> &[f64] {
        &self.bp
    }

    pub fn et(&self) -> Option<&[f64]> {
        self.et.as_deref()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if the record holds no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Checks lengths, finiteness and time ordering, collecting every
    /// violation.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] when any check fails.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut channels = vec![("gw", self.gw.len()), ("bp", self.bp.len())];
        if let Some(et) = &self.et {
            channels.push(("et", et.len()));
        }

        let mut c = ValidationCollector::new();
        c.absorb(validate_lengths(self.time.len(), &channels));
        c.absorb(validate_time(&self.time));
        c.absorb(validate_finite("gw", &self.gw));
        c.absorb(validate_finite("bp", &self.bp));
        if let Some(et) = &self.et {
            c.absorb(validate_finite("et", et));
        }
        c.finish()
    }
}
