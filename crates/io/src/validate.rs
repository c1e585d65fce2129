//! Accumulated validation of hand-off records.

use crate::error::IoError;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Move every message from `other` into this collector.
    pub(crate) fn absorb(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` if nothing was recorded, otherwise every message joined
    /// with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Check that every channel has as many samples as the time axis.
pub(crate) fn validate_lengths(time_len: usize, channels: &[(&str, usize)]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for &(name, len) in channels {
        if len != time_len {
            c.push(format!("{name} length {len} != time length {time_len}"));
        }
    }
    c
}

/// Check that a channel holds no NaN or infinite values.
///
/// Gaps must be filled before the hand-off, so any non-finite sample is
/// reported.
pub(crate) fn validate_finite(name: &str, values: &[f64]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let bad = values.iter().filter(|v| !v.is_finite()).count();
    if bad > 0 {
        c.push(format!("{name} contains {bad} non-finite value(s)"));
    }
    c
}

/// Check that time stamps strictly increase.
///
/// Records only the first offending index.
pub(crate) fn validate_time(time: &[f64]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    if time.len() < 2 {
        c.push(format!("time has {} sample(s), need at least 2", time.len()));
    }
    if let Some(i) = time.windows(2).position(|w| !(w[1] > w[0])) {
        c.push(format!("time not strictly increasing at index {}", i + 1));
    }
    c
}
