//! Reading hand-off records from JSON files.

use std::path::Path;

use tracing::info;

use crate::error::IoError;
use crate::record::Record;

/// Reads and validates a [`Record`] from a JSON file.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::File`] | the file cannot be read |
/// | [`IoError::Json`] | malformed JSON or unknown fields |
/// | [`IoError::Validation`] | inconsistent or non-finite data |
pub fn read_record(path: &Path) -> Result<Record, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| IoError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let record: Record = serde_json::from_str(&text)?;
    record.validate()?;
    info!(
        path = %path.display(),
        samples = record.len(),
        earth_tide = record.et().is_some(),
        "record loaded"
    );
    Ok(record)
}
