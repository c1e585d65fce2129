//! Writing analysis results as JSON.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::IoError;

/// Serialises `value` as pretty-printed JSON to `path`, replacing any
/// existing file.
///
/// # Errors
///
/// Returns [`IoError::Json`] if serialisation fails (e.g. a non-string map
/// key) and [`IoError::File`] if the file cannot be written.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|source| IoError::File {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "results written");
    Ok(())
}
