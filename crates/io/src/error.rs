//! Error types for geotide-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the geotide-io crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file cannot be read or written.
    #[error("i/o error on {}: {source}", path.display())]
    File {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Wraps a JSON encoding or decoding failure.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/data/well.json"),
        };
        assert_eq!(err.to_string(), "file not found: /data/well.json");
    }

    #[test]
    fn error_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "gw length 3 != time length 4; bp contains 1 non-finite value(s)".into(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): gw length 3 != time length 4; bp contains 1 non-finite value(s)"
        );
    }

    #[test]
    fn error_from_json() {
        let json_err = serde_json::from_str::<Vec<f64>>("[1,").unwrap_err();
        let err = IoError::from(json_err);
        assert!(matches!(err, IoError::Json { .. }));
        assert!(err.to_string().starts_with("json error: "));
    }

    #[test]
    fn error_is_std_error() {
        let err = IoError::Json {
            reason: "bad".into(),
        };
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IoError>();
    }
}
