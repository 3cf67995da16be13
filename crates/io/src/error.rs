//! Error types for pluvio-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the pluvio-io crate.
///
/// Covers file access, malformed station headers and tables, station
/// lookup, and failures from the CSV and Parquet writers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file exists but cannot be read or written.
    #[error("cannot access {}: {reason}", path.display())]
    Access {
        /// Path being accessed.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when the metadata header is structurally malformed.
    #[error("malformed header: {reason}")]
    Header {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a required header key is absent.
    #[error("missing header key '{key}'")]
    MissingHeaderKey {
        /// Normalized key name.
        key: String,
    },

    /// Returned when a numeric header field cannot be parsed.
    #[error("header field '{key}' is not a number: '{value}'")]
    InvalidNumber {
        /// Normalized key name.
        key: String,
        /// Raw value.
        value: String,
    },

    /// Returned when a date header field cannot be parsed.
    #[error("header field '{key}' is not a YYYY-MM-DD date: '{value}'")]
    InvalidDate {
        /// Normalized key name.
        key: String,
        /// Raw value.
        value: String,
    },

    /// Returned when a body record has the wrong shape.
    #[error("malformed record at line {line}: {reason}")]
    Table {
        /// 1-based line number in the file.
        line: u64,
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error originating from the CSV library.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the Arrow or Parquet libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
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

    /// Returned when no data file matches a station code.
    #[error("no data file found for station '{code}'")]
    StationNotFound {
        /// Station code that was looked up.
        code: String,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl IoError {
    /// Maps a `std::io::Error` on `path` to [`IoError::FileNotFound`] or
    /// [`IoError::Access`].
    pub(crate) fn from_io(path: &std::path::Path, e: &std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Access {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }
}
