//! Error types for the pluvio-idf crate.

use std::fmt;

use pluvio_gev::GevError;
use pluvio_io::IoError;

/// Category of a station failure, used for batch summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// Malformed or unreadable station file.
    Parse,
    /// Not enough usable data after cleaning or extraction.
    DataIntegrity,
    /// Extreme value fit failed.
    Fit,
    /// No data file for the station.
    Lookup,
    /// Invalid pipeline configuration.
    Config,
}

impl ErrorKind {
    /// Stable lower-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::DataIntegrity => "data_integrity",
            Self::Fit => "fit",
            Self::Lookup => "lookup",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for all fallible operations in the pluvio-idf crate.
///
/// Every station-level variant names the station and a human-readable
/// cause.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IdfError {
    /// The station file could not be read or parsed.
    #[error("station {station}: parse error: {reason}")]
    Parse {
        /// Station identifier.
        station: String,
        /// Cause.
        reason: String,
    },

    /// The cleaned data cannot support the analysis.
    #[error("station {station}: data integrity error: {reason}")]
    DataIntegrity {
        /// Station identifier.
        station: String,
        /// Cause.
        reason: String,
    },

    /// The GEV fit failed or the input was degenerate.
    #[error("station {station}: fit error: {reason}")]
    Fit {
        /// Station identifier.
        station: String,
        /// Cause.
        reason: String,
    },

    /// No data file was found for the station.
    #[error("station {station}: lookup error: {reason}")]
    Lookup {
        /// Station identifier.
        station: String,
        /// Cause.
        reason: String,
    },

    /// Returned when a configuration value is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl IdfError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::DataIntegrity { .. } => ErrorKind::DataIntegrity,
            Self::Fit { .. } => ErrorKind::Fit,
            Self::Lookup { .. } => ErrorKind::Lookup,
            Self::InvalidConfig { .. } => ErrorKind::Config,
        }
    }

    /// Station the error refers to, if any.
    pub fn station(&self) -> Option<&str> {
        match self {
            Self::Parse { station, .. }
            | Self::DataIntegrity { station, .. }
            | Self::Fit { station, .. }
            | Self::Lookup { station, .. } => Some(station),
            Self::InvalidConfig { .. } => None,
        }
    }

    /// The cause without the station prefix.
    pub fn reason(&self) -> &str {
        match self {
            Self::Parse { reason, .. }
            | Self::DataIntegrity { reason, .. }
            | Self::Fit { reason, .. }
            | Self::Lookup { reason, .. }
            | Self::InvalidConfig { reason } => reason,
        }
    }

    pub(crate) fn data_integrity(station: &str, reason: impl Into<String>) -> Self {
        Self::DataIntegrity {
            station: station.to_string(),
            reason: reason.into(),
        }
    }

    /// Classifies a data-access error: missing stations are lookup errors,
    /// everything else is a parse error.
    pub(crate) fn from_io(station: &str, err: &IoError) -> Self {
        let station = station.to_string();
        let reason = err.to_string();
        match err {
            IoError::StationNotFound { .. } => Self::Lookup { station, reason },
            _ => Self::Parse { station, reason },
        }
    }

    pub(crate) fn from_gev(station: &str, err: &GevError) -> Self {
        match err {
            GevError::InvalidConfig { reason } => Self::InvalidConfig {
                reason: reason.clone(),
            },
            _ => Self::Fit {
                station: station.to_string(),
                reason: err.to_string(),
            },
        }
    }
}
