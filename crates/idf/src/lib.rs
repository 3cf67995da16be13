//! # pluvio-idf
//!
//! Intensity-duration-frequency analysis for daily rain-gauge stations:
//! annual maxima, GEV design depths and sub-daily disaggregation.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph TD
//!     A["StationFile"] -->|"MonthlyMeans + resolve_scheme"| B["AccountingScheme"]
//!     B -->|"extract_annual_maxima()"| C["Vec&lt;AnnualMaximum&gt;"]
//!     C -->|"fit_gev()"| D["GevFit"]
//!     D -->|"return_period_table()"| E["11 ReturnPeriodRow"]
//!     E -->|"intensity_matrix()"| F["143 IntensityRow"]
//! ```
//!
//! [`run_station`] chains every stage for one parsed file;
//! [`run_batch`] fans out over many files with rayon and never lets one
//! station's failure abort the others.
//!
//! ## Errors
//!
//! Station failures are classified by [`ErrorKind`]:
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | `Parse` | the file is unreadable or malformed |
//! | `DataIntegrity` | cleaning leaves no data, or no year has rain |
//! | `Fit` | the GEV fit fails or the maxima are degenerate |
//! | `Lookup` | no file matches a station code |

mod batch;
mod config;
mod disaggregate;
mod error;
mod maxima;
mod pipeline;
mod return_period;
pub mod tables;

pub use batch::{BatchOutcome, BatchSummary, StationFailure, StationSource, run_batch};
pub use config::IdfConfig;
pub use disaggregate::{
    CONCENTRATION_TIMES, CoefficientTable, DEFAULT_COEFFICIENTS, IntensityRow, N_DURATIONS,
    NORMALIZATION, intensity_matrix,
};
pub use error::{ErrorKind, IdfError};
pub use maxima::{AnnualMaximum, extract_annual_maxima};
pub use pipeline::{StationIdf, run_station, run_station_file};
pub use return_period::{RETURN_PERIODS, ReturnPeriodRow, design_depth, return_period_table};
