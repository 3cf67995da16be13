//! # pluvio-calendar
//!
//! Annual accounting periods for daily rainfall series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["daily (year, month, precip)"] -->|"MonthlyMeans::from_daily()"| B["MonthlyMeans"]
//!     B -->|".dry_season()"| C["six driest months"]
//!     C -->|"continuous_window()"| D["contiguous window?"]
//!     D -->|"resolve_scheme()"| E["AccountingScheme"]
//!     E -->|".accounting_year(year, month)"| F["accounting year"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use pluvio_calendar::{MonthlyMeans, resolve_scheme};
//!
//! // Wet October..March, dry April..September.
//! let means = MonthlyMeans::new([
//!     Some(200.0), Some(180.0), Some(150.0), Some(40.0), Some(20.0), Some(5.0),
//!     Some(3.0), Some(8.0), Some(30.0), Some(120.0), Some(160.0), Some(210.0),
//! ]);
//! let scheme = resolve_scheme(&means);
//! assert_eq!(scheme.start_month(), 10);
//! assert_eq!(scheme.accounting_year(2000, 10).unwrap(), 2001);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `accounting` | Accounting schemes and accounting-year assignment |
//! | `season` | Monthly means, dry season, hydrological-year resolution |
//! | `error` | Error types |

mod accounting;
mod error;
mod season;

pub use accounting::{AccountingMethod, AccountingScheme, accounting_year};
pub use error::CalendarError;
pub use season::{DRY_SEASON_LEN, MonthlyMeans, continuous_window, resolve_scheme, wet_season_start};
