//! # pluvio-gev
//!
//! Generalized Extreme Value (GEV) distribution fitting for annual maxima.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["annual maxima"] -->|"fit_gev(&values, &config)?"| B["GevFit"]
//!     B --> C[".params() — shape, loc, scale"]
//!     B --> D[".log_likelihood()"]
//!     B --> E[".samples() — diagnostic draws"]
//!     C --> F[".quantile(p) — design depth"]
//! ```
//!
//! Parameters are estimated by maximum likelihood (Nelder-Mead over
//! `(shape, loc, ln scale)`), starting from Hosking's L-moment estimates.
//!
//! ## Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | c | [`GevParams::shape()`] | Shape; `c > 0` bounded upper tail, `c < 0` heavy tail |
//! | mu | [`GevParams::loc()`] | Location |
//! | sigma | [`GevParams::scale()`] | Scale (positive) |
//!
//! ## Quick Start
//!
//! ```no_run
//! use pluvio_gev::{FitConfig, fit_gev};
//!
//! let maxima = [52.1, 61.0, 48.3, 75.2, 58.8, 66.4, 90.5, 55.0];
//! let fit = fit_gev(&maxima, &FitConfig::new())?;
//! let h100 = fit.params().quantile(1.0 - 1.0 / 100.0);
//! # Ok::<(), pluvio_gev::GevError>(())
//! ```

mod config;
mod error;
mod fit;
mod params;

pub(crate) mod optimizer;

pub use config::FitConfig;
pub use error::GevError;
pub use fit::{GevFit, MIN_SAMPLE, fit_gev};
pub use params::GevParams;
