//! Annual maxima extraction.

use std::collections::BTreeMap;

use pluvio_calendar::{AccountingScheme, CalendarError};
use tracing::debug;

/// Largest daily precipitation of one accounting year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualMaximum {
    /// Accounting year (civil or hydrological).
    pub year: i32,
    /// Maximum daily precipitation in mm, always positive.
    pub value: f64,
}

/// One maximum per accounting year, ascending by year.
///
/// Each day is assigned to its accounting year under `scheme`. Years whose
/// maximum is not strictly positive are dropped.
///
/// # Errors
///
/// Returns [`CalendarError::LengthMismatch`] if the slices differ in length
/// and [`CalendarError::InvalidMonth`] for a month outside 1..=12.
pub fn extract_annual_maxima(
    years: &[i32],
    months: &[u8],
    precip: &[f64],
    scheme: &AccountingScheme,
) -> Result<Vec<AnnualMaximum>, CalendarError> {
    if years.len() != months.len() || years.len() != precip.len() {
        return Err(CalendarError::LengthMismatch {
            years_len: years.len(),
            months_len: months.len(),
            precip_len: precip.len(),
        });
    }

    let mut maxima: BTreeMap<i32, f64> = BTreeMap::new();
    for ((&y, &m), &p) in years.iter().zip(months).zip(precip) {
        let acc = scheme.accounting_year(y, m)?;
        maxima
            .entry(acc)
            .and_modify(|v| *v = v.max(p))
            .or_insert(p);
    }

    let n_years = maxima.len();
    let out: Vec<AnnualMaximum> = maxima
        .into_iter()
        .filter(|&(_, value)| value > 0.0)
        .map(|(year, value)| AnnualMaximum { year, value })
        .collect();

    if out.len() < n_years {
        debug!(
            n_dropped = n_years - out.len(),
            "dropped accounting years with no rainfall"
        );
    }
    Ok(out)
}
