//! Dry-season detection and hydrological-year resolution.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::accounting::AccountingScheme;
use crate::error::CalendarError;

/// Number of months in the dry season.
pub const DRY_SEASON_LEN: usize = 6;

/// Mean monthly precipitation totals for the twelve calendar months.
///
/// Each entry is the mean, over all years in which the month appears, of
/// that month's precipitation sum. Months with no data are `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyMeans {
    means: [Option<f64>; 12],
}

impl MonthlyMeans {
    /// Wraps a pre-computed 12-element table (index 0 = January).
    pub fn new(means: [Option<f64>; 12]) -> Self {
        Self { means }
    }

    /// Builds the table from parallel daily slices.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::LengthMismatch`] if the slices differ in
    /// length and [`CalendarError::InvalidMonth`] for a month outside 1..=12.
    pub fn from_daily(years: &[i32], months: &[u8], precip: &[f64]) -> Result<Self, CalendarError> {
        if years.len() != months.len() || years.len() != precip.len() {
            return Err(CalendarError::LengthMismatch {
                years_len: years.len(),
                months_len: months.len(),
                precip_len: precip.len(),
            });
        }

        let mut sums: BTreeMap<(i32, u8), f64> = BTreeMap::new();
        for ((&y, &m), &p) in years.iter().zip(months).zip(precip) {
            if !(1..=12).contains(&m) {
                return Err(CalendarError::InvalidMonth { month: m });
            }
            *sums.entry((y, m)).or_insert(0.0) += p;
        }

        let mut totals = [0.0_f64; 12];
        let mut counts = [0usize; 12];
        for (&(_, m), &s) in &sums {
            let i = (m - 1) as usize;
            totals[i] += s;
            counts[i] += 1;
        }

        let mut means = [None; 12];
        for i in 0..12 {
            if counts[i] > 0 {
                means[i] = Some(totals[i] / counts[i] as f64);
            }
        }

        Ok(Self { means })
    }

    /// Mean for a 1-indexed calendar month.
    ///
    /// # Panics
    ///
    /// Panics if `month` is 0 or greater than 12.
    pub fn get(&self, month: u8) -> Option<f64> {
        assert!(
            (1..=12).contains(&month),
            "month must be in 1..=12, got {month}"
        );
        self.means[(month - 1) as usize]
    }

    /// The full table, index 0 = January.
    pub fn as_array(&self) -> &[Option<f64>; 12] {
        &self.means
    }

    /// Returns `true` when every month has a mean.
    pub fn is_complete(&self) -> bool {
        self.means.iter().all(Option::is_some)
    }

    /// The six months with the lowest mean, ascending by mean.
    ///
    /// Ties keep month order. Returns `None` unless all twelve months have
    /// a mean.
    pub fn dry_season(&self) -> Option<[u8; DRY_SEASON_LEN]> {
        let mut ranked: Vec<(u8, f64)> = Vec::with_capacity(12);
        for (i, mean) in self.means.iter().enumerate() {
            ranked.push(((i + 1) as u8, (*mean)?));
        }
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut dry = [0u8; DRY_SEASON_LEN];
        for (slot, (m, _)) in dry.iter_mut().zip(ranked) {
            *slot = m;
        }
        Some(dry)
    }
}

/// Checks whether `months` form one circular run of six calendar months.
///
/// Candidate start months are tried in ascending order; the first six-month
/// window (wrapping December to January) whose month set equals the set of
/// `months` is returned in calendar order from its start.
///
/// ```
/// use pluvio_calendar::continuous_window;
///
/// assert_eq!(
///     continuous_window(&[9, 10, 11, 12, 1, 2]),
///     Some(vec![9, 10, 11, 12, 1, 2])
/// );
/// assert_eq!(continuous_window(&[1, 3, 5, 7, 9, 11]), None);
/// ```
pub fn continuous_window(months: &[u8]) -> Option<Vec<u8>> {
    if months.iter().any(|m| !(1..=12).contains(m)) {
        return None;
    }
    let target: BTreeSet<u8> = months.iter().copied().collect();

    for &start in &target {
        let window: Vec<u8> = (0..DRY_SEASON_LEN as u8)
            .map(|i| (start + i - 1) % 12 + 1)
            .collect();
        let window_set: BTreeSet<u8> = window.iter().copied().collect();
        if window_set == target {
            return Some(window);
        }
    }

    None
}

/// First month after a dry-season window, i.e. the hydrological-year start.
///
/// Returns `None` for an empty window.
pub fn wet_season_start(window: &[u8]) -> Option<u8> {
    window.last().map(|&last| last % 12 + 1)
}

/// Chooses the accounting scheme from the monthly means.
///
/// A contiguous dry season yields a hydrological year starting at the first
/// wet month; anything else (scattered dry months, or months without data)
/// falls back to the civil year.
pub fn resolve_scheme(means: &MonthlyMeans) -> AccountingScheme {
    let Some(dry) = means.dry_season() else {
        warn!("monthly means incomplete, using civil year");
        return AccountingScheme::civil();
    };

    match continuous_window(&dry).as_deref().and_then(wet_season_start) {
        Some(start) => {
            debug!(?dry, start_month = start, "dry season is contiguous");
            // start is always in 1..=12 by construction
            AccountingScheme::hydrological(start).unwrap_or_else(|_| AccountingScheme::civil())
        }
        None => {
            debug!(?dry, "dry season is not contiguous");
            AccountingScheme::civil()
        }
    }
}
