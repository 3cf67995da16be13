//! Accounting schemes and accounting-year assignment.

use std::fmt;

use crate::error::CalendarError;

/// How daily records are grouped into annual blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountingMethod {
    /// Shifted year starting at the first wet-season month.
    HydrologicalYear,
    /// January to December.
    CivilYear,
}

impl fmt::Display for AccountingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HydrologicalYear => write!(f, "hydrological year"),
            Self::CivilYear => write!(f, "civil year"),
        }
    }
}

/// Annual accounting period used for block maxima.
///
/// A civil-year scheme always starts in January; the constructors enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountingScheme {
    method: AccountingMethod,
    start_month: u8,
}

impl AccountingScheme {
    /// The January-to-December scheme.
    pub fn civil() -> Self {
        Self {
            method: AccountingMethod::CivilYear,
            start_month: 1,
        }
    }

    /// A hydrological-year scheme beginning in `start_month`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `start_month` is outside
    /// 1..=12.
    pub fn hydrological(start_month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&start_month) {
            return Err(CalendarError::InvalidMonth { month: start_month });
        }
        Ok(Self {
            method: AccountingMethod::HydrologicalYear,
            start_month,
        })
    }

    /// Returns the grouping method.
    pub fn method(&self) -> AccountingMethod {
        self.method
    }

    /// Returns the first month of the accounting year (1 for civil years).
    pub fn start_month(&self) -> u8 {
        self.start_month
    }

    /// Returns `true` for a hydrological-year scheme.
    pub fn is_hydrological(&self) -> bool {
        self.method == AccountingMethod::HydrologicalYear
    }

    /// Accounting year of a record in `year`/`month` under this scheme.
    /// Civil years start in January, so they keep the calendar year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn accounting_year(&self, year: i32, month: u8) -> Result<i32, CalendarError> {
        accounting_year(year, month, self.start_month)
    }
}

impl fmt::Display for AccountingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (start month {})", self.method, self.start_month)
    }
}

/// Accounting year of a record dated `year`/`month` under a scheme that
/// begins in `start_month`.
///
/// Months from `start_month` through December are labelled with the
/// following year, so a wet season spanning New Year is one accounting
/// year named after the year it ends in. A January start never rolls
/// forward: that scheme labels every record with its own calendar year,
/// matching the civil year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` or `start_month` is
/// outside 1..=12.
///
/// # Examples
///
/// ```
/// use pluvio_calendar::accounting_year;
///
/// // Wet season from November: Nov 1995 is accounted to 1996.
/// assert_eq!(accounting_year(1995, 11, 11).unwrap(), 1996);
/// assert_eq!(accounting_year(1996, 4, 11).unwrap(), 1996);
/// // January start is the calendar year.
/// assert_eq!(accounting_year(1995, 12, 1).unwrap(), 1995);
/// ```
pub fn accounting_year(year: i32, month: u8, start_month: u8) -> Result<i32, CalendarError> {
    for m in [month, start_month] {
        if !(1..=12).contains(&m) {
            return Err(CalendarError::InvalidMonth { month: m });
        }
    }
    let rolls_forward = start_month > 1 && month >= start_month;
    Ok(year + i32::from(rolls_forward))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn january_start_never_rolls_forward() {
        let s = AccountingScheme::hydrological(1).unwrap();
        assert!(s.is_hydrological());
        for m in 1..=12 {
            assert_eq!(s.accounting_year(1987, m).unwrap(), 1987);
        }
    }

    #[test]
    fn start_month_boundary() {
        assert_eq!(accounting_year(1987, 3, 3).unwrap(), 1988);
        assert_eq!(accounting_year(1987, 2, 3).unwrap(), 1987);
        assert_eq!(accounting_year(1987, 12, 12).unwrap(), 1988);
    }

    #[test]
    fn invalid_months() {
        assert_eq!(
            accounting_year(2000, 0, 10).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
        assert_eq!(
            accounting_year(2000, 6, 13).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn civil_scheme_starts_in_january() {
        let s = AccountingScheme::civil();
        assert_eq!(s.method(), AccountingMethod::CivilYear);
        assert_eq!(s.start_month(), 1);
        assert!(!s.is_hydrological());
        assert_eq!(s.accounting_year(1999, 12).unwrap(), 1999);
    }

    #[test]
    fn civil_scheme_rejects_bad_month() {
        let s = AccountingScheme::civil();
        assert!(s.accounting_year(1999, 0).is_err());
    }

    #[test]
    fn hydrological_scheme_relabels() {
        let s = AccountingScheme::hydrological(10).unwrap();
        assert!(s.is_hydrological());
        assert_eq!(s.accounting_year(2000, 9).unwrap(), 2000);
        assert_eq!(s.accounting_year(2000, 10).unwrap(), 2001);
        assert_eq!(s.accounting_year(2000, 12).unwrap(), 2001);
    }

    #[test]
    fn hydrological_scheme_rejects_bad_start() {
        assert_eq!(
            AccountingScheme::hydrological(0).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            AccountingScheme::civil().to_string(),
            "civil year (start month 1)"
        );
        assert_eq!(
            AccountingScheme::hydrological(3).unwrap().to_string(),
            "hydrological year (start month 3)"
        );
    }
}
