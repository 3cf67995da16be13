//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus helpers that check the
//! invariants of a daily precipitation series.

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Moves every error of `other` into `self`.
    pub(crate) fn extend(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Series helpers
// ---------------------------------------------------------------------------

/// Check that the date and precipitation columns have the same length.
pub(crate) fn validate_lengths(dates_len: usize, precip_len: usize) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    if dates_len != precip_len {
        c.push(format!(
            "dates length {dates_len} != precip length {precip_len}"
        ));
    }
    c
}

/// Check that every precipitation value is finite and non-negative.
///
/// Records one message per offending index.
pub(crate) fn validate_precip(precip: &[f64]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for (i, &val) in precip.iter().enumerate() {
        if !val.is_finite() {
            c.push(format!("non-finite precipitation at index {i}"));
        } else if val < 0.0 {
            c.push(format!("negative precipitation at index {i}: {val}"));
        }
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_empty_is_ok() {
        let c = ValidationCollector::new();
        assert_eq!(c.len(), 0);
        assert!(c.finish().is_ok());
    }

    #[test]
    fn collector_joins_messages() {
        let mut c = ValidationCollector::new();
        c.push("error one");
        c.push("error two");
        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert_eq!(details, "error one; error two");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn collector_extend_merges() {
        let mut a = validate_lengths(1, 2);
        a.extend(validate_precip(&[-1.0, f64::NAN]));
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn lengths_match_is_empty() {
        assert!(validate_lengths(10, 10).finish().is_ok());
    }

    #[test]
    fn precip_violations_reported_per_index() {
        let c = validate_precip(&[1.0, -0.5, f64::INFINITY, 0.0]);
        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("negative precipitation at index 1: -0.5"));
                assert!(details.contains("non-finite precipitation at index 2"));
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }
}
