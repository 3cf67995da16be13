//! Error types for the pluvio-calendar crate.

/// Error type for all fallible operations in the pluvio-calendar crate.
///
/// Covers month values outside 1..=12 and misaligned parallel slices
/// passed to the monthly aggregation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when the year, month and precipitation slices differ in length.
    #[error(
        "length mismatch: years has {years_len} elements, months has {months_len}, precip has {precip_len}"
    )]
    LengthMismatch {
        /// Length of the years slice.
        years_len: usize,
        /// Length of the months slice.
        months_len: usize,
        /// Length of the precipitation slice.
        precip_len: usize,
    },
}
