//! Station metadata and daily series containers.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::IoError;
use crate::validate;

/// Metadata parsed from the 9-line header of a station file.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMetadata {
    name: String,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    extra: BTreeMap<String, String>,
}

impl StationMetadata {
    /// Creates metadata with no free-text fields.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        altitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            altitude,
            start_date,
            end_date,
            extra: BTreeMap::new(),
        }
    }

    /// Adds a free-text header field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// City (station) name, the `nome` header field.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Altitude in metres.
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// First day of the record (`data_inicial`).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the record (`data_final`).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// A free-text header field by normalized key, e.g. `codigo_estacao`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// All free-text header fields.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

/// One raw row of the station table, before cleaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecord {
    /// Measurement date; `None` when unparsable.
    pub date: Option<NaiveDate>,
    /// Daily precipitation in mm; `None` when missing or unparsable.
    pub precip: Option<f64>,
}

/// Cleaned daily precipitation series for a single station.
///
/// Holds only complete months; calendar year and month are pre-computed
/// from the dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationSeries {
    dates: Vec<NaiveDate>,
    precip: Vec<f64>,
    years: Vec<i32>,
    months: Vec<u8>,
}

impl StationSeries {
    /// Creates a series after validating inputs.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the lengths differ or any
    /// precipitation value is negative or non-finite.
    pub fn new(dates: Vec<NaiveDate>, precip: Vec<f64>) -> Result<Self, IoError> {
        let mut c = validate::validate_lengths(dates.len(), precip.len());
        c.extend(validate::validate_precip(&precip));
        c.finish()?;
        Ok(Self::from_parts(dates, precip))
    }

    fn from_parts(dates: Vec<NaiveDate>, precip: Vec<f64>) -> Self {
        let years = dates.iter().map(|d| d.year()).collect();
        let months = dates.iter().map(|d| d.month() as u8).collect();
        Self {
            dates,
            precip,
            years,
            months,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Daily precipitation in mm.
    pub fn precip(&self) -> &[f64] {
        &self.precip
    }

    /// Calendar year of each day.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Calendar month of each day (1..=12).
    pub fn months(&self) -> &[u8] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.precip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precip.is_empty()
    }

    /// Number of distinct (year, month) pairs.
    pub fn n_months(&self) -> usize {
        let mut n = 0;
        let mut prev = None;
        for pair in self.years.iter().zip(&self.months) {
            if prev != Some(pair) {
                n += 1;
                prev = Some(pair);
            }
        }
        n
    }
}
