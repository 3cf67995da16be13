//! Station file reader and completeness filter.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::error::IoError;
use crate::header::{self, HEADER_LINES};
use crate::station::{DailyRecord, StationMetadata, StationSeries};

/// Meaningful columns in a body record; a trailing delimiter adds one more.
const BODY_FIELDS: usize = 5;

/// Accepted formats for the measurement-date column.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// A parsed and cleaned station file.
#[derive(Debug, Clone, PartialEq)]
pub struct StationFile {
    metadata: StationMetadata,
    series: StationSeries,
}

impl StationFile {
    pub fn new(metadata: StationMetadata, series: StationSeries) -> Self {
        Self { metadata, series }
    }

    pub fn metadata(&self) -> &StationMetadata {
        &self.metadata
    }

    pub fn series(&self) -> &StationSeries {
        &self.series
    }

    pub fn into_parts(self) -> (StationMetadata, StationSeries) {
        (self.metadata, self.series)
    }
}

/// Reads a station file and applies the completeness filter.
///
/// An empty series is returned, not an error, when every month is dropped.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] / [`IoError::Access`] when the file
/// cannot be read, the header and table errors of
/// [`read_station_records`], and [`IoError::Validation`] for negative
/// values in complete months.
pub fn read_station(path: &Path) -> Result<StationFile, IoError> {
    let (metadata, records) = read_station_records(path)?;
    let series = completeness_filter(
        &records,
        metadata.start_date().year(),
        metadata.end_date().year(),
    )?;
    info!(
        path = %path.display(),
        station = metadata.name(),
        n_records = records.len(),
        n_days = series.len(),
        n_months = series.n_months(),
        "station file read"
    );
    Ok(StationFile::new(metadata, series))
}

/// Reads the header and the raw daily records of a station file.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] / [`IoError::Access`] on I/O failure
/// - header errors from [`parse_header`](crate::parse_header)
/// - [`IoError::Table`] for a record with other than 5 or 6 fields
pub fn read_station_records(path: &Path) -> Result<(StationMetadata, Vec<DailyRecord>), IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| IoError::from_io(path, &e))?;
    parse_station_text(&text)
}

/// Parses the full text of a station file.
pub fn parse_station_text(text: &str) -> Result<(StationMetadata, Vec<DailyRecord>), IoError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let lines: Vec<&str> = text.lines().take(HEADER_LINES).collect();
    let metadata = header::parse_header(&lines)?;

    let body_start = text
        .match_indices('\n')
        .nth(HEADER_LINES - 1)
        .map_or(text.len(), |(i, _)| i + 1);
    let records = parse_body(&text[body_start..])?;

    Ok((metadata, records))
}

/// Parses the semicolon-delimited body. Line numbers in errors count from
/// the top of the file.
fn parse_body(body: &str) -> Result<Vec<DailyRecord>, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, |p| p.line()) + HEADER_LINES as u64;

        if row.len() != BODY_FIELDS && row.len() != BODY_FIELDS + 1 {
            return Err(IoError::Table {
                line,
                reason: format!(
                    "expected {BODY_FIELDS} or {} fields, found {}",
                    BODY_FIELDS + 1,
                    row.len()
                ),
            });
        }

        records.push(DailyRecord {
            date: parse_date(&row[0]),
            precip: header::parse_decimal(&row[1]),
        });
    }

    debug!(n_records = records.len(), "station body parsed");
    Ok(records)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Keeps only complete months inside `[start_year, end_year]`.
///
/// A (year, month) group survives only if none of its rows has a missing
/// precipitation value. Rows with no date or a year outside the range are
/// dropped. Output is ordered by year, then by each month's first
/// appearance within the year, then file order.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if a kept value is negative, e.g. a
/// `-9999` sentinel inside an otherwise complete month.
pub fn completeness_filter(
    records: &[DailyRecord],
    start_year: i32,
    end_year: i32,
) -> Result<StationSeries, IoError> {
    // year -> [(month, record indices)] in order of first appearance
    let mut groups: BTreeMap<i32, Vec<(u32, Vec<usize>)>> = BTreeMap::new();
    for (i, rec) in records.iter().enumerate() {
        let Some(date) = rec.date else { continue };
        let year = date.year();
        if year < start_year || year > end_year {
            continue;
        }
        let months = groups.entry(year).or_default();
        match months.iter_mut().find(|(m, _)| *m == date.month()) {
            Some((_, idx)) => idx.push(i),
            None => months.push((date.month(), vec![i])),
        }
    }

    let mut dates = Vec::new();
    let mut precip = Vec::new();
    let mut dropped = 0usize;
    for (year, months) in &groups {
        for (month, idx) in months {
            let values: Option<Vec<f64>> = idx.iter().map(|&i| records[i].precip).collect();
            let Some(values) = values else {
                debug!(year, month, "dropping incomplete month");
                dropped += 1;
                continue;
            };
            dates.extend(idx.iter().filter_map(|&i| records[i].date));
            precip.extend(values);
        }
    }

    if dropped > 0 {
        info!(n_dropped = dropped, "incomplete months removed");
    }
    StationSeries::new(dates, precip)
}
