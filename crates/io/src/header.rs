//! Station file header parsing.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::IoError;
use crate::station::StationMetadata;

/// Number of metadata lines at the top of every station file.
pub const HEADER_LINES: usize = 9;

const NUMERIC_KEYS: [&str; 3] = ["latitude", "longitude", "altitude"];
const DATE_KEYS: [&str; 2] = ["data_inicial", "data_final"];
const NAME_KEY: &str = "nome";

/// Lower-cases a header key and joins its words with underscores.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Parses a decimal number, accepting `,` as the decimal separator.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let value: f64 = if s.contains(',') && !s.contains('.') {
        s.replace(',', ".").parse().ok()?
    } else {
        s.parse().ok()?
    };
    value.is_finite().then_some(value)
}

/// Parses the header lines into [`StationMetadata`].
///
/// Each line with a colon is split at the first colon; other lines are
/// ignored.
///
/// # Errors
///
/// - [`IoError::Header`] if fewer than [`HEADER_LINES`] lines are given
/// - [`IoError::MissingHeaderKey`] for an absent required key
/// - [`IoError::InvalidNumber`] / [`IoError::InvalidDate`] for unparsable
///   coordinates or record dates
pub fn parse_header<S: AsRef<str>>(lines: &[S]) -> Result<StationMetadata, IoError> {
    if lines.len() < HEADER_LINES {
        return Err(IoError::Header {
            reason: format!(
                "file has {} lines, expected at least {HEADER_LINES}",
                lines.len()
            ),
        });
    }

    let mut fields: BTreeMap<String, String> = BTreeMap::new();
    for line in &lines[..HEADER_LINES] {
        if let Some((key, value)) = line.as_ref().split_once(':') {
            fields.insert(normalize_key(key), value.trim().to_string());
        }
    }

    let name = take(&mut fields, NAME_KEY)?;
    let [latitude, longitude, altitude] = NUMERIC_KEYS.map(|key| take_number(&mut fields, key));
    let [start_date, end_date] = DATE_KEYS.map(|key| take_date(&mut fields, key));

    let mut meta = StationMetadata::new(
        name,
        latitude?,
        longitude?,
        altitude?,
        start_date?,
        end_date?,
    );
    for (key, value) in fields {
        meta = meta.with_field(key, value);
    }
    Ok(meta)
}

fn take(fields: &mut BTreeMap<String, String>, key: &str) -> Result<String, IoError> {
    fields.remove(key).ok_or_else(|| IoError::MissingHeaderKey {
        key: key.to_string(),
    })
}

fn take_number(fields: &mut BTreeMap<String, String>, key: &str) -> Result<f64, IoError> {
    let raw = take(fields, key)?;
    parse_decimal(&raw).ok_or(IoError::InvalidNumber {
        key: key.to_string(),
        value: raw,
    })
}

fn take_date(fields: &mut BTreeMap<String, String>, key: &str) -> Result<NaiveDate, IoError> {
    let raw = take(fields, key)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| IoError::InvalidDate {
        key: key.to_string(),
        value: raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn header() -> Vec<&'static str> {
        vec![
            "Nome: BRASILIA",
            "Codigo Estacao: A001",
            "Latitude: -15.78944444",
            "Longitude: -47.92583332",
            "Altitude: 1160.96",
            "Situacao: Operante",
            "Data Inicial: 2000-01-01",
            "Data Final: 2020-12-31",
            "Periodicidade da Medicao: Diaria",
        ]
    }

    #[test]
    fn parses_required_and_extra_fields() {
        let meta = parse_header(&header()).unwrap();
        assert_eq!(meta.name(), "BRASILIA");
        assert!((meta.latitude() + 15.78944444).abs() < 1e-12);
        assert!((meta.altitude() - 1160.96).abs() < 1e-12);
        assert_eq!(meta.start_date().year(), 2000);
        assert_eq!(meta.end_date().year(), 2020);
        assert_eq!(meta.field("codigo_estacao"), Some("A001"));
        assert_eq!(meta.field("periodicidade_da_medicao"), Some("Diaria"));
        assert_eq!(meta.field("latitude"), None);
    }

    #[test]
    fn value_split_at_first_colon() {
        let mut lines = header();
        lines[5] = "Situacao: Operante: desde 1961";
        let meta = parse_header(&lines).unwrap();
        assert_eq!(meta.field("situacao"), Some("Operante: desde 1961"));
    }

    #[test]
    fn colonless_lines_ignored() {
        let mut lines = header();
        lines[8] = "---";
        assert!(parse_header(&lines).is_ok());
    }

    #[test]
    fn comma_decimal_accepted() {
        let mut lines = header();
        lines[4] = "Altitude: 1160,96";
        let meta = parse_header(&lines).unwrap();
        assert!((meta.altitude() - 1160.96).abs() < 1e-12);
    }

    #[test]
    fn too_few_lines() {
        let err = parse_header(&header()[..4]).unwrap_err();
        assert!(matches!(err, IoError::Header { .. }));
    }

    #[test]
    fn missing_latitude() {
        let mut lines = header();
        lines[2] = "Lat -15.7";
        assert_eq!(
            parse_header(&lines).unwrap_err().to_string(),
            "missing header key 'latitude'"
        );
    }

    #[test]
    fn bad_date_is_fatal() {
        let mut lines = header();
        lines[7] = "Data Final: 31/12/2020";
        let err = parse_header(&lines).unwrap_err();
        assert!(matches!(err, IoError::InvalidDate { ref key, .. } if key == "data_final"));
    }

    #[test]
    fn bad_number_is_fatal() {
        let mut lines = header();
        lines[3] = "Longitude: west";
        let err = parse_header(&lines).unwrap_err();
        assert!(matches!(err, IoError::InvalidNumber { ref key, .. } if key == "longitude"));
    }

    #[test]
    fn decimal_parsing() {
        assert_eq!(parse_decimal(" 12.5 "), Some(12.5));
        assert_eq!(parse_decimal("12,5"), Some(12.5));
        assert_eq!(parse_decimal("null"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("NaN"), None);
    }
}
