//! Output tables for one or many stations, ready for
//! [`pluvio_io::write_csv`] and [`pluvio_io::write_parquet`].

use pluvio_io::{Column, ColumnData, IoError, Table};

use crate::pipeline::StationIdf;

/// `station, accounting_year, max_precipitation_mm`
pub fn annual_maxima(results: &[StationIdf]) -> Result<Table, IoError> {
    let mut station = Vec::new();
    let mut year = Vec::new();
    let mut value = Vec::new();
    for idf in results {
        for m in idf.annual_maxima() {
            station.push(idf.station().to_string());
            year.push(m.year);
            value.push(m.value);
        }
    }
    Table::new(vec![
        Column::new("station", ColumnData::Utf8(station)),
        Column::new("accounting_year", ColumnData::Int32(year)),
        Column::new("max_precipitation_mm", ColumnData::Float64(value)),
    ])
}

/// `station, return_period_years, exceedance_probability, depth_mm`
pub fn return_periods(results: &[StationIdf]) -> Result<Table, IoError> {
    let mut station = Vec::new();
    let mut tr = Vec::new();
    let mut prob = Vec::new();
    let mut depth = Vec::new();
    for idf in results {
        for row in idf.return_periods() {
            station.push(idf.station().to_string());
            tr.push(row.return_period);
            prob.push(row.exceedance_probability);
            depth.push(row.depth_mm);
        }
    }
    Table::new(vec![
        Column::new("station", ColumnData::Utf8(station)),
        Column::new("return_period_years", ColumnData::UInt32(tr)),
        Column::new("exceedance_probability", ColumnData::Float64(prob)),
        Column::new("depth_mm", ColumnData::Float64(depth)),
    ])
}

/// `tc_min, return_period_years, intensity_mm_h, latitude, longitude,
/// altitude, city`
pub fn intensities(results: &[StationIdf]) -> Result<Table, IoError> {
    let rows = results.iter().flat_map(|idf| idf.intensities());
    let n = results.iter().map(|idf| idf.intensities().len()).sum();

    let mut tc = Vec::with_capacity(n);
    let mut tr = Vec::with_capacity(n);
    let mut intensity = Vec::with_capacity(n);
    let mut lat = Vec::with_capacity(n);
    let mut lon = Vec::with_capacity(n);
    let mut alt = Vec::with_capacity(n);
    let mut city = Vec::with_capacity(n);
    for row in rows {
        tc.push(row.tc_min);
        tr.push(row.return_period);
        intensity.push(row.intensity_mm_h);
        lat.push(row.latitude);
        lon.push(row.longitude);
        alt.push(row.altitude);
        city.push(row.city.clone());
    }
    Table::new(vec![
        Column::new("tc_min", ColumnData::UInt32(tc)),
        Column::new("return_period_years", ColumnData::UInt32(tr)),
        Column::new("intensity_mm_h", ColumnData::Float64(intensity)),
        Column::new("latitude", ColumnData::Float64(lat)),
        Column::new("longitude", ColumnData::Float64(lon)),
        Column::new("altitude", ColumnData::Float64(alt)),
        Column::new("city", ColumnData::Utf8(city)),
    ])
}
