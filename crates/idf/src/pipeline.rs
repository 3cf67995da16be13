//! Per-station pipeline: cleaned series to IDF matrix.

use std::path::Path;

use pluvio_calendar::{AccountingScheme, MonthlyMeans, resolve_scheme};
use pluvio_gev::{GevFit, fit_gev};
use pluvio_io::{StationCache, StationFile, StationMetadata, station_code};
use tracing::{debug, info};

use crate::config::IdfConfig;
use crate::disaggregate::{IntensityRow, intensity_matrix};
use crate::error::IdfError;
use crate::maxima::{AnnualMaximum, extract_annual_maxima};
use crate::return_period::{ReturnPeriodRow, return_period_table};

/// Everything produced for one station.
#[derive(Debug, Clone)]
pub struct StationIdf {
    station: String,
    metadata: StationMetadata,
    monthly_means: MonthlyMeans,
    scheme: AccountingScheme,
    annual_maxima: Vec<AnnualMaximum>,
    fit: GevFit,
    return_periods: Vec<ReturnPeriodRow>,
    intensities: Vec<IntensityRow>,
}

impl StationIdf {
    /// Station identifier (code from the file name).
    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn metadata(&self) -> &StationMetadata {
        &self.metadata
    }

    pub fn monthly_means(&self) -> &MonthlyMeans {
        &self.monthly_means
    }

    /// Accounting scheme chosen from the dry season.
    pub fn scheme(&self) -> AccountingScheme {
        self.scheme
    }

    pub fn annual_maxima(&self) -> &[AnnualMaximum] {
        &self.annual_maxima
    }

    pub fn fit(&self) -> &GevFit {
        &self.fit
    }

    pub fn return_periods(&self) -> &[ReturnPeriodRow] {
        &self.return_periods
    }

    /// Intensity matrix ordered by return period, then concentration time.
    pub fn intensities(&self) -> &[IntensityRow] {
        &self.intensities
    }
}

/// Runs the full analysis on an already parsed station file.
///
/// # Errors
///
/// - [`IdfError::DataIntegrity`] if cleaning left no data or no accounting
///   year has positive rainfall
/// - [`IdfError::Fit`] if the GEV fit fails
/// - [`IdfError::InvalidConfig`] for invalid fit settings
pub fn run_station(
    station: &str,
    file: &StationFile,
    config: &IdfConfig,
) -> Result<StationIdf, IdfError> {
    let series = file.series();
    if series.is_empty() {
        return Err(IdfError::data_integrity(
            station,
            "no complete months left after cleaning",
        ));
    }

    let monthly_means = MonthlyMeans::from_daily(series.years(), series.months(), series.precip())
        .map_err(|e| IdfError::data_integrity(station, e.to_string()))?;
    let scheme = resolve_scheme(&monthly_means);
    debug!(station, %scheme, "accounting scheme resolved");

    let annual_maxima =
        extract_annual_maxima(series.years(), series.months(), series.precip(), &scheme)
            .map_err(|e| IdfError::data_integrity(station, e.to_string()))?;
    if annual_maxima.is_empty() {
        return Err(IdfError::data_integrity(
            station,
            "no accounting year with positive rainfall",
        ));
    }

    let values: Vec<f64> = annual_maxima.iter().map(|m| m.value).collect();
    let fit = fit_gev(&values, config.fit()).map_err(|e| IdfError::from_gev(station, &e))?;

    let return_periods = return_period_table(&fit.params());
    let intensities = intensity_matrix(&return_periods, config.coefficients(), file.metadata());

    info!(
        station,
        city = file.metadata().name(),
        %scheme,
        n_years = annual_maxima.len(),
        shape = fit.params().shape(),
        loc = fit.params().loc(),
        scale = fit.params().scale(),
        "station analysed"
    );

    Ok(StationIdf {
        station: station.to_string(),
        metadata: file.metadata().clone(),
        monthly_means,
        scheme,
        annual_maxima,
        fit,
        return_periods,
        intensities,
    })
}

/// Loads a station file through `cache` and runs [`run_station`].
///
/// The station identifier is taken from the file name.
///
/// # Errors
///
/// Returns [`IdfError::Parse`] if the file cannot be read or parsed, plus
/// the errors of [`run_station`].
pub fn run_station_file(
    path: &Path,
    cache: &StationCache,
    config: &IdfConfig,
) -> Result<StationIdf, IdfError> {
    let station = station_code(path);
    let file = cache
        .load(path)
        .map_err(|e| IdfError::from_io(&station, &e))?;
    run_station(&station, &file, config)
}
