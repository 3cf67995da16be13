//! Design depths for fixed return periods.

use pluvio_gev::GevParams;

/// Return periods in years, ascending.
pub const RETURN_PERIODS: [u32; 11] = [2, 5, 10, 15, 20, 25, 50, 100, 250, 500, 1000];

/// Design 1-day depth for one return period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPeriodRow {
    /// Return period Tr in years.
    pub return_period: u32,
    /// Annual exceedance probability, `1 / Tr`.
    pub exceedance_probability: f64,
    /// Design depth in mm.
    pub depth_mm: f64,
}

/// Depth exceeded on average once every `return_period` years.
pub fn design_depth(params: &GevParams, return_period: u32) -> f64 {
    params.quantile(1.0 - 1.0 / f64::from(return_period))
}

/// One row per entry of [`RETURN_PERIODS`].
pub fn return_period_table(params: &GevParams) -> Vec<ReturnPeriodRow> {
    RETURN_PERIODS
        .iter()
        .map(|&tr| ReturnPeriodRow {
            return_period: tr,
            exceedance_probability: 1.0 / f64::from(tr),
            depth_mm: design_depth(params, tr),
        })
        .collect()
}
