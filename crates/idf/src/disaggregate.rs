//! Disaggregation of 1-day design depths into sub-daily intensities.
//!
//! A 1-day depth is converted to a 24-hour depth and then scaled by ratio
//! coefficients in three tiers:
//!
//! | Index | tc (min) | Depth |
//! |-------|----------|-------|
//! | 0 | 1440 | `h * coef[0]` |
//! | 1-6 | 720..60 | `depth[0] * coef[i]` |
//! | 7 | 30 | `depth[6] * coef[7]` |
//! | 8-12 | 25..5 | `depth[7] * coef[i]` |
//!
//! Intensities (mm/h) are depths times a per-row normalization factor.

use pluvio_io::StationMetadata;

use crate::error::IdfError;
use crate::return_period::ReturnPeriodRow;

/// Number of concentration times.
pub const N_DURATIONS: usize = 13;

/// Concentration times in minutes, in table order.
pub const CONCENTRATION_TIMES: [u32; N_DURATIONS] =
    [1440, 720, 600, 480, 360, 180, 60, 30, 25, 20, 15, 10, 5];

/// Default ratio coefficients between successive durations.
pub const DEFAULT_COEFFICIENTS: [f64; N_DURATIONS] = [
    1.14, 0.85, 0.78, 0.72, 0.54, 0.48, 0.42, 0.74, 0.91, 0.81, 0.70, 0.54, 0.34,
];

/// Depth-to-intensity factors (per hour). The entries for 600, 480, 360 and
/// 180 minutes are not `60 / tc`; they are kept as published.
pub const NORMALIZATION: [f64; N_DURATIONS] = [
    1.0 / 24.0,
    1.0 / 12.0,
    1.0 / 8.0,
    1.0 / 6.0,
    1.0 / 3.0,
    1.0 / 2.0,
    1.0,
    2.0,
    60.0 / 25.0,
    3.0,
    4.0,
    6.0,
    12.0,
];

/// Index of the 1-hour row; tiers 1-6 derive from the 24-hour row.
const HOUR_INDEX: usize = 6;
/// Index of the 30-minute row; tiers 8-12 derive from it.
const HALF_HOUR_INDEX: usize = 7;

/// Ratio coefficients for the tiered disaggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientTable {
    coef: [f64; N_DURATIONS],
}

impl Default for CoefficientTable {
    fn default() -> Self {
        Self {
            coef: DEFAULT_COEFFICIENTS,
        }
    }
}

impl CoefficientTable {
    /// Builds a table from 13 coefficients in [`CONCENTRATION_TIMES`] order.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::InvalidConfig`] unless exactly 13 finite,
    /// positive values are given.
    pub fn new(values: &[f64]) -> Result<Self, IdfError> {
        let coef: [f64; N_DURATIONS] =
            values.try_into().map_err(|_| IdfError::InvalidConfig {
                reason: format!(
                    "expected {N_DURATIONS} disaggregation coefficients, got {}",
                    values.len()
                ),
            })?;
        if let Some((i, v)) = coef
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        {
            return Err(IdfError::InvalidConfig {
                reason: format!("disaggregation coefficient {i} must be positive, got {v}"),
            });
        }
        Ok(Self { coef })
    }

    pub fn as_array(&self) -> &[f64; N_DURATIONS] {
        &self.coef
    }

    /// Depths in mm for every concentration time, from a 1-day depth.
    pub fn depths(&self, h_max1: f64) -> [f64; N_DURATIONS] {
        let c = &self.coef;
        let mut d = [0.0; N_DURATIONS];
        d[0] = h_max1 * c[0];
        for i in 1..=HOUR_INDEX {
            d[i] = d[0] * c[i];
        }
        d[HALF_HOUR_INDEX] = d[HOUR_INDEX] * c[HALF_HOUR_INDEX];
        for i in HALF_HOUR_INDEX + 1..N_DURATIONS {
            d[i] = d[HALF_HOUR_INDEX] * c[i];
        }
        d
    }

    /// Intensities in mm/h for every concentration time.
    pub fn intensities(&self, h_max1: f64) -> [f64; N_DURATIONS] {
        let mut out = self.depths(h_max1);
        for (v, norm) in out.iter_mut().zip(NORMALIZATION) {
            *v *= norm;
        }
        out
    }
}

/// One cell of the intensity-duration-frequency matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityRow {
    /// Concentration time in minutes.
    pub tc_min: u32,
    /// Return period in years.
    pub return_period: u32,
    /// Rainfall intensity in mm/h.
    pub intensity_mm_h: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub city: String,
}

/// Full intensity matrix, ordered by return period then concentration time.
pub fn intensity_matrix(
    rows: &[ReturnPeriodRow],
    coefficients: &CoefficientTable,
    metadata: &StationMetadata,
) -> Vec<IntensityRow> {
    let mut out = Vec::with_capacity(rows.len() * N_DURATIONS);
    for row in rows {
        let intensities = coefficients.intensities(row.depth_mm);
        for (&tc_min, intensity_mm_h) in CONCENTRATION_TIMES.iter().zip(intensities) {
            out.push(IntensityRow {
                tc_min,
                return_period: row.return_period,
                intensity_mm_h,
                latitude: metadata.latitude(),
                longitude: metadata.longitude(),
                altitude: metadata.altitude(),
                city: metadata.name().to_string(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tiering_from_100mm() {
        let t = CoefficientTable::default();
        let c = DEFAULT_COEFFICIENTS;
        let d = t.depths(100.0);

        assert_relative_eq!(d[0], 114.0, epsilon = 1e-9);
        for i in 1..=6 {
            assert_relative_eq!(d[i], 100.0 * c[0] * c[i], epsilon = 1e-9);
        }
        assert_relative_eq!(d[7], d[6] * c[7], epsilon = 1e-12);
        for i in 8..13 {
            assert_relative_eq!(d[i], d[7] * c[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn one_hour_and_five_minute_values() {
        let d = CoefficientTable::default().depths(100.0);
        // 100 * 1.14 * 0.42
        assert_relative_eq!(d[6], 47.88, epsilon = 1e-9);
        // 47.88 * 0.74 * 0.34
        assert_relative_eq!(d[12], 47.88 * 0.74 * 0.34, epsilon = 1e-9);
    }

    #[test]
    fn intensities_apply_normalization() {
        let t = CoefficientTable::default();
        let d = t.depths(80.0);
        let i = t.intensities(80.0);
        assert_relative_eq!(i[0], d[0] / 24.0, epsilon = 1e-12);
        assert_relative_eq!(i[6], d[6], epsilon = 1e-12);
        assert_relative_eq!(i[8], d[8] * 60.0 / 25.0, epsilon = 1e-12);
        assert_relative_eq!(i[12], d[12] * 12.0, epsilon = 1e-12);
    }

    #[test]
    fn custom_coefficients() {
        let t = CoefficientTable::new(&[1.0; 13]).unwrap();
        assert!(t.depths(50.0).iter().all(|&d| (d - 50.0).abs() < 1e-12));
    }

    #[test]
    fn rejects_wrong_length_and_non_positive() {
        assert!(matches!(
            CoefficientTable::new(&[1.0; 12]),
            Err(IdfError::InvalidConfig { .. })
        ));
        let mut values = DEFAULT_COEFFICIENTS;
        values[3] = 0.0;
        let err = CoefficientTable::new(&values).unwrap_err();
        assert!(err.to_string().contains("coefficient 3"));
    }

    #[test]
    fn matrix_ordered_by_return_period_then_duration() {
        use chrono::NaiveDate;
        let d = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let meta = StationMetadata::new("CIDADE", -10.0, -40.0, 500.0, d, d);
        let rows = [
            ReturnPeriodRow {
                return_period: 2,
                exceedance_probability: 0.5,
                depth_mm: 60.0,
            },
            ReturnPeriodRow {
                return_period: 5,
                exceedance_probability: 0.2,
                depth_mm: 80.0,
            },
        ];
        let m = intensity_matrix(&rows, &CoefficientTable::default(), &meta);
        assert_eq!(m.len(), 26);
        assert_eq!((m[0].return_period, m[0].tc_min), (2, 1440));
        assert_eq!((m[12].return_period, m[12].tc_min), (2, 5));
        assert_eq!((m[13].return_period, m[13].tc_min), (5, 1440));
        assert_eq!(m[25].city, "CIDADE");
        assert_relative_eq!(m[25].altitude, 500.0);
    }
}
