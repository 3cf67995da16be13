//! Fitted GEV model and the public fitting entry point.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::FitConfig;
use crate::error::GevError;
use crate::optimizer;
use crate::params::GevParams;

/// Minimum sample size for a three-parameter fit.
pub const MIN_SAMPLE: usize = 3;

/// A GEV distribution fitted to a sample of block maxima.
#[derive(Debug, Clone)]
pub struct GevFit {
    params: GevParams,
    log_likelihood: f64,
    n: usize,
    iterations: u64,
    samples: Vec<f64>,
}

impl GevFit {
    /// Fitted parameters.
    pub fn params(&self) -> GevParams {
        self.params
    }

    /// Maximized log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Number of values the fit used.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Optimizer iterations.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Diagnostic draws from the fitted distribution, floored at 0.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Akaike Information Criterion (three free parameters).
    pub fn aic(&self) -> f64 {
        2.0 * 3.0 - 2.0 * self.log_likelihood
    }
}

/// Fits a GEV distribution to annual maxima by maximum likelihood.
///
/// Non-finite values are dropped and only strictly positive values are
/// kept. The fit is deterministic for a given `config`; the diagnostic
/// sample is drawn from an RNG seeded with `config.seed()`.
///
/// # Errors
///
/// - [`GevError::InvalidConfig`] for an invalid `config`
/// - [`GevError::EmptyData`] if no usable values remain
/// - [`GevError::InsufficientData`] for fewer than [`MIN_SAMPLE`] values
/// - [`GevError::ConstantData`] for fewer than 2 distinct values
/// - [`GevError::NotConverged`] / [`GevError::OptimizationFailed`] when the
///   optimizer does not produce a valid optimum
///
/// Short records (roughly ten maxima or fewer) can fail with
/// [`GevError::NotConverged`]: their likelihood may be unbounded as the
/// shape grows, so no iteration budget reaches an optimum. Callers get an
/// error instead of parameters from a diverging simplex.
pub fn fit_gev(values: &[f64], config: &FitConfig) -> Result<GevFit, GevError> {
    config.validate()?;

    let data: Vec<f64> = values
        .iter()
        .copied()
        .filter(|x| x.is_finite() && *x > 0.0)
        .collect();
    if data.len() < values.len() {
        debug!(
            dropped = values.len() - data.len(),
            "dropped non-finite or non-positive values"
        );
    }

    if data.is_empty() {
        return Err(GevError::EmptyData);
    }
    if data.len() < MIN_SAMPLE {
        return Err(GevError::InsufficientData {
            n: data.len(),
            min: MIN_SAMPLE,
        });
    }
    let distinct = pluvio_stats::count_distinct(&data);
    if distinct < 2 {
        return Err(GevError::ConstantData { distinct });
    }

    let est = optimizer::maximize_likelihood(&data, config)?;
    info!(
        n = data.len(),
        shape = est.params.shape(),
        loc = est.params.loc(),
        scale = est.params.scale(),
        iterations = est.iterations,
        "GEV fitted"
    );

    let mut rng = StdRng::seed_from_u64(config.seed());
    let samples = (0..config.n_samples())
        .map(|_| est.params.sample(&mut rng).max(0.0))
        .collect();

    Ok(GevFit {
        params: est.params,
        log_likelihood: est.log_likelihood,
        n: data.len(),
        iterations: est.iterations,
        samples,
    })
}
