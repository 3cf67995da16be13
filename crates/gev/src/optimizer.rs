//! Nelder-Mead optimizer for GEV maximum-likelihood estimation.
//!
//! Wraps the `argmin` crate to minimize the negative log-likelihood over
//! `(shape, loc, ln scale)`, so the scale stays positive without bounds.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor, State, TerminationReason};
use argmin::solver::neldermead::NelderMead;
use statrs::function::gamma::gamma;
use tracing::debug;

use crate::config::FitConfig;
use crate::error::GevError;
use crate::params::GevParams;

/// Euler-Mascheroni constant.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Maximum-likelihood estimate returned by [`maximize_likelihood`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct MleEstimate {
    pub(crate) params: GevParams,
    pub(crate) log_likelihood: f64,
    pub(crate) iterations: u64,
}

/// Hosking's L-moment estimator, used as the optimizer's starting point.
///
/// Returns `None` when the sample L-skewness is unusable or the resulting
/// parameters are not a valid distribution.
pub(crate) fn l_moment_start(data: &[f64]) -> Option<GevParams> {
    let lm = pluvio_stats::l_moments(data)?;
    let t3 = lm.t3()?;

    let z = 2.0 / (3.0 + t3) - 2.0_f64.ln() / 3.0_f64.ln();
    let k = 7.8590 * z + 2.9554 * z * z;

    if k.abs() < 1e-8 {
        let scale = lm.l2 / 2.0_f64.ln();
        return GevParams::new(0.0, lm.l1 - EULER_GAMMA * scale, scale);
    }
    if k <= -1.0 {
        return None;
    }

    let g = gamma(1.0 + k);
    let scale = lm.l2 * k / ((1.0 - 2.0_f64.powf(-k)) * g);
    let loc = lm.l1 - scale * (1.0 - g) / k;
    GevParams::new(k, loc, scale)
}

/// Gumbel method-of-moments starting point. Its support is the whole real
/// line, so the likelihood is finite for any sample.
pub(crate) fn gumbel_start(data: &[f64]) -> Option<GevParams> {
    let scale = pluvio_stats::sd(data) * 6.0_f64.sqrt() / std::f64::consts::PI;
    let loc = pluvio_stats::mean(data) - EULER_GAMMA * scale;
    GevParams::new(0.0, loc, scale)
}

/// Fits the GEV by exact MLE with Nelder-Mead.
///
/// Data must already be validated (finite, positive, at least 3 values, not
/// constant).
pub(crate) fn maximize_likelihood(
    data: &[f64],
    config: &FitConfig,
) -> Result<MleEstimate, GevError> {
    let start = l_moment_start(data)
        .filter(|p| p.log_likelihood(data).is_finite())
        .or_else(|| gumbel_start(data))
        .ok_or_else(|| GevError::OptimizationFailed {
            reason: "no valid starting point".to_string(),
        })?;
    debug!(
        shape = start.shape(),
        loc = start.loc(),
        scale = start.scale(),
        "GEV starting point"
    );

    let x0 = vec![start.shape(), start.loc(), start.scale().ln()];
    let steps = [0.1, 0.25 * start.scale(), 0.1];
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(4);
    simplex.push(x0.clone());
    for (i, step) in steps.iter().enumerate() {
        let mut vertex = x0.clone();
        vertex[i] += step;
        simplex.push(vertex);
    }

    let cost = GevCost { data };
    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(config.sd_tolerance())
        .map_err(|e| GevError::OptimizationFailed {
            reason: e.to_string(),
        })?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(config.max_iters()))
        .run()
        .map_err(|e| GevError::OptimizationFailed {
            reason: e.to_string(),
        })?;

    let state = result.state();
    let iterations = state.get_iter();
    if matches!(
        state.get_termination_reason(),
        Some(TerminationReason::MaxItersReached)
    ) {
        return Err(GevError::NotConverged { iterations });
    }

    let best = state
        .best_param
        .as_ref()
        .ok_or_else(|| GevError::OptimizationFailed {
            reason: "optimizer returned no parameters".to_string(),
        })?;

    let params = GevParams::try_new(best[0], best[1], best[2].exp())?;
    let log_likelihood = params.log_likelihood(data);
    if !log_likelihood.is_finite() {
        return Err(GevError::OptimizationFailed {
            reason: "log-likelihood at optimum is not finite".to_string(),
        });
    }

    Ok(MleEstimate {
        params,
        log_likelihood,
        iterations,
    })
}

/// Cost function for argmin: negative log-likelihood.
struct GevCost<'a> {
    data: &'a [f64],
}

impl CostFunction for GevCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let Some(gev) = GevParams::new(params[0], params[1], params[2].exp()) else {
            return Ok(f64::MAX);
        };
        let loglik = gev.log_likelihood(self.data);
        if loglik.is_finite() {
            Ok(-loglik)
        } else {
            Ok(f64::MAX)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn gev_sample(params: GevParams, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        (0..n).map(|_| params.sample(&mut rng)).collect()
    }

    #[test]
    fn l_moment_start_recovers_shape_sign() {
        let truth = GevParams::new(-0.15, 60.0, 15.0).unwrap();
        let data = gev_sample(truth, 2000, 1);
        let start = l_moment_start(&data).unwrap();
        assert!(start.shape() < 0.0, "shape = {}", start.shape());
        assert!((start.loc() - 60.0).abs() < 3.0, "loc = {}", start.loc());
        assert!((start.scale() - 15.0).abs() < 2.0, "scale = {}", start.scale());
    }

    #[test]
    fn l_moment_start_constant_is_none() {
        assert!(l_moment_start(&[3.0, 3.0, 3.0]).is_none());
    }

    #[test]
    fn gumbel_start_is_finite_everywhere() {
        let data = [10.0, 20.0, 30.0, 200.0];
        let start = gumbel_start(&data).unwrap();
        assert_eq!(start.shape(), 0.0);
        assert!(start.log_likelihood(&data).is_finite());
    }

    #[test]
    fn mle_improves_on_start() {
        let truth = GevParams::new(0.1, 80.0, 20.0).unwrap();
        let data = gev_sample(truth, 200, 7);
        let start = l_moment_start(&data).unwrap();
        let est = maximize_likelihood(&data, &FitConfig::new()).unwrap();
        assert!(est.log_likelihood >= start.log_likelihood(&data) - 1e-9);
        assert!(est.iterations > 0);
    }

    #[test]
    fn iteration_limit_is_reported() {
        let truth = GevParams::new(0.1, 80.0, 20.0).unwrap();
        let data = gev_sample(truth, 50, 3);
        let config = FitConfig::new().with_max_iters(2);
        let err = maximize_likelihood(&data, &config).unwrap_err();
        assert!(matches!(err, GevError::NotConverged { .. }));
    }
}
