//! Configuration for GEV fitting.

use crate::error::GevError;

/// Settings for the maximum-likelihood fit and the diagnostic sample.
///
/// # Example
///
/// ```
/// use pluvio_gev::FitConfig;
///
/// let config = FitConfig::new()
///     .with_max_iters(2000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FitConfig {
    max_iters: u64,
    sd_tolerance: f64,
    n_samples: usize,
    seed: u64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FitConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `max_iters = 5000`, `sd_tolerance = 1e-10`,
    /// `n_samples = 100`, `seed = 42`.
    pub fn new() -> Self {
        Self {
            max_iters: 5000,
            sd_tolerance: 1e-10,
            n_samples: 100,
            seed: 42,
        }
    }

    /// Sets the Nelder-Mead iteration limit.
    pub fn with_max_iters(mut self, n: u64) -> Self {
        self.max_iters = n;
        self
    }

    /// Sets the simplex cost standard-deviation tolerance.
    pub fn with_sd_tolerance(mut self, tol: f64) -> Self {
        self.sd_tolerance = tol;
        self
    }

    /// Sets the number of diagnostic samples drawn from the fit.
    pub fn with_n_samples(mut self, n: usize) -> Self {
        self.n_samples = n;
        self
    }

    /// Sets the RNG seed for the diagnostic sample.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Nelder-Mead iteration limit.
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Simplex cost standard-deviation tolerance.
    pub fn sd_tolerance(&self) -> f64 {
        self.sd_tolerance
    }

    /// Number of diagnostic samples.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// RNG seed for the diagnostic sample.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GevError::InvalidConfig`] if `max_iters` is zero or
    /// `sd_tolerance` is not finite and positive.
    pub fn validate(&self) -> Result<(), GevError> {
        if self.max_iters == 0 {
            return Err(GevError::InvalidConfig {
                reason: "max_iters must be greater than 0".to_string(),
            });
        }
        if !self.sd_tolerance.is_finite() || self.sd_tolerance <= 0.0 {
            return Err(GevError::InvalidConfig {
                reason: format!(
                    "sd_tolerance must be finite and positive, got {}",
                    self.sd_tolerance
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = FitConfig::new();
        assert_eq!(c.max_iters(), 5000);
        assert_eq!(c.sd_tolerance(), 1e-10);
        assert_eq!(c.n_samples(), 100);
        assert_eq!(c.seed(), 42);
        assert_eq!(c, FitConfig::default());
    }

    #[test]
    fn builder_methods() {
        let c = FitConfig::new()
            .with_max_iters(10)
            .with_sd_tolerance(1e-6)
            .with_n_samples(5)
            .with_seed(1);
        assert_eq!(c.max_iters(), 10);
        assert_eq!(c.sd_tolerance(), 1e-6);
        assert_eq!(c.n_samples(), 5);
        assert_eq!(c.seed(), 1);
    }

    #[test]
    fn validate_zero_iters() {
        let err = FitConfig::new().with_max_iters(0).validate().unwrap_err();
        assert!(matches!(err, GevError::InvalidConfig { .. }));
    }

    #[test]
    fn validate_bad_tolerance() {
        assert!(FitConfig::new().with_sd_tolerance(0.0).validate().is_err());
        assert!(FitConfig::new().with_sd_tolerance(f64::NAN).validate().is_err());
    }
}
