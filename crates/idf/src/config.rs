//! Pipeline configuration.

use pluvio_gev::FitConfig;

use crate::disaggregate::CoefficientTable;
use crate::error::IdfError;

/// Configuration for the per-station pipeline and batch runner.
///
/// # Example
///
/// ```
/// use pluvio_gev::FitConfig;
/// use pluvio_idf::IdfConfig;
///
/// let config = IdfConfig::new()
///     .with_fit(FitConfig::new().with_seed(7))
///     .with_threads(Some(2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdfConfig {
    fit: FitConfig,
    coefficients: CoefficientTable,
    /// Worker threads for batch runs; `None` uses the rayon default.
    threads: Option<usize>,
}

impl IdfConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fit(mut self, fit: FitConfig) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_coefficients(mut self, coefficients: CoefficientTable) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn fit(&self) -> &FitConfig {
        &self.fit
    }

    pub fn coefficients(&self) -> &CoefficientTable {
        &self.coefficients
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::InvalidConfig`] if the fit settings are invalid
    /// or `threads` is `Some(0)`.
    pub fn validate(&self) -> Result<(), IdfError> {
        self.fit.validate().map_err(|e| IdfError::InvalidConfig {
            reason: e.to_string(),
        })?;
        if self.threads == Some(0) {
            return Err(IdfError::InvalidConfig {
                reason: "threads must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = IdfConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.threads(), None);
        assert_eq!(config.coefficients(), &CoefficientTable::default());
    }

    #[test]
    fn zero_threads_rejected() {
        let err = IdfConfig::new().with_threads(Some(0)).validate().unwrap_err();
        assert!(err.to_string().contains("threads"));
    }

    #[test]
    fn invalid_fit_rejected() {
        let config = IdfConfig::new().with_fit(FitConfig::new().with_max_iters(0));
        assert!(matches!(
            config.validate(),
            Err(IdfError::InvalidConfig { .. })
        ));
    }
}
