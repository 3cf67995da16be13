//! Error types for the pluvio-gev crate.

/// Error type for all fallible operations in the pluvio-gev crate.
///
/// Covers sample validation, optimizer failures and invalid configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GevError {
    /// Returned when no usable (finite, positive) values remain.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the sample is too short for a three-parameter fit.
    #[error("insufficient data: got {n} values, need at least {min}")]
    InsufficientData {
        /// Number of usable values.
        n: usize,
        /// Minimum number of values required.
        min: usize,
    },

    /// Returned when all values are (numerically) identical.
    #[error("input data is constant ({distinct} distinct value)")]
    ConstantData {
        /// Number of distinct values found.
        distinct: usize,
    },

    /// Returned when the optimizer could not be set up or run.
    #[error("optimisation failed: {reason}")]
    OptimizationFailed {
        /// Description of the failure.
        reason: String,
    },

    /// Returned when the optimizer hit its iteration limit.
    #[error("optimisation did not converge after {iterations} iterations")]
    NotConverged {
        /// Iterations performed.
        iterations: u64,
    },

    /// Returned when a parameter triple is not a valid GEV distribution.
    #[error("invalid GEV parameters (shape={shape}, loc={loc}, scale={scale})")]
    InvalidParams {
        /// Shape parameter.
        shape: f64,
        /// Location parameter.
        loc: f64,
        /// Scale parameter.
        scale: f64,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_data() {
        assert_eq!(GevError::EmptyData.to_string(), "input data is empty");
    }

    #[test]
    fn error_insufficient_data() {
        let err = GevError::InsufficientData { n: 2, min: 3 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 2 values, need at least 3"
        );
    }

    #[test]
    fn error_constant_data() {
        let err = GevError::ConstantData { distinct: 1 };
        assert_eq!(err.to_string(), "input data is constant (1 distinct value)");
    }

    #[test]
    fn error_optimization_failed() {
        let err = GevError::OptimizationFailed {
            reason: "no best parameter".to_string(),
        };
        assert_eq!(err.to_string(), "optimisation failed: no best parameter");
    }

    #[test]
    fn error_not_converged() {
        let err = GevError::NotConverged { iterations: 5000 };
        assert_eq!(
            err.to_string(),
            "optimisation did not converge after 5000 iterations"
        );
    }

    #[test]
    fn error_invalid_params() {
        let err = GevError::InvalidParams {
            shape: 0.1,
            loc: 50.0,
            scale: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid GEV parameters (shape=0.1, loc=50, scale=-1)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<GevError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<GevError>();
    }
}
