//! Error types for the Monte Carlo engine.
//!
//! [`ConfigError`] is raised while building a [`MonteCarloConfig`]; an
//! [`EngineError`] is raised by a pricing call before any path is simulated.
//! Faults during simulation are not errors: they end the run with
//! [`RunStatus::Faulted`](super::RunStatus::Faulted).
//!
//! [`MonteCarloConfig`]: super::MonteCarloConfig

use thiserror::Error;

use exotic_core::ParameterError;

use crate::payoff::PayoffError;
use crate::rng::SeedError;

/// Configuration error for the Monte Carlo engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Invalid parameter value with name and description.
    #[error("Invalid configuration '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Error returned by a pricing call before simulation starts.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// A model or run parameter is out of range.
    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),

    /// A worker seed is rejected by the generator.
    #[error(transparent)]
    SeedInvalid(#[from] SeedError),

    /// The payoff cannot be built or has invalid terms.
    #[error(transparent)]
    Payoff(#[from] PayoffError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidParameter {
            name: "convergence_ratio",
            value: "must be at least 2, got 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration 'convergence_ratio': must be at least 2, got 1"
        );
    }

    #[test]
    fn test_engine_error_from() {
        let err: EngineError = ParameterError::invalid("path_count", "must be at least 1").into();
        assert!(matches!(err, EngineError::InvalidParameter(_)));
        assert!(err.to_string().contains("path_count"));

        let err: EngineError = SeedError::SeedInvalid {
            seed: 0,
            min: 1,
            max: 2,
        }
        .into();
        assert!(matches!(err, EngineError::SeedInvalid(_)));

        let err: EngineError = PayoffError::UnknownPayoff("x".to_string()).into();
        assert!(matches!(err, EngineError::Payoff(_)));
    }
}
