//! Payoff construction errors.

use thiserror::Error;

/// Error raised when building or validating a payoff.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PayoffError {
    /// The contract terms are unusable.
    #[error("Invalid {payoff} terms: {reason}")]
    InvalidTerms {
        /// Payoff name
        payoff: &'static str,
        /// Description of the problem
        reason: String,
    },

    /// No builder is registered under the requested name.
    #[error("Unknown payoff '{0}'")]
    UnknownPayoff(String),

    /// The builder received the wrong number of arguments.
    #[error("Payoff '{name}' expects {expected} argument(s), got {actual}")]
    WrongArity {
        /// Requested name
        name: String,
        /// Arguments the builder takes
        expected: usize,
        /// Arguments supplied
        actual: usize,
    },
}

impl PayoffError {
    /// Shorthand for [`PayoffError::InvalidTerms`].
    pub fn invalid(payoff: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTerms {
            payoff,
            reason: reason.into(),
        }
    }
}
