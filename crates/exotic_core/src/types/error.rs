//! Error types for parameter validation.

use thiserror::Error;

/// Parameter validation errors.
///
/// Raised at construction or validation time for out-of-range inputs,
/// before any simulation work is attempted.
///
/// # Examples
/// ```
/// use exotic_core::types::ParameterError;
///
/// let err = ParameterError::invalid("expiry", "must be positive, got 0");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'expiry': must be positive, got 0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// A named input is outside its valid range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl ParameterError {
    /// Convenience constructor for [`ParameterError::InvalidParameter`].
    #[inline]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the name of the rejected parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}
