//! Payoff variants and their evaluation.

use serde::Serialize;
use std::fmt;

use super::error::PayoffError;

/// How much of the path a payoff observes.
///
/// Lets the engine request a single terminal draw instead of a full path for
/// payoffs that only look at expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathShape {
    /// Only the terminal level; the path has length 1.
    Terminal,
    /// Every level on the time grid; the path has length `steps`.
    Full,
}

/// Contract payoff as a flat value type.
///
/// Each variant carries its own terms. `Payoff` is `Copy`, so an engine or a
/// worker obtains an independently owned instance by plain copy; evaluation
/// holds no state.
///
/// # Boundary policy
///
/// [`Payoff::DoubleDigital`] pays when `lower < S < upper`. A terminal level
/// exactly on either barrier pays nothing.
///
/// # Examples
///
/// ```rust
/// use exotic_engine::payoff::Payoff;
///
/// let call = Payoff::call(100.0);
/// assert_eq!(call.evaluate_spot(110.0), 10.0);
///
/// let corridor = Payoff::double_digital(90.0, 110.0, 1.0);
/// assert_eq!(corridor.evaluate_spot(100.0), 1.0);
/// assert_eq!(corridor.evaluate_spot(110.0), 0.0);
///
/// let asian = Payoff::asian_call(100.0);
/// assert_eq!(asian.evaluate(&[90.0, 110.0, 130.0]), 10.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Payoff {
    /// max(S_T − K, 0)
    Call {
        /// Strike K
        strike: f64,
    },
    /// max(K − S_T, 0)
    Put {
        /// Strike K
        strike: f64,
    },
    /// `payout` if lower < S_T < upper, else 0
    DoubleDigital {
        /// Lower barrier (exclusive)
        lower: f64,
        /// Upper barrier (exclusive)
        upper: f64,
        /// Fixed cash amount
        payout: f64,
    },
    /// max(mean(S_t₁..S_tₙ) − K, 0)
    AsianCall {
        /// Strike K
        strike: f64,
    },
    /// max(K − mean(S_t₁..S_tₙ), 0)
    AsianPut {
        /// Strike K
        strike: f64,
    },
}

impl Payoff {
    /// Vanilla call.
    #[inline]
    pub fn call(strike: f64) -> Self {
        Self::Call { strike }
    }

    /// Vanilla put.
    #[inline]
    pub fn put(strike: f64) -> Self {
        Self::Put { strike }
    }

    /// Double digital with exclusive barriers.
    #[inline]
    pub fn double_digital(lower: f64, upper: f64, payout: f64) -> Self {
        Self::DoubleDigital {
            lower,
            upper,
            payout,
        }
    }

    /// Arithmetic-average Asian call.
    #[inline]
    pub fn asian_call(strike: f64) -> Self {
        Self::AsianCall { strike }
    }

    /// Arithmetic-average Asian put.
    #[inline]
    pub fn asian_put(strike: f64) -> Self {
        Self::AsianPut { strike }
    }

    /// Returns an independently owned copy.
    #[inline]
    pub fn duplicate(&self) -> Self {
        *self
    }

    /// Path observations this payoff needs.
    #[inline]
    pub fn path_shape(&self) -> PathShape {
        match self {
            Self::Call { .. } | Self::Put { .. } | Self::DoubleDigital { .. } => {
                PathShape::Terminal
            }
            Self::AsianCall { .. } | Self::AsianPut { .. } => PathShape::Full,
        }
    }

    /// Short identifier, matching the standard registry names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Call { .. } => "call",
            Self::Put { .. } => "put",
            Self::DoubleDigital { .. } => "double-digital",
            Self::AsianCall { .. } => "asian-call",
            Self::AsianPut { .. } => "asian-put",
        }
    }

    /// Checks the contract terms.
    ///
    /// # Errors
    ///
    /// Returns [`PayoffError::InvalidTerms`] for a negative or non-finite
    /// strike, barriers that are non-finite or not strictly ordered, or a
    /// non-finite payout.
    pub fn validate(&self) -> Result<(), PayoffError> {
        match *self {
            Self::Call { strike }
            | Self::Put { strike }
            | Self::AsianCall { strike }
            | Self::AsianPut { strike } => {
                if !(strike.is_finite() && strike >= 0.0) {
                    return Err(PayoffError::invalid(
                        self.name(),
                        format!("strike must be non-negative and finite, got {}", strike),
                    ));
                }
            }
            Self::DoubleDigital {
                lower,
                upper,
                payout,
            } => {
                if !(lower.is_finite() && upper.is_finite()) {
                    return Err(PayoffError::invalid(
                        self.name(),
                        format!("barriers must be finite, got [{}, {}]", lower, upper),
                    ));
                }
                if lower >= upper {
                    return Err(PayoffError::invalid(
                        self.name(),
                        format!("lower barrier {} must be below upper {}", lower, upper),
                    ));
                }
                if !payout.is_finite() {
                    return Err(PayoffError::invalid(
                        self.name(),
                        format!("payout must be finite, got {}", payout),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Evaluates the payoff on a single level.
    ///
    /// For Asian variants the level is treated as a one-point path.
    #[inline]
    pub fn evaluate_spot(&self, spot: f64) -> f64 {
        match *self {
            Self::Call { strike } | Self::AsianCall { strike } => (spot - strike).max(0.0),
            Self::Put { strike } | Self::AsianPut { strike } => (strike - spot).max(0.0),
            Self::DoubleDigital {
                lower,
                upper,
                payout,
            } => {
                if spot > lower && spot < upper {
                    payout
                } else {
                    0.0
                }
            }
        }
    }

    /// Evaluates the payoff on a simulated path.
    ///
    /// Terminal variants read the last level; Asian variants average every
    /// level. An empty path evaluates to zero.
    #[inline]
    pub fn evaluate(&self, path: &[f64]) -> f64 {
        let Some(&terminal) = path.last() else {
            return 0.0;
        };
        match *self {
            Self::Call { .. } | Self::Put { .. } | Self::DoubleDigital { .. } => {
                self.evaluate_spot(terminal)
            }
            Self::AsianCall { strike } => (arithmetic_mean(path) - strike).max(0.0),
            Self::AsianPut { strike } => (strike - arithmetic_mean(path)).max(0.0),
        }
    }
}

impl fmt::Display for Payoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Call { strike }
            | Self::Put { strike }
            | Self::AsianCall { strike }
            | Self::AsianPut { strike } => write!(f, "{}(K={})", self.name(), strike),
            Self::DoubleDigital {
                lower,
                upper,
                payout,
            } => write!(f, "{}({}, {}; {})", self.name(), lower, upper, payout),
        }
    }
}

#[inline]
fn arithmetic_mean(path: &[f64]) -> f64 {
    path.iter().sum::<f64>() / path.len() as f64
}
