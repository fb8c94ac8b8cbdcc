//! Parameters of the one-factor lognormal diffusion.

use super::error::ParameterError;

/// Immutable parameters for lognormal (GBM) path simulation.
///
/// # Model
///
/// Under the risk-neutral measure the asset follows:
/// ```text
/// dS = r S dt + σ S dW
/// ```
///
/// Rate and volatility are constant over the life of the contract; the
/// expiry is divided into `steps` equal sub-intervals.
///
/// # Invariants
///
/// - spot > 0 and finite
/// - rate finite
/// - volatility ≥ 0 and finite
/// - expiry > 0 and finite
/// - steps ≥ 1
///
/// Construction goes through [`ModelParameters::new`], so a value of this type
/// always satisfies them.
///
/// # Examples
///
/// ```rust
/// use exotic_core::types::ModelParameters;
///
/// let params = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 252).unwrap();
/// assert_eq!(params.spot(), 100.0);
/// assert!((params.time_step() - 1.0 / 252.0).abs() < 1e-15);
///
/// assert!(ModelParameters::new(100.0, 0.05, 0.2, 0.0, 252).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawModelParameters"))]
pub struct ModelParameters {
    spot: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    steps: usize,
}

impl ModelParameters {
    /// Creates validated model parameters.
    ///
    /// # Arguments
    ///
    /// * `spot` - Initial asset level S₀
    /// * `rate` - Continuously compounded risk-free rate (annualised)
    /// * `volatility` - Lognormal volatility σ (annualised)
    /// * `expiry` - Time to expiry T in years
    /// * `steps` - Number of equal time steps on the simulation grid
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidParameter`] naming the first field
    /// that violates its invariant.
    pub fn new(
        spot: f64,
        rate: f64,
        volatility: f64,
        expiry: f64,
        steps: usize,
    ) -> Result<Self, ParameterError> {
        let params = Self {
            spot,
            rate,
            volatility,
            expiry,
            steps,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidParameter`] for the first violation.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(ParameterError::invalid(
                "spot",
                format!("must be positive and finite, got {}", self.spot),
            ));
        }
        if !self.rate.is_finite() {
            return Err(ParameterError::invalid(
                "rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(ParameterError::invalid(
                "volatility",
                format!("must be non-negative and finite, got {}", self.volatility),
            ));
        }
        if !(self.expiry.is_finite() && self.expiry > 0.0) {
            return Err(ParameterError::invalid(
                "expiry",
                format!("must be positive and finite, got {}", self.expiry),
            ));
        }
        if self.steps == 0 {
            return Err(ParameterError::invalid("steps", "must be at least 1, got 0"));
        }
        Ok(())
    }

    /// Initial asset level S₀.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Expiry T in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Number of time steps on the simulation grid.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Length of one time step, T / steps.
    #[inline]
    pub fn time_step(&self) -> f64 {
        self.expiry / self.steps as f64
    }

    /// Risk-neutral discount factor exp(−r·T) from expiry to today.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Returns a copy with a different number of steps.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidParameter`] if `steps` is zero.
    pub fn with_steps(self, steps: usize) -> Result<Self, ParameterError> {
        Self::new(self.spot, self.rate, self.volatility, self.expiry, steps)
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.05,
            volatility: 0.2,
            expiry: 1.0,
            steps: 1,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawModelParameters {
    spot: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    steps: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawModelParameters> for ModelParameters {
    type Error = ParameterError;

    fn try_from(raw: RawModelParameters) -> Result<Self, Self::Error> {
        Self::new(raw.spot, raw.rate, raw.volatility, raw.expiry, raw.steps)
    }
}
