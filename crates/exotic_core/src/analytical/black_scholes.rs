//! Black-Scholes closed-form prices.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//! **Double Digital**: D = A·e^(-rT)·(N(d₂(L)) - N(d₂(U)))
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use crate::math::norm_cdf;
use crate::types::{ModelParameters, ParameterError};

/// Black-Scholes model for European payoffs on a single lognormal asset.
///
/// # Examples
/// ```
/// use exotic_core::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `spot` must be positive and finite
    /// - `volatility` must be positive and finite
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, ParameterError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(ParameterError::invalid(
                "spot",
                format!("must be positive and finite, got {}", spot),
            ));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(ParameterError::invalid(
                "volatility",
                format!("must be positive for closed-form pricing, got {}", volatility),
            ));
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Builds the model from simulation parameters.
    ///
    /// # Errors
    /// Fails when the parameters carry zero volatility.
    pub fn from_params(params: &ModelParameters) -> Result<Self, ParameterError> {
        Self::new(params.spot(), params.rate(), params.volatility())
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        ((self.spot / strike).ln() + (self.rate + 0.5 * self.volatility * self.volatility) * expiry)
            / vol_sqrt_t
    }

    /// d₂ = d₁ − σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price. Returns intrinsic value when `expiry` is not positive.
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= 0.0 {
            return (self.spot - strike).max(0.0);
        }
        let discount = (-self.rate * expiry).exp();
        self.spot * norm_cdf(self.d1(strike, expiry))
            - strike * discount * norm_cdf(self.d2(strike, expiry))
    }

    /// European put price. Returns intrinsic value when `expiry` is not positive.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        if expiry <= 0.0 {
            return (strike - self.spot).max(0.0);
        }
        let discount = (-self.rate * expiry).exp();
        strike * discount * norm_cdf(-self.d2(strike, expiry))
            - self.spot * norm_cdf(-self.d1(strike, expiry))
    }

    /// Price of `payout` paid when the terminal level lies strictly between
    /// `lower` and `upper`.
    pub fn price_double_digital(&self, lower: f64, upper: f64, payout: f64, expiry: f64) -> f64 {
        if expiry <= 0.0 {
            return if self.spot > lower && self.spot < upper {
                payout
            } else {
                0.0
            };
        }
        let discount = (-self.rate * expiry).exp();
        let in_range = norm_cdf(self.d2(lower, expiry)) - norm_cdf(self.d2(upper, expiry));
        payout * discount * in_range.max(0.0)
    }
}

/// Black-Scholes European call price.
///
/// # Examples
/// ```
/// use exotic_core::analytical::black_scholes_call;
///
/// let price = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
pub fn black_scholes_call(spot: f64, strike: f64, rate: f64, volatility: f64, expiry: f64) -> f64 {
    match BlackScholes::new(spot, rate, volatility) {
        Ok(model) => model.price_call(strike, expiry),
        Err(_) => f64::NAN,
    }
}

/// Black-Scholes European put price.
pub fn black_scholes_put(spot: f64, strike: f64, rate: f64, volatility: f64, expiry: f64) -> f64 {
    match BlackScholes::new(spot, rate, volatility) {
        Ok(model) => model.price_put(strike, expiry),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_atm_call_reference_value() {
        // Hull, Options Futures and Other Derivatives: S=K=100, r=5%, σ=20%, T=1
        let price = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
        assert_relative_eq!(price, 10.450583572185565, epsilon = 1e-4);
    }

    #[test]
    fn test_atm_put_reference_value() {
        let price = black_scholes_put(100.0, 100.0, 0.05, 0.2, 1.0);
        assert_relative_eq!(price, 5.573526022256971, epsilon = 1e-4);
    }

    #[test]
    fn test_put_call_parity() {
        let bs = BlackScholes::new(105.0, 0.03, 0.25).unwrap();
        for strike in [80.0, 100.0, 120.0] {
            let lhs = bs.price_call(strike, 0.75) - bs.price_put(strike, 0.75);
            let rhs = 105.0 - strike * (-0.03_f64 * 0.75).exp();
            assert_relative_eq!(lhs, rhs, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_double_digital_bounds() {
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        let price = bs.price_double_digital(90.0, 110.0, 1.0, 1.0);
        assert!(price > 0.0 && price < (-0.05_f64).exp());

        // Widening the corridor increases the price
        let wider = bs.price_double_digital(80.0, 120.0, 1.0, 1.0);
        assert!(wider > price);
    }

    #[test]
    fn test_zero_volatility_rejected() {
        assert!(BlackScholes::new(100.0, 0.05, 0.0).is_err());
        assert!(black_scholes_call(100.0, 100.0, 0.05, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_expired_returns_intrinsic() {
        let bs = BlackScholes::new(110.0, 0.05, 0.2).unwrap();
        assert_eq!(bs.price_call(100.0, 0.0), 10.0);
        assert_eq!(bs.price_put(100.0, 0.0), 0.0);
        assert_eq!(bs.price_double_digital(100.0, 120.0, 2.0, 0.0), 2.0);
    }
}
