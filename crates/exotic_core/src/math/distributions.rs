//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//! - `inverse_norm_cdf`: Inverse CDF (quantile), used to map uniforms to deviates
//!
//! `norm_cdf` and `norm_pdf` are generic over `T: Float`.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function approximation using Horner's method.
///
/// Abramowitz and Stegun formula 7.1.26, maximum error 1.5e-7.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let zero = T::zero();
    let abs_x = x.abs();

    let a1 = T::from(0.254829592).unwrap_or_else(T::zero);
    let a2 = T::from(-0.284496736).unwrap_or_else(T::zero);
    let a3 = T::from(1.421413741).unwrap_or_else(T::zero);
    let a4 = T::from(-1.453152027).unwrap_or_else(T::zero);
    let a5 = T::from(1.061405429).unwrap_or_else(T::zero);
    let p = T::from(0.3275911).unwrap_or_else(T::zero);

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < zero {
        (one + one) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = (1/2)·erfc(−x/√2), accurate to about 1e-7.
///
/// # Examples
/// ```
/// use exotic_core::math::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(SQRT_2).unwrap_or_else(T::one);
    let half = T::from(0.5).unwrap_or_else(T::zero);
    half * erfc_approx(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// φ(x) = (1/√(2π))·exp(−x²/2)
///
/// # Examples
/// ```
/// use exotic_core::math::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::zero);
    let half = T::from(0.5).unwrap_or_else(T::zero);
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

// Beasley-Springer central region
const A: [f64; 4] = [
    2.506_628_238_84,
    -18.615_000_625_29,
    41.391_197_735_34,
    -25.441_060_496_37,
];

const B: [f64; 4] = [
    -8.473_510_930_90,
    23.083_367_437_43,
    -21.062_241_018_26,
    3.130_829_098_33,
];

// Moro tail polynomial in ln(-ln(p))
const C: [f64; 9] = [
    0.337_475_482_272_614_7,
    0.976_169_019_091_718_6,
    0.160_797_971_491_820_9,
    0.027_643_881_033_386_3,
    0.003_840_572_937_360_9,
    0.000_395_189_651_191_9,
    0.000_032_176_788_176_8,
    0.000_000_288_816_736_4,
    0.000_000_396_031_518_7,
];

/// Inverse of the standard normal CDF (Beasley-Springer-Moro).
///
/// Rational approximation in the central region |p − 0.5| < 0.42 and Moro's
/// Chebyshev polynomial in ln(−ln p) for the tails. Absolute error is about
/// 3e-9 over (1e-10, 1 − 1e-10).
///
/// Returns −∞ for p ≤ 0, +∞ for p ≥ 1 and NaN for NaN input.
///
/// # Examples
/// ```
/// use exotic_core::math::inverse_norm_cdf;
///
/// assert!(inverse_norm_cdf(0.5).abs() < 1e-12);
/// assert!((inverse_norm_cdf(0.975) - 1.959964).abs() < 1e-5);
/// ```
pub fn inverse_norm_cdf(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let y = p - 0.5;
    if y.abs() < 0.42 {
        let r = y * y;
        let numerator = y * (((A[3] * r + A[2]) * r + A[1]) * r + A[0]);
        let denominator = (((B[3] * r + B[2]) * r + B[1]) * r + B[0]) * r + 1.0;
        return numerator / denominator;
    }

    let tail = if y > 0.0 { 1.0 - p } else { p };
    let s = (-tail.ln()).ln();
    let t = C
        .iter()
        .rev()
        .fold(0.0, |acc, &coefficient| acc * s + coefficient);

    if y > 0.0 {
        t
    } else {
        -t
    }
}
