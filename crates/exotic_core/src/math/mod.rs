//! Numerical building blocks.
//!
//! - [`distributions`]: standard normal CDF, PDF and inverse CDF

pub mod distributions;

pub use distributions::{inverse_norm_cdf, norm_cdf, norm_pdf};
