//! Analytical (closed-form) prices used to verify Monte Carlo estimates.
//!
//! # Available Solutions
//!
//! - **European call/put**: Black-Scholes (1973)
//! - **Double digital**: cash-or-nothing payout between two strikes under Black-Scholes

pub mod black_scholes;

pub use black_scholes::{black_scholes_call, black_scholes_put, BlackScholes};
