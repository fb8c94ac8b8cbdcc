//! # exotic_core: Foundation for Exotic Monte Carlo Pricing
//!
//! ## Foundation Layer Role
//!
//! exotic_core is the bottom layer of the workspace, providing:
//! - Model parameters for one-factor lognormal diffusion (`types::params`)
//! - Parameter validation errors (`types::error`)
//! - Standard normal distribution functions: CDF, PDF, inverse CDF (`math::distributions`)
//! - Closed-form Black-Scholes references for verifying simulations (`analytical`)
//!
//! ## Zero Dependency Principle
//!
//! This layer has no dependencies on other exotic_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use exotic_core::analytical::black_scholes_call;
//! use exotic_core::types::ModelParameters;
//!
//! let params = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 12).unwrap();
//! assert_eq!(params.steps(), 12);
//!
//! let reference = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
//! assert!((reference - 10.4506).abs() < 1e-3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `ModelParameters`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod math;
pub mod types;

pub use types::{ModelParameters, ParameterError};
