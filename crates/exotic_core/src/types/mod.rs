//! Model parameter and error types.
//!
//! This module provides:
//! - `params`: [`ModelParameters`] for one-factor lognormal diffusion
//! - `error`: [`ParameterError`] raised when parameters fall outside their valid range

pub mod error;
pub mod params;

pub use error::ParameterError;
pub use params::ModelParameters;
