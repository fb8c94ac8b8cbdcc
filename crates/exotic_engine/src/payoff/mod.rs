//! # Payoffs
//!
//! Contract payoffs as a flat `Copy` enum, plus name-based construction.
//!
//! - [`Payoff`]: call, put, double digital, arithmetic Asian call and put
//! - [`PathShape`]: terminal-only or full-path observation
//! - [`PayoffFactory`]: the interface the engine uses to build payoffs by name
//! - [`PayoffRegistry`]: explicit registry implementing [`PayoffFactory`]

mod contract;
mod error;
mod factory;

pub use contract::{PathShape, Payoff};
pub use error::PayoffError;
pub use factory::{PayoffBuilder, PayoffFactory, PayoffRegistry};
