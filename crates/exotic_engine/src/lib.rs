//! # exotic_engine: Monte Carlo Pricing for Path-Dependent Derivatives
//!
//! ## Simulation Layer Role
//!
//! exotic_engine sits on top of exotic_core and provides:
//! - Seeded random sources with antithetic variance reduction (`rng`)
//! - Contract payoffs and a name-based payoff factory (`payoff`)
//! - Welford statistics with a convergence table (`statistics`)
//! - Path generation and the pricing engine, sequential or parallel (`mc`)
//! - TOML and environment settings (`settings`) and tracing setup (`telemetry`)
//!
//! ## Static Dispatch
//!
//! Payoffs are a flat `Copy` enum and the engine is generic over
//! [`rng::RandomSource`]; configuration-driven runs select a
//! [`rng::ConfiguredSource`] variant once per worker. No trait objects sit in
//! the per-path loop.
//!
//! ## Usage Examples
//!
//! ```rust
//! use exotic_core::analytical::black_scholes_call;
//! use exotic_core::types::ModelParameters;
//! use exotic_engine::mc::{ExoticEngine, MonteCarloConfig};
//! use exotic_engine::payoff::Payoff;
//! use exotic_engine::rng::VarianceReduction;
//!
//! let config = MonteCarloConfig::builder()
//!     .variance_reduction(VarianceReduction::Antithetic)
//!     .build()
//!     .unwrap();
//! let engine = ExoticEngine::new(config);
//!
//! let params = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 1).unwrap();
//! let result = engine.price(&params, &Payoff::call(100.0), 20_000, 12345).unwrap();
//!
//! let reference = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
//! assert!((result.estimate() - reference).abs() < 4.0 * result.standard_error());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod payoff;
pub mod rng;
pub mod settings;
pub mod statistics;
pub mod telemetry;

pub use mc::{EngineError, ExoticEngine, MonteCarloConfig, PricingResult, RunStatus};
pub use payoff::{Payoff, PayoffFactory, PayoffRegistry};
