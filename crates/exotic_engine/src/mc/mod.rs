//! Monte Carlo pricing engine under one-factor lognormal diffusion.
//!
//! # Architecture
//!
//! ```text
//! ExoticEngine
//! ├── MonteCarloConfig  (generator, variance reduction, scheduling, budget)
//! ├── RandomSource      (one per worker, seeded with seed + worker)
//! ├── PathGenerator     (drift and diffusion precomputed per run)
//! ├── Payoff            (duplicated into each worker)
//! └── StatisticsGatherer
//!     └── PricingResult (estimate, standard error, convergence table, status)
//! ```
//!
//! # Run outcomes
//!
//! | Outcome | Status | `is_valid()` |
//! |---------|--------|--------------|
//! | all paths simulated | [`RunStatus::Completed`] | `true` |
//! | stop signal fired | [`RunStatus::Cancelled`] | `true` |
//! | NaN or infinite level | [`RunStatus::Faulted`] | `false` |
//!
//! Invalid inputs never start a run; they return an [`EngineError`].
//!
//! # Usage
//!
//! ```rust
//! use exotic_core::types::ModelParameters;
//! use exotic_engine::mc::{ExoticEngine, MonteCarloConfig, Scheduling};
//! use exotic_engine::payoff::Payoff;
//! use exotic_engine::rng::VarianceReduction;
//!
//! let config = MonteCarloConfig::builder()
//!     .variance_reduction(VarianceReduction::Antithetic)
//!     .scheduling(Scheduling::Parallel { workers: 2 })
//!     .build()
//!     .unwrap();
//! let engine = ExoticEngine::new(config);
//!
//! let params = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 12).unwrap();
//! let result = engine.price(&params, &Payoff::asian_call(100.0), 20_000, 1).unwrap();
//! assert!(result.is_valid());
//! ```

mod cancel;
mod config;
mod engine;
mod error;
mod parallel;
mod paths;
mod result;

pub use cancel::{CancellationToken, Deadline, NeverStop, StopSignal};
pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, Scheduling, MAX_PATHS, MAX_WORKERS};
pub use engine::ExoticEngine;
pub use error::{ConfigError, EngineError};
pub use paths::{PathError, PathGenerator, SamplePath};
pub use result::{PricingResult, RunStatus};
