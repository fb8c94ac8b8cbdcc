//! # Random Number Generation
//!
//! Draw sources for Monte Carlo simulation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every source is seeded; equal seeds give equal streams
//! - **Efficiency**: zero-allocation batch fills via `&mut [f64]` slices
//! - **Static dispatch**: the engine is generic over [`RandomSource`];
//!   configuration-driven runs use the [`ConfiguredSource`] enum
//!
//! ## Module Structure
//!
//! - [`RandomSource`]: the draw-source trait and [`DrawSequence`]
//! - [`ParkMiller`]: minimal standard LCG (Schrage multiplication) with
//!   inverse-CDF normals
//! - [`PricerRng`]: `StdRng` with Ziggurat normals
//! - [`Antithetic`]: decorator emitting sign-reflected pairs
//!
//! ## Usage Example
//!
//! ```rust
//! use exotic_engine::rng::{Antithetic, ParkMiller, RandomSource};
//!
//! let mut source = Antithetic::new(ParkMiller::new(12345).unwrap());
//! let mut draws = vec![0.0; 252];
//! source.fill_gaussians(&mut draws);
//! ```

mod antithetic;
mod configured;
mod park_miller;
mod prng;
mod source;

pub use antithetic::Antithetic;
pub use configured::{ConfiguredSource, GeneratorKind, VarianceReduction};
pub use park_miller::{ParkMiller, MAX_SEED as PARK_MILLER_MAX_SEED};
pub use prng::PricerRng;
pub use source::{DrawSequence, RandomSource, SeedError};
