//! Lognormal path construction.
//!
//! Builds asset levels on an equal-step time grid from standard normal draws
//! using the exact log-space step:
//!
//! ```text
//! S(t+Δt) = S(t) × exp((r − σ²/2)Δt + σ√Δt × Z)
//! ```
//!
//! A single draw produces a terminal-only path in one step over the whole
//! expiry. Every level is checked for finiteness; a NaN or infinity aborts
//! construction with [`PathError::NumericFault`].

use std::ops::Deref;
use thiserror::Error;

use exotic_core::types::ModelParameters;

use crate::payoff::PathShape;

/// Error raised while building a path.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum PathError {
    /// A simulated level is NaN or infinite.
    #[error("Non-finite level {level} at step {step}")]
    NumericFault {
        /// 1-based position in the path
        step: usize,
        /// Offending value
        level: f64,
    },

    /// The draw count is neither 1 nor the number of time steps.
    #[error("Expected 1 or {expected} draws, got {actual}")]
    DrawCountMismatch {
        /// Time steps in the grid
        expected: usize,
        /// Draws supplied
        actual: usize,
    },
}

/// Asset levels at t₁..tₙ; the initial spot is not included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SamplePath {
    levels: Vec<f64>,
}

impl SamplePath {
    /// Creates an empty path with room for `capacity` levels.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            levels: Vec::with_capacity(capacity),
        }
    }

    /// Simulated levels.
    #[inline]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Level at expiry, if any.
    #[inline]
    pub fn terminal(&self) -> Option<f64> {
        self.levels.last().copied()
    }

    /// Consumes the path, returning the levels.
    pub fn into_vec(self) -> Vec<f64> {
        self.levels
    }
}

impl Deref for SamplePath {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.levels
    }
}

/// Path builder with drift and diffusion constants computed once per run.
///
/// # Examples
///
/// ```rust
/// use exotic_core::types::ModelParameters;
/// use exotic_engine::mc::PathGenerator;
///
/// let params = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 4).unwrap();
/// let generator = PathGenerator::new(&params);
///
/// let full = generator.build(&[0.1, -0.2, 0.3, 0.0]).unwrap();
/// assert_eq!(full.len(), 4);
///
/// let terminal = generator.build(&[0.5]).unwrap();
/// assert_eq!(terminal.len(), 1);
///
/// assert!(generator.build(&[0.1, 0.2]).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathGenerator {
    spot: f64,
    steps: usize,
    step_drift: f64,
    step_vol: f64,
    terminal_drift: f64,
    terminal_vol: f64,
}

impl PathGenerator {
    /// Precomputes the per-step and whole-expiry constants.
    pub fn new(params: &ModelParameters) -> Self {
        let sigma = params.volatility();
        let drift_rate = params.rate() - 0.5 * sigma * sigma;
        let dt = params.time_step();
        let expiry = params.expiry();

        Self {
            spot: params.spot(),
            steps: params.steps(),
            step_drift: drift_rate * dt,
            step_vol: sigma * dt.sqrt(),
            terminal_drift: drift_rate * expiry,
            terminal_vol: sigma * expiry.sqrt(),
        }
    }

    /// Time steps in the grid.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Draws needed for one path of the given shape.
    #[inline]
    pub fn draws_required(&self, shape: PathShape) -> usize {
        match shape {
            PathShape::Terminal => 1,
            PathShape::Full => self.steps,
        }
    }

    /// Builds a freshly allocated path.
    ///
    /// # Errors
    ///
    /// See [`PathGenerator::build_into`].
    pub fn build(&self, draws: &[f64]) -> Result<SamplePath, PathError> {
        let mut path = SamplePath::with_capacity(draws.len());
        self.build_into(draws, &mut path)?;
        Ok(path)
    }

    /// Overwrites `path` with the levels driven by `draws`.
    ///
    /// With `steps` draws the path follows the equal-step recursion; with a
    /// single draw it holds only the terminal level.
    ///
    /// # Errors
    ///
    /// - [`PathError::DrawCountMismatch`] when `draws.len()` is neither 1
    ///   nor `steps`
    /// - [`PathError::NumericFault`] when a level is not finite; `path` is
    ///   left partially written
    pub fn build_into(&self, draws: &[f64], path: &mut SamplePath) -> Result<(), PathError> {
        let levels = &mut path.levels;
        levels.clear();

        if draws.len() == self.steps {
            let mut level = self.spot;
            for (index, &z) in draws.iter().enumerate() {
                level *= (self.step_drift + self.step_vol * z).exp();
                check_finite(index + 1, level)?;
                levels.push(level);
            }
            return Ok(());
        }

        if draws.len() == 1 {
            let level = self.spot * (self.terminal_drift + self.terminal_vol * draws[0]).exp();
            check_finite(1, level)?;
            levels.push(level);
            return Ok(());
        }

        Err(PathError::DrawCountMismatch {
            expected: self.steps,
            actual: draws.len(),
        })
    }
}

#[inline]
fn check_finite(step: usize, level: f64) -> Result<(), PathError> {
    if level.is_finite() {
        Ok(())
    } else {
        Err(PathError::NumericFault { step, level })
    }
}
