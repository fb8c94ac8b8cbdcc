//! Monte Carlo engine configuration.
//!
//! Configuration types and a builder for [`ExoticEngine`](super::ExoticEngine)
//! runs. Per-call inputs (model parameters, payoff, path count, seed) are not
//! part of the configuration.

use std::time::Duration;

use crate::rng::{GeneratorKind, VarianceReduction};
use crate::statistics::DEFAULT_CONVERGENCE_RATIO;

use super::error::ConfigError;

/// Maximum number of simulation paths per pricing call.
pub const MAX_PATHS: u64 = 1_000_000_000;

/// Maximum number of parallel workers (and independently seeded sources).
pub const MAX_WORKERS: usize = 4096;

/// How the path range is executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheduling {
    /// One loop on the calling thread.
    #[default]
    Sequential,
    /// Contiguous blocks on the rayon pool, one per worker.
    ///
    /// Worker `w` draws from a source seeded with `seed + w`, so results are
    /// reproducible for a fixed worker count.
    Parallel {
        /// Number of blocks (and independent sources).
        workers: usize,
    },
}

impl Scheduling {
    /// Parallel scheduling with one worker per logical CPU.
    pub fn parallel_auto() -> Self {
        Self::Parallel {
            workers: num_cpus::get().max(1),
        }
    }

    /// Number of independent sources used by a run.
    #[inline]
    pub fn workers(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel { workers } => *workers,
        }
    }
}

/// Monte Carlo engine configuration.
///
/// Immutable once built. Use [`MonteCarloConfigBuilder`] to construct
/// instances.
///
/// # Examples
///
/// ```rust
/// use exotic_engine::mc::{MonteCarloConfig, Scheduling};
/// use exotic_engine::rng::VarianceReduction;
///
/// let config = MonteCarloConfig::builder()
///     .variance_reduction(VarianceReduction::Antithetic)
///     .scheduling(Scheduling::Parallel { workers: 4 })
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.scheduling().workers(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloConfig {
    /// Underlying generator.
    generator: GeneratorKind,
    /// Variance reduction applied to draws.
    variance_reduction: VarianceReduction,
    /// Sequential or parallel execution.
    scheduling: Scheduling,
    /// Multiplier between convergence snapshots.
    convergence_ratio: u64,
    /// Wall-clock budget after which the run is cancelled.
    time_budget: Option<Duration>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::default(),
            variance_reduction: VarianceReduction::default(),
            scheduling: Scheduling::default(),
            convergence_ratio: DEFAULT_CONVERGENCE_RATIO,
            time_budget: None,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the generator kind.
    #[inline]
    pub fn generator(&self) -> GeneratorKind {
        self.generator
    }

    /// Returns the variance reduction technique.
    #[inline]
    pub fn variance_reduction(&self) -> VarianceReduction {
        self.variance_reduction
    }

    /// Returns the scheduling mode.
    #[inline]
    pub fn scheduling(&self) -> Scheduling {
        self.scheduling
    }

    /// Returns the convergence snapshot ratio.
    #[inline]
    pub fn convergence_ratio(&self) -> u64 {
        self.convergence_ratio
    }

    /// Returns the optional time budget.
    #[inline]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `convergence_ratio` is below 2
    /// - parallel scheduling has zero workers or more than [`MAX_WORKERS`]
    /// - `time_budget` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.convergence_ratio < 2 {
            return Err(ConfigError::InvalidParameter {
                name: "convergence_ratio",
                value: format!("must be at least 2, got {}", self.convergence_ratio),
            });
        }
        if let Scheduling::Parallel { workers } = self.scheduling {
            if workers == 0 || workers > MAX_WORKERS {
                return Err(ConfigError::InvalidParameter {
                    name: "workers",
                    value: format!("must be in range [1, {}], got {}", MAX_WORKERS, workers),
                });
            }
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidParameter {
                name: "time_budget",
                value: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Starts from the defaults: Park-Miller draws, no variance reduction,
/// sequential scheduling, convergence ratio 2 and no time budget.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    config: MonteCarloConfig,
}

impl MonteCarloConfigBuilder {
    /// Sets the underlying generator.
    #[inline]
    pub fn generator(mut self, generator: GeneratorKind) -> Self {
        self.config.generator = generator;
        self
    }

    /// Sets the variance reduction technique.
    #[inline]
    pub fn variance_reduction(mut self, reduction: VarianceReduction) -> Self {
        self.config.variance_reduction = reduction;
        self
    }

    /// Sets sequential or parallel execution.
    #[inline]
    pub fn scheduling(mut self, scheduling: Scheduling) -> Self {
        self.config.scheduling = scheduling;
        self
    }

    /// Sets the multiplier between convergence snapshots.
    ///
    /// # Arguments
    ///
    /// * `ratio` - At least 2
    #[inline]
    pub fn convergence_ratio(mut self, ratio: u64) -> Self {
        self.config.convergence_ratio = ratio;
        self
    }

    /// Sets a wall-clock budget; the run is cancelled once it elapses.
    #[inline]
    pub fn time_budget(mut self, budget: Duration) -> Self {
        self.config.time_budget = Some(budget);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// See [`MonteCarloConfig::validate`].
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
