//! The Monte Carlo pricing engine.
//!
//! [`ExoticEngine`] composes a random source, the path generator, a payoff
//! and a statistics gatherer into one simulation loop:
//!
//! ```text
//! for each path:
//!     stop requested?  -> Cancelled
//!     draws            <- RandomSource
//!     path             <- PathGenerator  (fault -> Faulted)
//!     value            <- payoff(path) × exp(−rT)
//!     gatherer.accumulate(value)
//! ```
//!
//! All inputs are validated before the first draw.

use tracing::{debug, info, info_span, warn};

use exotic_core::{ModelParameters, ParameterError};

use crate::payoff::{Payoff, PayoffFactory};
use crate::rng::{ConfiguredSource, RandomSource};
use crate::statistics::StatisticsGatherer;

use super::cancel::{NeverStop, RunStop, StopSignal};
use super::config::{MonteCarloConfig, Scheduling, MAX_PATHS};
use super::error::EngineError;
use super::parallel;
use super::paths::{PathGenerator, SamplePath};
use super::result::{PricingResult, RunStatus};

/// Monte Carlo engine for path-dependent payoffs.
///
/// Holds only configuration; every pricing call owns its sources, buffers
/// and gatherer, so one engine can serve concurrent calls.
///
/// # Examples
///
/// ```rust
/// use exotic_core::types::ModelParameters;
/// use exotic_engine::mc::{ExoticEngine, MonteCarloConfig};
/// use exotic_engine::payoff::Payoff;
///
/// let engine = ExoticEngine::new(MonteCarloConfig::default());
/// let params = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 1).unwrap();
///
/// let result = engine.price(&params, &Payoff::call(100.0), 10_000, 42).unwrap();
/// assert!(result.is_valid());
/// assert_eq!(result.sample_count(), 10_000);
/// assert!((result.estimate() - 10.45).abs() < 4.0 * result.standard_error());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExoticEngine {
    config: MonteCarloConfig,
}

impl ExoticEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Prices `payoff` over `path_count` paths.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidParameter`] when `path_count` is 0 or above
    ///   [`MAX_PATHS`], or `params` fails validation
    /// - [`EngineError::Payoff`] when the payoff terms are invalid
    /// - [`EngineError::SeedInvalid`] when a worker seed is rejected
    ///
    /// A numeric fault during simulation is not an error; the returned
    /// result is marked invalid instead.
    pub fn price(
        &self,
        params: &ModelParameters,
        payoff: &Payoff,
        path_count: u64,
        seed: u64,
    ) -> Result<PricingResult, EngineError> {
        self.price_until(params, payoff, path_count, seed, &NeverStop)
    }

    /// Prices `payoff`, polling `stop` before every path.
    ///
    /// # Errors
    ///
    /// See [`ExoticEngine::price`].
    pub fn price_until<S>(
        &self,
        params: &ModelParameters,
        payoff: &Payoff,
        path_count: u64,
        seed: u64,
        stop: &S,
    ) -> Result<PricingResult, EngineError>
    where
        S: StopSignal + ?Sized,
    {
        validate_inputs(params, payoff, path_count)?;

        let scheduling = self.config.scheduling();
        let span = info_span!(
            "price",
            payoff = payoff.name(),
            path_count,
            seed,
            workers = scheduling.workers()
        );
        let _guard = span.enter();

        match scheduling {
            Scheduling::Sequential => {
                let source = ConfiguredSource::build(
                    self.config.generator(),
                    self.config.variance_reduction(),
                    seed,
                )?;
                Ok(self.run_sequential(params, payoff, path_count, source, stop))
            }
            Scheduling::Parallel { workers } => {
                parallel::run(&self.config, params, payoff, path_count, seed, workers, stop)
            }
        }
    }

    /// Prices `payoff` sequentially with a caller-supplied source.
    ///
    /// The configured generator, variance reduction and scheduling are
    /// ignored; the convergence ratio and time budget still apply.
    ///
    /// # Errors
    ///
    /// See [`ExoticEngine::price`]; seeds are the caller's concern.
    pub fn price_with_source<R, S>(
        &self,
        params: &ModelParameters,
        payoff: &Payoff,
        path_count: u64,
        source: R,
        stop: &S,
    ) -> Result<PricingResult, EngineError>
    where
        R: RandomSource,
        S: StopSignal + ?Sized,
    {
        validate_inputs(params, payoff, path_count)?;

        let span = info_span!("price", payoff = payoff.name(), path_count, workers = 1);
        let _guard = span.enter();

        Ok(self.run_sequential(params, payoff, path_count, source, stop))
    }

    /// Builds the payoff through `factory`, then prices it.
    ///
    /// # Errors
    ///
    /// [`EngineError::Payoff`] when the factory rejects `name` or `args`;
    /// otherwise see [`ExoticEngine::price`].
    pub fn price_named<F>(
        &self,
        factory: &F,
        name: &str,
        args: &[f64],
        params: &ModelParameters,
        path_count: u64,
        seed: u64,
    ) -> Result<PricingResult, EngineError>
    where
        F: PayoffFactory + ?Sized,
    {
        let payoff = factory.create(name, args)?;
        self.price(params, &payoff, path_count, seed)
    }

    fn run_sequential<R, S>(
        &self,
        params: &ModelParameters,
        payoff: &Payoff,
        path_count: u64,
        mut source: R,
        stop: &S,
    ) -> PricingResult
    where
        R: RandomSource,
        S: StopSignal + ?Sized,
    {
        debug!(
            generator = %self.config.generator(),
            steps = params.steps(),
            "starting sequential run"
        );

        let run_stop = RunStop::new(stop, self.config.time_budget());
        let mut simulator = PathSimulator::new(params, payoff);
        let mut gatherer = StatisticsGatherer::new(self.config.convergence_ratio());

        let status = simulator.run(
            &mut source,
            path_count,
            &mut gatherer,
            |completed| run_stop.should_stop(completed),
            || {},
        );

        let result = gatherer.finalize(status, path_count);
        log_outcome(&result);
        result
    }
}

/// Rejects unusable inputs before any draw is generated.
pub(crate) fn validate_inputs(
    params: &ModelParameters,
    payoff: &Payoff,
    path_count: u64,
) -> Result<(), EngineError> {
    if path_count == 0 || path_count > MAX_PATHS {
        return Err(ParameterError::invalid(
            "path_count",
            format!("must be in range [1, {}], got {}", MAX_PATHS, path_count),
        )
        .into());
    }
    params.validate()?;
    payoff.validate()?;
    Ok(())
}

pub(crate) fn log_outcome(result: &PricingResult) {
    match result.status() {
        RunStatus::Completed => info!(
            estimate = result.estimate(),
            standard_error = result.standard_error(),
            paths = result.sample_count(),
            "run completed"
        ),
        RunStatus::Cancelled => info!(
            completed = result.sample_count(),
            requested = result.requested_paths(),
            "run cancelled"
        ),
        RunStatus::Faulted(fault) => warn!(
            %fault,
            completed = result.sample_count(),
            requested = result.requested_paths(),
            "run aborted on numeric fault"
        ),
    }
}

/// Per-worker simulation state: constants plus reusable buffers.
pub(crate) struct PathSimulator {
    generator: PathGenerator,
    payoff: Payoff,
    discount: f64,
    draws: Vec<f64>,
    path: SamplePath,
}

impl PathSimulator {
    pub(crate) fn new(params: &ModelParameters, payoff: &Payoff) -> Self {
        let generator = PathGenerator::new(params);
        let draw_count = generator.draws_required(payoff.path_shape());
        Self {
            generator,
            payoff: payoff.duplicate(),
            discount: params.discount_factor(),
            draws: vec![0.0; draw_count],
            path: SamplePath::with_capacity(draw_count),
        }
    }

    /// Simulates up to `path_count` paths into `gatherer`.
    ///
    /// `should_stop` receives the paths this call has completed;
    /// `on_complete` runs after each accumulated path.
    pub(crate) fn run<R, F, C>(
        &mut self,
        source: &mut R,
        path_count: u64,
        gatherer: &mut StatisticsGatherer,
        mut should_stop: F,
        mut on_complete: C,
    ) -> RunStatus
    where
        R: RandomSource + ?Sized,
        F: FnMut(u64) -> bool,
        C: FnMut(),
    {
        for completed in 0..path_count {
            if should_stop(completed) {
                return RunStatus::Cancelled;
            }

            source.fill_gaussians(&mut self.draws);
            if let Err(fault) = self.generator.build_into(&self.draws, &mut self.path) {
                return RunStatus::Faulted(fault);
            }

            gatherer.accumulate(self.discount * self.payoff.evaluate(&self.path));
            on_complete();
        }
        RunStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{CancellationToken, PathError};
    use crate::payoff::PayoffRegistry;
    use crate::rng::ParkMiller;
    use approx::assert_relative_eq;

    fn params() -> ModelParameters {
        ModelParameters::new(100.0, 0.05, 0.2, 1.0, 1).unwrap()
    }

    /// Emits a fixed draw value.
    struct Constant(f64);

    impl RandomSource for Constant {
        fn fill_gaussians(&mut self, draws: &mut [f64]) {
            draws.fill(self.0);
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn test_price_is_deterministic() {
        let engine = ExoticEngine::default();
        let a = engine.price(&params(), &Payoff::call(100.0), 2_000, 7).unwrap();
        let b = engine.price(&params(), &Payoff::call(100.0), 2_000, 7).unwrap();
        assert_eq!(a, b);
        let c = engine.price(&params(), &Payoff::call(100.0), 2_000, 8).unwrap();
        assert_ne!(a.estimate(), c.estimate());
    }

    #[test]
    fn test_constant_draws_give_exact_discounted_payoff() {
        let engine = ExoticEngine::default();
        let result = engine
            .price_with_source(&params(), &Payoff::call(100.0), 50, Constant(0.0), &NeverStop)
            .unwrap();
        let terminal = 100.0 * (0.03f64).exp();
        let expected = (-0.05f64).exp() * (terminal - 100.0);
        assert_relative_eq!(result.estimate(), expected, epsilon = 1e-12);
        assert_eq!(result.standard_error(), 0.0);
        assert_eq!(result.status(), RunStatus::Completed);
    }

    #[test]
    fn test_price_with_source_matches_price() {
        let engine = ExoticEngine::default();
        let via_seed = engine.price(&params(), &Payoff::put(105.0), 500, 99).unwrap();
        let via_source = engine
            .price_with_source(
                &params(),
                &Payoff::put(105.0),
                500,
                ParkMiller::new(99).unwrap(),
                &NeverStop,
            )
            .unwrap();
        assert_eq!(via_seed, via_source);
    }

    #[test]
    fn test_rejects_bad_path_count() {
        let engine = ExoticEngine::default();
        for count in [0, MAX_PATHS + 1] {
            let result = engine.price(&params(), &Payoff::call(100.0), count, 1);
            assert!(matches!(result, Err(EngineError::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_rejects_invalid_payoff() {
        let engine = ExoticEngine::default();
        let result = engine.price(&params(), &Payoff::double_digital(2.0, 1.0, 1.0), 10, 1);
        assert!(matches!(result, Err(EngineError::Payoff(_))));
    }

    #[test]
    fn test_rejects_invalid_seed() {
        let engine = ExoticEngine::default();
        let result = engine.price(&params(), &Payoff::call(100.0), 10, 0);
        assert!(matches!(result, Err(EngineError::SeedInvalid(_))));
    }

    #[test]
    fn test_cancellation_keeps_completed_paths() {
        let engine = ExoticEngine::default();
        let stop = |completed: u64| completed >= 37;
        let result = engine
            .price_until(&params(), &Payoff::call(100.0), 1_000, 3, &stop)
            .unwrap();
        assert_eq!(result.sample_count(), 37);
        assert_eq!(result.requested_paths(), 1_000);
        assert!(result.is_cancelled());
        assert!(result.is_valid());
    }

    #[test]
    fn test_pre_cancelled_token_runs_nothing() {
        let engine = ExoticEngine::default();
        let token = CancellationToken::new();
        token.cancel();
        let result = engine
            .price_until(&params(), &Payoff::call(100.0), 1_000, 3, &token)
            .unwrap();
        assert_eq!(result.sample_count(), 0);
        assert!(result.convergence_table().is_empty());
    }

    #[test]
    fn test_fault_aborts_run() {
        let engine = ExoticEngine::default();
        let result = engine
            .price_with_source(
                &params(),
                &Payoff::call(100.0),
                100,
                Constant(f64::NAN),
                &NeverStop,
            )
            .unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.sample_count(), 0);
        assert!(matches!(
            result.status(),
            RunStatus::Faulted(PathError::NumericFault { .. })
        ));
    }

    #[test]
    fn test_price_named() {
        let engine = ExoticEngine::default();
        let registry = PayoffRegistry::standard();
        let named = engine
            .price_named(&registry, "call", &[100.0], &params(), 500, 5)
            .unwrap();
        let direct = engine.price(&params(), &Payoff::call(100.0), 500, 5).unwrap();
        assert_eq!(named, direct);

        let unknown = engine.price_named(&registry, "lookback", &[1.0], &params(), 500, 5);
        assert!(matches!(unknown, Err(EngineError::Payoff(_))));
    }
}
