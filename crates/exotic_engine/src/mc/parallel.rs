//! Parallel execution over contiguous path blocks.
//!
//! The path range is split into `workers` blocks whose sizes differ by at
//! most one. Worker `w` simulates its block with a source seeded with
//! `seed + w` and a private gatherer on the rayon pool. After the join the
//! gatherers are merged in worker order, which makes the result independent
//! of thread scheduling for a fixed worker count.
//!
//! Workers share two atomics: the total of completed paths, passed to the
//! stop signal, and an abort flag raised by the first worker that faults.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rayon::prelude::*;
use tracing::debug;

use exotic_core::ModelParameters;

use crate::payoff::Payoff;
use crate::rng::ConfiguredSource;
use crate::statistics::StatisticsGatherer;

use super::cancel::{RunStop, StopSignal};
use super::config::MonteCarloConfig;
use super::engine::{log_outcome, PathSimulator};
use super::error::EngineError;
use super::result::{PricingResult, RunStatus};

/// Size of block `worker` when `path_count` paths are split `workers` ways.
#[inline]
pub(crate) fn block_size(path_count: u64, workers: usize, worker: usize) -> u64 {
    let workers = workers as u64;
    let base = path_count / workers;
    let remainder = path_count % workers;
    base + u64::from((worker as u64) < remainder)
}

pub(crate) fn run<S>(
    config: &MonteCarloConfig,
    params: &ModelParameters,
    payoff: &Payoff,
    path_count: u64,
    seed: u64,
    workers: usize,
    stop: &S,
) -> Result<PricingResult, EngineError>
where
    S: StopSignal + ?Sized,
{
    // Every worker seed is checked before any block starts
    let sources = (0..workers)
        .map(|worker| {
            ConfiguredSource::build(
                config.generator(),
                config.variance_reduction(),
                seed.wrapping_add(worker as u64),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        generator = %config.generator(),
        steps = params.steps(),
        workers,
        block = block_size(path_count, workers, 0),
        "starting parallel run"
    );

    let ratio = config.convergence_ratio();
    let run_stop = RunStop::new(stop, config.time_budget());
    let total = AtomicU64::new(0);
    let abort = AtomicBool::new(false);

    let outcomes: Vec<(StatisticsGatherer, RunStatus)> = sources
        .into_par_iter()
        .enumerate()
        .map(|(worker, mut source)| {
            let mut simulator = PathSimulator::new(params, payoff);
            let mut gatherer = StatisticsGatherer::new(ratio);

            let status = simulator.run(
                &mut source,
                block_size(path_count, workers, worker),
                &mut gatherer,
                |_| abort.load(Ordering::Acquire) || run_stop.should_stop(total.load(Ordering::Relaxed)),
                || {
                    total.fetch_add(1, Ordering::Relaxed);
                },
            );

            if let RunStatus::Faulted(fault) = status {
                debug!(worker, %fault, "worker faulted, raising abort");
                abort.store(true, Ordering::Release);
            }
            (gatherer, status)
        })
        .collect();

    let mut merged = StatisticsGatherer::new(ratio);
    let mut status = RunStatus::Completed;
    for (gatherer, worker_status) in &outcomes {
        merged.absorb(gatherer);
        status = combine(status, *worker_status);
    }

    let result = merged.finalize(status, path_count);
    log_outcome(&result);
    Ok(result)
}

/// The first fault in worker order wins; any cancellation beats completion.
fn combine(current: RunStatus, next: RunStatus) -> RunStatus {
    match (current, next) {
        (RunStatus::Faulted(_), _) => current,
        (_, RunStatus::Faulted(_)) => next,
        (RunStatus::Cancelled, _) | (_, RunStatus::Cancelled) => RunStatus::Cancelled,
        _ => RunStatus::Completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{ExoticEngine, PathError, Scheduling};

    fn engine(workers: usize) -> ExoticEngine {
        ExoticEngine::new(
            MonteCarloConfig::builder()
                .scheduling(Scheduling::Parallel { workers })
                .build()
                .unwrap(),
        )
    }

    fn params() -> ModelParameters {
        ModelParameters::new(100.0, 0.05, 0.2, 1.0, 4).unwrap()
    }

    #[test]
    fn test_block_sizes_cover_range() {
        for (count, workers) in [(10, 3), (3, 8), (1_000, 7), (8, 8)] {
            let sizes: Vec<u64> = (0..workers).map(|w| block_size(count, workers, w)).collect();
            assert_eq!(sizes.iter().sum::<u64>(), count);
            let max = *sizes.iter().max().unwrap();
            let min = *sizes.iter().min().unwrap();
            assert!(max - min <= 1);
        }
    }

    #[test]
    fn test_parallel_is_reproducible() {
        let payoff = Payoff::asian_call(100.0);
        let a = engine(4).price(&params(), &payoff, 4_001, 11).unwrap();
        let b = engine(4).price(&params(), &payoff, 4_001, 11).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.sample_count(), 4_001);
        assert_eq!(a.status(), RunStatus::Completed);
    }

    #[test]
    fn test_single_worker_matches_sequential() {
        let payoff = Payoff::put(100.0);
        let parallel = engine(1).price(&params(), &payoff, 1_000, 5).unwrap();
        let sequential = ExoticEngine::default()
            .price(&params(), &payoff, 1_000, 5)
            .unwrap();
        assert_eq!(parallel.estimate(), sequential.estimate());
        assert_eq!(parallel.standard_error(), sequential.standard_error());
        assert_eq!(parallel.sample_count(), sequential.sample_count());
    }

    #[test]
    fn test_one_convergence_row_per_block() {
        let result = engine(3).price(&params(), &Payoff::call(100.0), 300, 2).unwrap();
        let counts: Vec<u64> = result.convergence_table().iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![100, 200, 300]);
    }

    #[test]
    fn test_more_workers_than_paths() {
        let result = engine(8).price(&params(), &Payoff::call(100.0), 3, 2).unwrap();
        assert_eq!(result.sample_count(), 3);
    }

    #[test]
    fn test_worker_seed_validated_upfront() {
        let max_seed = crate::rng::PARK_MILLER_MAX_SEED;
        let result = engine(2).price(&params(), &Payoff::call(100.0), 10, max_seed);
        assert!(matches!(result, Err(EngineError::SeedInvalid(_))));
    }

    #[test]
    fn test_cancellation_counts_completed_paths() {
        let token = crate::mc::CancellationToken::new();
        token.cancel();
        let result = engine(4)
            .price_until(&params(), &Payoff::call(100.0), 1_000, 1, &token)
            .unwrap();
        assert_eq!(result.sample_count(), 0);
        assert!(result.is_cancelled());
    }

    #[test]
    fn test_combine_precedence() {
        let fault = RunStatus::Faulted(PathError::NumericFault {
            step: 1,
            level: f64::NAN,
        });
        assert_eq!(combine(RunStatus::Completed, RunStatus::Completed), RunStatus::Completed);
        assert_eq!(combine(RunStatus::Completed, RunStatus::Cancelled), RunStatus::Cancelled);
        assert!(matches!(combine(RunStatus::Cancelled, fault), RunStatus::Faulted(_)));
        assert!(matches!(combine(fault, RunStatus::Completed), RunStatus::Faulted(_)));
    }
}
