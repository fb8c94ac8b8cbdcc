//! # Statistics
//!
//! Running moments of discounted payoffs and the convergence table.
//!
//! - [`RunningStatistics`]: Welford accumulator, mergeable
//! - [`StatisticsGatherer`]: moments plus geometric snapshots
//! - [`ConvergenceRow`], [`ConvergenceSchedule`]: the snapshot table

mod gatherer;
mod running;

pub use gatherer::{
    ConvergenceRow, ConvergenceSchedule, StatisticsGatherer, DEFAULT_CONVERGENCE_RATIO,
};
pub use running::RunningStatistics;
