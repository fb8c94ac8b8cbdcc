//! Statistics gathering with a geometric convergence table.

use crate::mc::{PricingResult, RunStatus};

use super::running::RunningStatistics;

/// Default multiplier between successive convergence snapshots.
pub const DEFAULT_CONVERGENCE_RATIO: u64 = 2;

/// Running estimate recorded at a given sample count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceRow {
    /// Samples accumulated when the row was taken
    pub count: u64,
    /// Running mean at that count
    pub estimate: f64,
    /// Running standard error at that count
    pub standard_error: f64,
}

impl ConvergenceRow {
    fn from_stats(stats: &RunningStatistics) -> Self {
        Self {
            count: stats.count(),
            estimate: stats.mean(),
            standard_error: stats.standard_error(),
        }
    }
}

/// Sample counts at which snapshots are taken: 1, r, r², ...
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvergenceSchedule {
    ratio: u64,
    next: u64,
}

impl ConvergenceSchedule {
    /// Creates a schedule with the given ratio, clamped to at least 2.
    pub fn new(ratio: u64) -> Self {
        Self {
            ratio: ratio.max(2),
            next: 1,
        }
    }

    /// Multiplier between snapshots.
    #[inline]
    pub fn ratio(&self) -> u64 {
        self.ratio
    }

    /// Next count at which a snapshot is due.
    #[inline]
    pub fn next_due(&self) -> u64 {
        self.next
    }

    /// Whether a snapshot is due at `count`.
    #[inline]
    pub fn is_due(&self, count: u64) -> bool {
        count >= self.next
    }

    /// Advances past `count`.
    pub fn advance_past(&mut self, count: u64) {
        while self.next <= count {
            self.next = self.next.saturating_mul(self.ratio);
            if self.next == u64::MAX {
                break;
            }
        }
    }
}

impl Default for ConvergenceSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERGENCE_RATIO)
    }
}

/// Accumulates per-path discounted payoffs for one run.
///
/// Created at engine start and mutated monotonically until the loop stops;
/// [`StatisticsGatherer::finalize`] converts it into an immutable
/// [`PricingResult`].
///
/// # Examples
///
/// ```rust
/// use exotic_engine::mc::RunStatus;
/// use exotic_engine::statistics::StatisticsGatherer;
///
/// let mut gatherer = StatisticsGatherer::new(2);
/// for x in 1..=5 {
///     gatherer.accumulate(x as f64);
/// }
/// let counts: Vec<u64> = gatherer.convergence_table().iter().map(|row| row.count).collect();
/// assert_eq!(counts, vec![1, 2, 4]);
///
/// let result = gatherer.finalize(RunStatus::Completed, 5);
/// assert_eq!(result.estimate(), 3.0);
/// assert_eq!(result.convergence_table().last().unwrap().count, 5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StatisticsGatherer {
    stats: RunningStatistics,
    schedule: ConvergenceSchedule,
    table: Vec<ConvergenceRow>,
}

impl StatisticsGatherer {
    /// Creates an empty gatherer with the given snapshot ratio.
    pub fn new(convergence_ratio: u64) -> Self {
        Self {
            stats: RunningStatistics::new(),
            schedule: ConvergenceSchedule::new(convergence_ratio),
            table: Vec::new(),
        }
    }

    /// Folds one discounted payoff in, recording a snapshot when due.
    #[inline]
    pub fn accumulate(&mut self, value: f64) {
        self.stats.accumulate(value);
        let count = self.stats.count();
        if self.schedule.is_due(count) {
            self.table.push(ConvergenceRow::from_stats(&self.stats));
            self.schedule.advance_past(count);
        }
    }

    /// Merges another gatherer's moments and records a snapshot at the
    /// merged count.
    ///
    /// The other gatherer's own convergence rows are discarded; they describe
    /// a sub-sample, not the merged estimate.
    pub fn absorb(&mut self, other: &StatisticsGatherer) {
        if other.count() == 0 {
            return;
        }
        self.stats.merge(&other.stats);
        self.table.push(ConvergenceRow::from_stats(&self.stats));
        self.schedule.advance_past(self.stats.count());
    }

    /// Current running estimate.
    #[inline]
    pub fn snapshot(&self) -> ConvergenceRow {
        ConvergenceRow::from_stats(&self.stats)
    }

    /// Snapshots recorded so far.
    #[inline]
    pub fn convergence_table(&self) -> &[ConvergenceRow] {
        &self.table
    }

    /// Underlying moments.
    #[inline]
    pub fn statistics(&self) -> &RunningStatistics {
        &self.stats
    }

    /// Samples accumulated.
    #[inline]
    pub fn count(&self) -> u64 {
        self.stats.count()
    }

    /// Converts the gatherer into a result.
    ///
    /// Appends a final row when the last snapshot is not at the final count.
    pub fn finalize(mut self, status: RunStatus, requested_paths: u64) -> PricingResult {
        let count = self.stats.count();
        let needs_final_row = count > 0
            && self
                .table
                .last()
                .map_or(true, |row| row.count != count);
        if needs_final_row {
            self.table.push(ConvergenceRow::from_stats(&self.stats));
        }

        PricingResult::new(
            self.stats.mean(),
            self.stats.standard_error(),
            count,
            requested_paths,
            self.table,
            status,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn counts(table: &[ConvergenceRow]) -> Vec<u64> {
        table.iter().map(|row| row.count).collect()
    }

    #[test]
    fn test_schedule_is_geometric() {
        let mut gatherer = StatisticsGatherer::new(2);
        for _ in 0..100 {
            gatherer.accumulate(1.0);
        }
        assert_eq!(
            counts(gatherer.convergence_table()),
            vec![1, 2, 4, 8, 16, 32, 64]
        );
    }

    #[test]
    fn test_schedule_ratio_ten() {
        let mut gatherer = StatisticsGatherer::new(10);
        for _ in 0..1000 {
            gatherer.accumulate(1.0);
        }
        assert_eq!(counts(gatherer.convergence_table()), vec![1, 10, 100, 1000]);
    }

    #[test]
    fn test_schedule_clamps_ratio() {
        assert_eq!(ConvergenceSchedule::new(0).ratio(), 2);
        assert_eq!(ConvergenceSchedule::new(1).ratio(), 2);
        assert_eq!(ConvergenceSchedule::default().ratio(), DEFAULT_CONVERGENCE_RATIO);
    }

    #[test]
    fn test_schedule_saturates() {
        let mut schedule = ConvergenceSchedule::new(u64::MAX);
        schedule.advance_past(1);
        assert_eq!(schedule.next_due(), u64::MAX);
        schedule.advance_past(u64::MAX);
        assert_eq!(schedule.next_due(), u64::MAX);
    }

    #[test]
    fn test_rows_track_running_estimate() {
        let mut gatherer = StatisticsGatherer::new(2);
        for x in [1.0, 3.0, 5.0, 7.0] {
            gatherer.accumulate(x);
        }
        let table = gatherer.convergence_table();
        assert_relative_eq!(table[0].estimate, 1.0);
        assert_relative_eq!(table[1].estimate, 2.0);
        assert_relative_eq!(table[2].estimate, 4.0);
        assert_eq!(table[0].standard_error, 0.0);
    }

    #[test]
    fn test_finalize_appends_final_row() {
        let mut gatherer = StatisticsGatherer::new(2);
        for _ in 0..5 {
            gatherer.accumulate(2.0);
        }
        let result = gatherer.finalize(RunStatus::Completed, 5);
        assert_eq!(counts(result.convergence_table()), vec![1, 2, 4, 5]);
        assert_eq!(result.sample_count(), 5);
    }

    #[test]
    fn test_finalize_does_not_duplicate_row() {
        let mut gatherer = StatisticsGatherer::new(2);
        for _ in 0..4 {
            gatherer.accumulate(2.0);
        }
        let result = gatherer.finalize(RunStatus::Completed, 4);
        assert_eq!(counts(result.convergence_table()), vec![1, 2, 4]);
    }

    #[test]
    fn test_finalize_empty() {
        let result = StatisticsGatherer::new(2).finalize(RunStatus::Cancelled, 10);
        assert_eq!(result.sample_count(), 0);
        assert!(result.convergence_table().is_empty());
        assert_eq!(result.requested_paths(), 10);
    }

    #[test]
    fn test_absorb_merges_and_records_row() {
        let mut left = StatisticsGatherer::new(2);
        let mut right = StatisticsGatherer::new(2);
        for x in [1.0, 2.0, 3.0] {
            left.accumulate(x);
        }
        for x in [4.0, 5.0] {
            right.accumulate(x);
        }

        let mut merged = StatisticsGatherer::new(2);
        merged.absorb(&left);
        merged.absorb(&right);
        merged.absorb(&StatisticsGatherer::new(2));

        assert_eq!(counts(merged.convergence_table()), vec![3, 5]);
        assert_eq!(merged.count(), 5);
        assert_relative_eq!(merged.snapshot().estimate, 3.0, epsilon = 1e-12);
        assert_relative_eq!(merged.statistics().variance(), 2.5, epsilon = 1e-12);
    }
}
