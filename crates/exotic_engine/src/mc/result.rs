//! Pricing results.

use std::fmt;

use crate::statistics::ConvergenceRow;

use super::paths::PathError;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunStatus {
    /// Every requested path was simulated.
    Completed,
    /// A stop signal ended the run early; the estimate is valid.
    Cancelled,
    /// A path fault aborted the run; the estimate is not usable.
    Faulted(PathError),
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Faulted(err) => write!(f, "faulted: {}", err),
        }
    }
}

/// Immutable outcome of a pricing run.
///
/// Carries the discounted estimate, its standard error, the number of paths
/// that completed, and the convergence table. A faulted run keeps whatever
/// statistics accumulated before the fault but reports
/// [`PricingResult::is_valid`] as `false`.
#[derive(Clone, Debug, PartialEq)]
pub struct PricingResult {
    estimate: f64,
    standard_error: f64,
    sample_count: u64,
    requested_paths: u64,
    convergence: Vec<ConvergenceRow>,
    status: RunStatus,
}

impl PricingResult {
    pub(crate) fn new(
        estimate: f64,
        standard_error: f64,
        sample_count: u64,
        requested_paths: u64,
        convergence: Vec<ConvergenceRow>,
        status: RunStatus,
    ) -> Self {
        Self {
            estimate,
            standard_error,
            sample_count,
            requested_paths,
            convergence,
            status,
        }
    }

    /// Mean discounted payoff.
    #[inline]
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Standard error of the estimate.
    #[inline]
    pub fn standard_error(&self) -> f64 {
        self.standard_error
    }

    /// Sample variance of the discounted payoffs.
    #[inline]
    pub fn variance(&self) -> f64 {
        self.standard_error * self.standard_error * self.sample_count as f64
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.standard_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.standard_error
    }

    /// Paths that fully completed.
    #[inline]
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Paths requested by the caller.
    #[inline]
    pub fn requested_paths(&self) -> u64 {
        self.requested_paths
    }

    /// Running estimates at geometrically spaced sample counts.
    ///
    /// Under [`Scheduling::Parallel`](super::Scheduling::Parallel) the rows
    /// are instead taken once per merged worker block, at the cumulative
    /// count after each merge in worker order.
    #[inline]
    pub fn convergence_table(&self) -> &[ConvergenceRow] {
        &self.convergence
    }

    /// How the run ended.
    #[inline]
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// `false` when a fault aborted the run.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !matches!(self.status, RunStatus::Faulted(_))
    }

    /// Whether the run stopped early on a signal.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, RunStatus::Cancelled)
    }
}

impl fmt::Display for PricingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} ± {:.6} ({} of {} paths, {})",
            self.estimate, self.standard_error, self.sample_count, self.requested_paths, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn result(status: RunStatus) -> PricingResult {
        PricingResult::new(10.0, 0.5, 100, 200, Vec::new(), status)
    }

    #[test]
    fn test_validity() {
        assert!(result(RunStatus::Completed).is_valid());
        assert!(result(RunStatus::Cancelled).is_valid());
        assert!(result(RunStatus::Cancelled).is_cancelled());
        let fault = PathError::NumericFault {
            step: 1,
            level: f64::INFINITY,
        };
        assert!(!result(RunStatus::Faulted(fault)).is_valid());
    }

    #[test]
    fn test_derived_quantities() {
        let r = result(RunStatus::Completed);
        assert_relative_eq!(r.variance(), 25.0);
        assert_relative_eq!(r.confidence_95(), 0.98);
        assert_relative_eq!(r.confidence_99(), 1.288);
    }

    #[test]
    fn test_display() {
        let text = result(RunStatus::Cancelled).to_string();
        assert_eq!(text, "10.000000 ± 0.500000 (100 of 200 paths, cancelled)");
    }
}
