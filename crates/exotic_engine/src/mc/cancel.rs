//! Cooperative cancellation.
//!
//! The engine polls a [`StopSignal`] between path iterations, never inside
//! one. A run that stops early keeps every fully completed path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Polled before each path with the number of paths completed so far.
///
/// In parallel runs the count is the total across all workers, so a signal
/// may observe the same value more than once or skip values.
pub trait StopSignal: Sync {
    /// Returns `true` to stop the run.
    fn should_stop(&self, completed: u64) -> bool;
}

impl<F> StopSignal for F
where
    F: Fn(u64) -> bool + Sync,
{
    #[inline]
    fn should_stop(&self, completed: u64) -> bool {
        self(completed)
    }
}

/// Signal that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    #[inline]
    fn should_stop(&self, _completed: u64) -> bool {
        false
    }
}

/// Shared flag that another thread can raise.
///
/// # Examples
///
/// ```rust
/// use exotic_engine::mc::{CancellationToken, StopSignal};
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(!token.should_stop(0));
/// handle.cancel();
/// assert!(token.should_stop(0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; visible to every clone.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl StopSignal for CancellationToken {
    #[inline]
    fn should_stop(&self, _completed: u64) -> bool {
        self.is_cancelled()
    }
}

/// Fires once a point in time has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// Deadline at `at`.
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    /// Whether the deadline has passed.
    #[inline]
    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.at
    }
}

impl StopSignal for Deadline {
    #[inline]
    fn should_stop(&self, _completed: u64) -> bool {
        self.has_passed()
    }
}

/// Caller signal combined with the configured time budget.
pub(crate) struct RunStop<'a, S: ?Sized> {
    signal: &'a S,
    deadline: Option<Deadline>,
}

impl<'a, S: StopSignal + ?Sized> RunStop<'a, S> {
    pub(crate) fn new(signal: &'a S, budget: Option<Duration>) -> Self {
        Self {
            signal,
            deadline: budget.map(Deadline::after),
        }
    }

    #[inline]
    pub(crate) fn should_stop(&self, completed: u64) -> bool {
        self.signal.should_stop(completed) || self.deadline.is_some_and(|d| d.has_passed())
    }
}
