//! Antithetic variates decorator.
//!
//! Odd-numbered calls pass through a fresh sequence from the wrapped source
//! and remember it; even-numbered calls return its element-wise negation
//! without touching the wrapped source.

use super::source::RandomSource;

/// Antithetic wrapper over any [`RandomSource`].
///
/// # Pairing
///
/// Calls alternate strictly: unreflected, reflected, unreflected, ... A
/// reflected call whose length differs from the remembered sequence cannot be
/// paired; it draws a fresh sequence instead and opens a new pair.
///
/// # Examples
///
/// ```rust
/// use exotic_engine::rng::{Antithetic, ParkMiller, RandomSource};
///
/// let mut source = Antithetic::new(ParkMiller::new(1).unwrap());
/// let first = source.generate(4);
/// let second = source.generate(4);
/// for (a, b) in first.iter().zip(second.iter()) {
///     assert_eq!(*a, -*b);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Antithetic<R> {
    inner: R,
    last: Vec<f64>,
    reflect_next: bool,
}

impl<R: RandomSource> Antithetic<R> {
    /// Wraps `inner`; the first call draws from it.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            last: Vec::new(),
            reflect_next: false,
        }
    }

    /// The wrapped source.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Unwraps the decorator.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Whether the next call returns a reflected sequence.
    #[inline]
    pub fn is_reflecting_next(&self) -> bool {
        self.reflect_next
    }
}

impl<R: RandomSource> RandomSource for Antithetic<R> {
    fn fill_gaussians(&mut self, draws: &mut [f64]) {
        if self.reflect_next && self.last.len() == draws.len() {
            for (out, &base) in draws.iter_mut().zip(self.last.iter()) {
                *out = -base;
            }
            self.reflect_next = false;
            return;
        }

        self.inner.fill_gaussians(draws);
        self.last.clear();
        self.last.extend_from_slice(draws);
        self.reflect_next = true;
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.last.clear();
        self.reflect_next = false;
    }

    fn skip(&mut self, sequences: usize, len: usize) {
        if sequences == 0 {
            return;
        }

        let mut remaining = sequences;
        if self.reflect_next && self.last.len() == len {
            // The pending reflection consumes the first skipped sequence
            remaining -= 1;
        }
        // A pending base of another length cannot pair with `len` draws
        self.reflect_next = false;

        let pairs = remaining / 2;
        self.inner.skip(pairs, len);

        if remaining % 2 == 1 {
            // Half a pair: draw the base so the next call reflects it
            let mut scratch = vec![0.0; len];
            self.fill_gaussians(&mut scratch);
        }
    }
}
