//! The [`RandomSource`] abstraction and its draw buffer.

use std::ops::Deref;
use thiserror::Error;

/// Seed validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeedError {
    /// The seed is zero or outside the generator's valid range.
    #[error("Invalid seed {seed}: must be in [{min}, {max}]")]
    SeedInvalid {
        /// Rejected seed
        seed: u64,
        /// Smallest valid seed
        min: u64,
        /// Largest valid seed
        max: u64,
    },
}

/// Ordered sequence of standard normal deviates for one path.
///
/// Owned by the iteration that requested it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawSequence {
    draws: Vec<f64>,
}

impl DrawSequence {
    /// Number of deviates.
    #[inline]
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// Whether the sequence holds no deviates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Consumes the sequence, returning the deviates.
    pub fn into_vec(self) -> Vec<f64> {
        self.draws
    }
}

impl Deref for DrawSequence {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.draws
    }
}

impl From<Vec<f64>> for DrawSequence {
    fn from(draws: Vec<f64>) -> Self {
        Self { draws }
    }
}

/// Deterministic source of standard normal draws.
///
/// Two sources constructed with the same seed produce the same stream for the
/// same sequence of calls. Engines use sources through static dispatch; each
/// worker owns its source exclusively.
pub trait RandomSource: Send {
    /// Overwrites every element of `draws` with a standard normal deviate.
    fn fill_gaussians(&mut self, draws: &mut [f64]);

    /// Rewinds the source to the state it had right after construction.
    fn reset(&mut self);

    /// Advances the stream as if `sequences` draw sequences of length `len`
    /// had been generated and discarded.
    fn skip(&mut self, sequences: usize, len: usize) {
        let mut scratch = vec![0.0; len];
        for _ in 0..sequences {
            self.fill_gaussians(&mut scratch);
        }
    }

    /// Returns a freshly allocated sequence of `n` deviates.
    fn generate(&mut self, n: usize) -> DrawSequence {
        let mut draws = vec![0.0; n];
        self.fill_gaussians(&mut draws);
        DrawSequence::from(draws)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    #[inline]
    fn fill_gaussians(&mut self, draws: &mut [f64]) {
        (**self).fill_gaussians(draws)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn skip(&mut self, sequences: usize, len: usize) {
        (**self).skip(sequences, len)
    }
}
