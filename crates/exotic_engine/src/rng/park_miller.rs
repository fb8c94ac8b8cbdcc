//! Park-Miller minimal standard generator.
//!
//! Multiplicative linear congruential generator
//! ```text
//! x(n+1) = 16807 · x(n) mod (2³¹ − 1)
//! ```
//! with full period 2³¹ − 2. The product is evaluated with Schrage's
//! decomposition `m = a·q + r` (`q = 127773`, `r = 2836`), so every
//! intermediate fits in 32 signed bits.
//!
//! Reference: Park, S. K. & Miller, K. W. (1988). "Random Number Generators:
//! Good Ones Are Hard to Find". Communications of the ACM 31(10).

use super::source::{RandomSource, SeedError};
use exotic_core::math::inverse_norm_cdf;

const MODULUS: i32 = 2_147_483_647;
const MULTIPLIER: i32 = 16_807;
const SCHRAGE_Q: i32 = 127_773;
const SCHRAGE_R: i32 = 2_836;

/// Maps a state in [1, m − 1] into the open interval (0, 1).
const UNIFORM_SCALE: f64 = 1.0 / (MODULUS as f64 + 1.0);

/// Smallest valid seed.
pub const MIN_SEED: u64 = 1;

/// Largest valid seed, m − 1.
pub const MAX_SEED: u64 = (MODULUS - 1) as u64;

/// Park-Miller generator producing normal deviates by inverse CDF.
///
/// # Examples
///
/// ```rust
/// use exotic_engine::rng::{ParkMiller, RandomSource};
///
/// let mut a = ParkMiller::new(42).unwrap();
/// let mut b = ParkMiller::new(42).unwrap();
/// assert_eq!(a.generate(8), b.generate(8));
///
/// assert!(ParkMiller::new(0).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct ParkMiller {
    state: i32,
    initial_seed: i32,
}

impl ParkMiller {
    /// Creates a generator from a seed in [1, 2³¹ − 2].
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::SeedInvalid`] for zero or out-of-range seeds.
    pub fn new(seed: u64) -> Result<Self, SeedError> {
        let state = Self::checked_seed(seed)?;
        Ok(Self {
            state,
            initial_seed: state,
        })
    }

    fn checked_seed(seed: u64) -> Result<i32, SeedError> {
        if !(MIN_SEED..=MAX_SEED).contains(&seed) {
            return Err(SeedError::SeedInvalid {
                seed,
                min: MIN_SEED,
                max: MAX_SEED,
            });
        }
        // Range checked above
        Ok(seed as i32)
    }

    /// Rebinds the generator to a new seed and makes it the reset point.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::SeedInvalid`] and leaves the state unchanged when
    /// the seed is out of range.
    pub fn reseed(&mut self, seed: u64) -> Result<(), SeedError> {
        let state = Self::checked_seed(seed)?;
        self.state = state;
        self.initial_seed = state;
        Ok(())
    }

    /// The seed this generator resets to.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.initial_seed as u64
    }

    /// Advances the state and returns it, in [1, 2³¹ − 2].
    #[inline]
    pub fn next_integer(&mut self) -> u32 {
        let k = self.state / SCHRAGE_Q;
        let mut next = MULTIPLIER * (self.state - k * SCHRAGE_Q) - k * SCHRAGE_R;
        if next < 0 {
            next += MODULUS;
        }
        self.state = next;
        next as u32
    }

    /// Next uniform variate in the open interval (0, 1).
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        self.next_integer() as f64 * UNIFORM_SCALE
    }

    /// Fills `buffer` with uniforms in (0, 1).
    pub fn fill_uniforms(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_uniform();
        }
    }
}

impl RandomSource for ParkMiller {
    #[inline]
    fn fill_gaussians(&mut self, draws: &mut [f64]) {
        for value in draws.iter_mut() {
            *value = inverse_norm_cdf(self.next_uniform());
        }
    }

    fn reset(&mut self) {
        self.state = self.initial_seed;
    }

    /// Jumps ahead in O(log n) by multiplying the state with `aⁿ mod m`.
    fn skip(&mut self, sequences: usize, len: usize) {
        let steps = (sequences as u128 * len as u128) % PERIOD as u128;
        // Reduced below the period, so it fits in u64
        let factor = pow_mod(MULTIPLIER as u64, steps as u64);
        self.state = (self.state as u64 * factor % MODULUS as u64) as i32;
    }
}

/// Full period of the generator, m − 1.
const PERIOD: u64 = MODULUS as u64 - 1;

/// `base^exp mod m` by square-and-multiply; operands stay below 2³¹.
fn pow_mod(base: u64, mut exp: u64) -> u64 {
    let modulus = MODULUS as u64;
    let mut base = base % modulus;
    let mut acc = 1;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    acc
}
