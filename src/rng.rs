//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single random stream threaded
//! through every stochastic operation: random solution generation, neighbor
//! generation, stochastic acceptance and mutation triggers. Seeding it once
//! makes a whole run reproducible.
//!
//! ## Example
//!
//! ```rust
//! use trajex::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::from_seed(7);
//! let mut b = RandomNumberGenerator::from_seed(7);
//!
//! assert_eq!(a.uniform(), b.uniform());
//! assert_eq!(a.index(10), b.index(10));
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::error::{Result, SearchError};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws
/// needed by the search components.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reinitializes the stream in place, as if it had been created with `from_seed(seed)`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Draws a value uniformly from `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws a value uniformly from `[low, high]`.
    ///
    /// A degenerate range (`low == high`) returns `low`.
    pub fn uniform_in(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    /// Draws an index uniformly from `[0, upper)`. `upper` must be positive.
    pub fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Draws two distinct indices uniformly from `[0, upper)`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `upper < 2`; nothing is drawn then.
    pub fn distinct_pair(&mut self, upper: usize) -> Result<(usize, usize)> {
        if upper < 2 {
            return Err(SearchError::Configuration(format!(
                "At least two positions are required, got {}",
                upper
            )));
        }
        let first = self.index(upper);
        let mut second = self.index(upper - 1);
        if second >= first {
            second += 1;
        }
        Ok((first, second))
    }

    /// Shuffles `values` in place.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }

    /// Draws a seed for an independent child stream.
    pub fn derive_seed(&mut self) -> u64 {
        self.rng.gen::<u64>()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
