//! # Neighborhood Structures
//!
//! A neighborhood structure produces one random neighbor of a solution: a
//! controlled perturbation returned as an independent copy, together with the
//! cost change when the structure can compute it cheaply.
//!
//! Position hints select where the perturbation happens. `None` means the
//! positions are drawn uniformly at random from the valid index range.
//!
//! Randomness always comes from the stream handed to
//! [`NeighborhoodStructure::random_neighbor_with_rng`]. Passing an instance's
//! stream is what makes a run reproducible end to end;
//! [`NeighborhoodStructure::random_neighbor`] falls back to a fresh,
//! entropy-seeded stream.

use std::fmt::Debug;

use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

pub mod random_step;
pub mod two_opt;

pub use random_step::RandomStep;
pub use two_opt::{DistanceTwoOpt, TwoOpt};

/// A neighbor produced by a neighborhood structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<T> {
    /// The perturbed copy.
    pub solution: Solution<T>,
    /// `cost(neighbor) - cost(current)`, when the structure knows it.
    pub cost_delta: Option<f64>,
}

impl<T> Neighbor<T> {
    pub fn new(solution: Solution<T>) -> Self {
        Self {
            solution,
            cost_delta: None,
        }
    }

    pub fn with_delta(solution: Solution<T>, cost_delta: f64) -> Self {
        Self {
            solution,
            cost_delta: Some(cost_delta),
        }
    }
}

/// Generates random neighbors of a solution.
pub trait NeighborhoodStructure<T>: Debug + Send + Sync {
    /// Returns a random neighbor of `current`, drawing positions from `rng`
    /// when `positions` is `None`.
    ///
    /// The returned neighbor never shares storage with `current`.
    fn random_neighbor_with_rng(
        &self,
        current: &[T],
        positions: Option<(usize, usize)>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Neighbor<T>>;

    /// Returns a random neighbor of `current` using a fresh internal stream.
    fn random_neighbor(
        &self,
        current: &[T],
        positions: Option<(usize, usize)>,
    ) -> Result<Neighbor<T>> {
        let mut rng = RandomNumberGenerator::new();
        self.random_neighbor_with_rng(current, positions, &mut rng)
    }
}

/// Resolves a pair of distinct positions in `[0, len)`, ordered so that `lo < hi`.
pub(crate) fn ordered_pair(
    len: usize,
    positions: Option<(usize, usize)>,
    rng: &mut RandomNumberGenerator,
) -> Result<(usize, usize)> {
    if len < 2 {
        return Err(SearchError::Configuration(format!(
            "At least two positions are required, got {}",
            len
        )));
    }

    let (a, b) = match positions {
        Some((a, b)) => {
            if a >= len || b >= len {
                return Err(SearchError::OutOfBounds(format!(
                    "positions ({}, {}) for length {}",
                    a, b, len
                )));
            }
            if a == b {
                return Err(SearchError::Configuration(format!(
                    "Positions must be distinct, got ({}, {})",
                    a, b
                )));
            }
            (a, b)
        }
        None => rng.distinct_pair(len)?,
    };

    Ok((a.min(b), a.max(b)))
}
