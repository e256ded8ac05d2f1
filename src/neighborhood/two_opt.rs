//! Random 2-opt moves for permutation encodings.
//!
//! # Move
//!
//! Two distinct positions `lo < hi` are chosen and the segment
//! `order[lo..=hi]` is reversed. On a closed tour this replaces the edges
//! `(order[lo-1], order[lo])` and `(order[hi], order[hi+1])` by
//! `(order[lo-1], order[hi])` and `(order[lo], order[hi+1])`:
//!
//! ```text
//! delta = d(prev, order[hi]) + d(order[lo], next) - d(prev, order[lo]) - d(order[hi], next)
//! ```
//!
//! Reversing the same segment twice restores the original order.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{Result, SearchError};
use crate::problems::DistanceMatrix;
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

use super::{ordered_pair, Neighbor, NeighborhoodStructure};

/// Random segment reversal over any permutation encoding.
///
/// # Examples
///
/// ```
/// use trajex::neighborhood::{NeighborhoodStructure, TwoOpt};
///
/// let order = [0, 1, 2, 3, 4];
/// let neighbor = TwoOpt::new().random_neighbor(&order, Some((3, 1))).unwrap();
/// assert_eq!(neighbor.solution.values(), &[0, 3, 2, 1, 4]);
/// assert_eq!(order, [0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl TwoOpt {
    pub fn new() -> Self {
        Self
    }

    /// Reverses `values[lo..=hi]` in place.
    pub fn reverse_segment<T>(values: &mut [T], lo: usize, hi: usize) {
        values[lo..=hi].reverse();
    }
}

impl<T> NeighborhoodStructure<T> for TwoOpt
where
    T: Clone + Debug + Send + Sync,
{
    fn random_neighbor_with_rng(
        &self,
        current: &[T],
        positions: Option<(usize, usize)>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Neighbor<T>> {
        let (lo, hi) = ordered_pair(current.len(), positions, rng)?;
        let mut values = current.to_vec();
        Self::reverse_segment(&mut values, lo, hi);
        Ok(Neighbor::new(Solution::from(values)))
    }
}

/// A 2-opt move over city indices that also reports the tour length change.
///
/// Assumes a symmetric distance matrix and a closed tour.
#[derive(Debug, Clone)]
pub struct DistanceTwoOpt {
    distances: Arc<DistanceMatrix>,
}

impl DistanceTwoOpt {
    /// Creates the move for tours over `cities` locations.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the matrix does not have exactly
    /// `cities` locations.
    pub fn new(distances: Arc<DistanceMatrix>, cities: usize) -> Result<Self> {
        if distances.size() != cities {
            return Err(SearchError::Configuration(format!(
                "Distance matrix covers {} locations, tour has {} cities",
                distances.size(),
                cities
            )));
        }
        Ok(Self { distances })
    }

    /// Change in closed-tour length caused by reversing `order[lo..=hi]`.
    pub fn delta(&self, order: &[usize], lo: usize, hi: usize) -> f64 {
        let n = order.len();
        if hi - lo + 1 >= n {
            // Reversing the whole cycle only changes its direction.
            return 0.0;
        }
        let d = &self.distances;
        let prev = order[(lo + n - 1) % n];
        let next = order[(hi + 1) % n];

        d.get(prev, order[hi]) + d.get(order[lo], next)
            - d.get(prev, order[lo])
            - d.get(order[hi], next)
    }
}

impl NeighborhoodStructure<usize> for DistanceTwoOpt {
    fn random_neighbor_with_rng(
        &self,
        current: &[usize],
        positions: Option<(usize, usize)>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Neighbor<usize>> {
        let size = self.distances.size();
        if current.len() != size {
            return Err(SearchError::DimensionMismatch {
                expected: size,
                actual: current.len(),
            });
        }
        if let Some(city) = current.iter().find(|&&city| city >= size) {
            return Err(SearchError::OutOfBounds(format!(
                "city {} for {} locations",
                city, size
            )));
        }

        let (lo, hi) = ordered_pair(current.len(), positions, rng)?;
        let delta = self.delta(current, lo, hi);
        let mut values = current.to_vec();
        TwoOpt::reverse_segment(&mut values, lo, hi);
        Ok(Neighbor::with_delta(Solution::from(values), delta))
    }
}
