use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

use super::{Neighbor, NeighborhoodStructure};

/// Moves one coordinate of a continuous solution by a uniform step in `[-step, step]`.
///
/// The first position hint selects the coordinate; without hints it is drawn
/// at random. The neighbor may leave the feasible box; callers clamp it with
/// the problem's `range_solution_values`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomStep {
    step: f64,
}

impl RandomStep {
    /// Creates a step neighborhood.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `step` is not positive and finite.
    pub fn new(step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(SearchError::Configuration(
                "Step size must be positive and finite".to_string(),
            ));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl NeighborhoodStructure<f64> for RandomStep {
    fn random_neighbor_with_rng(
        &self,
        current: &[f64],
        positions: Option<(usize, usize)>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Neighbor<f64>> {
        if current.is_empty() {
            return Err(SearchError::Configuration(
                "Cannot perturb an empty solution".to_string(),
            ));
        }

        let idx = match positions {
            Some((idx, _)) if idx >= current.len() => {
                return Err(SearchError::OutOfBounds(format!(
                    "position {} for length {}",
                    idx,
                    current.len()
                )));
            }
            Some((idx, _)) => idx,
            None => rng.index(current.len()),
        };

        let mut values = current.to_vec();
        values[idx] += rng.uniform_in(-self.step, self.step);
        Ok(Neighbor::new(Solution::from(values)))
    }
}
