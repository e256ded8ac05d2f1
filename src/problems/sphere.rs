use crate::error::{Result, SearchError};
use crate::problem::{CostEvaluator, Problem};
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

/// The sphere benchmark: minimize the sum of squares over the box `[-bound, bound]^d`.
///
/// The optimum is 0 at the origin.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    dimension: usize,
    bound: f64,
}

impl Sphere {
    /// Cost of the optimal solution.
    pub const OPTIMAL_COST: f64 = 0.0;

    /// Creates a sphere problem.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `dimension` is 0 or `bound` is not
    /// a positive finite number.
    pub fn new(dimension: usize, bound: f64) -> Result<Self> {
        if dimension == 0 {
            return Err(SearchError::Configuration(
                "Dimension must be greater than 0".to_string(),
            ));
        }
        if !(bound.is_finite() && bound > 0.0) {
            return Err(SearchError::Configuration(
                "Bound must be positive and finite".to_string(),
            ));
        }
        Ok(Self { dimension, bound })
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            dimension: 30,
            bound: 100.0,
        }
    }
}

impl Problem for Sphere {
    type Value = f64;

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn value_range(&self, idx: usize) -> Result<(f64, f64)> {
        if idx >= self.dimension {
            return Err(SearchError::OutOfBounds(format!(
                "index {} for dimension {}",
                idx, self.dimension
            )));
        }
        Ok((-self.bound, self.bound))
    }

    fn new_random_solution(&self, rng: &mut RandomNumberGenerator) -> Solution<f64> {
        (0..self.dimension)
            .map(|_| rng.uniform_in(-self.bound, self.bound))
            .collect()
    }

    fn range_solution_values(&self, values: &mut [f64]) {
        for value in values.iter_mut() {
            *value = value.clamp(-self.bound, self.bound);
        }
    }
}

/// Sum of squares.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereCost;

impl CostEvaluator<f64> for SphereCost {
    fn eval(&self, values: &[f64]) -> f64 {
        values.iter().map(|v| v * v).sum()
    }
}
