use std::sync::Arc;

use crate::error::{Result, SearchError};
use crate::problem::{CostEvaluator, Problem};
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

use super::DistanceMatrix;

/// A permutation problem over the cities `0..cities`.
///
/// A solution is a visiting order. Its cost is supplied separately, usually by
/// [`TourLength`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    cities: usize,
}

impl Tour {
    /// Creates a tour problem.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if fewer than two cities are given.
    pub fn new(cities: usize) -> Result<Self> {
        if cities < 2 {
            return Err(SearchError::Configuration(
                "A tour needs at least two cities".to_string(),
            ));
        }
        Ok(Self { cities })
    }

    pub fn cities(&self) -> usize {
        self.cities
    }
}

impl Problem for Tour {
    type Value = usize;

    fn dimension(&self) -> usize {
        self.cities
    }

    fn value_range(&self, idx: usize) -> Result<(f64, f64)> {
        if idx >= self.cities {
            return Err(SearchError::OutOfBounds(format!(
                "index {} for {} cities",
                idx, self.cities
            )));
        }
        Ok((0.0, (self.cities - 1) as f64))
    }

    fn new_random_solution(&self, rng: &mut RandomNumberGenerator) -> Solution<usize> {
        let mut order: Vec<usize> = (0..self.cities).collect();
        rng.shuffle(&mut order);
        Solution::from(order)
    }

    // Valid permutations are never touched.
    fn range_solution_values(&self, values: &mut [usize]) {
        let max = self.cities - 1;
        for value in values.iter_mut() {
            *value = (*value).min(max);
        }
    }
}

/// Closed-tour length over a shared distance matrix.
///
/// Orders referring to a location outside the matrix have no length and
/// evaluate to NaN, which an [`Instance`](crate::problem::Instance) reports as
/// a non-finite cost.
#[derive(Debug, Clone)]
pub struct TourLength {
    distances: Arc<DistanceMatrix>,
}

impl TourLength {
    /// Creates the evaluator for a tour over `cities` locations.
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

    pub fn distances(&self) -> &Arc<DistanceMatrix> {
        &self.distances
    }
}

impl CostEvaluator<usize> for TourLength {
    fn eval(&self, values: &[usize]) -> f64 {
        if values.iter().any(|&city| city >= self.distances.size()) {
            return f64::NAN;
        }
        self.distances.tour_length(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_solution_is_permutation() {
        let tour = Tour::new(12).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(5);

        for _ in 0..50 {
            let mut order = tour.new_random_solution(&mut rng).into_vec();
            order.sort_unstable();
            assert_eq!(order, (0..12).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_too_few_cities() {
        assert!(Tour::new(1).is_err());
        assert!(Tour::new(2).is_ok());
    }

    #[test]
    fn test_tour_length() {
        let dm = Arc::new(DistanceMatrix::from_points(&[(0.0, 0.0), (0.0, 3.0), (4.0, 0.0)]));
        let cost = TourLength::new(dm, 3).unwrap();
        assert!((cost.eval(&[0, 1, 2]) - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_matrix_size_must_match_cities() {
        let dm = Arc::new(DistanceMatrix::from_points(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ]));
        match TourLength::new(dm.clone(), 6) {
            Err(SearchError::Configuration(msg)) => assert!(msg.contains("6 cities")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
        assert!(TourLength::new(dm, 4).is_ok());
    }

    #[test]
    fn test_unknown_city_is_not_a_length() {
        let dm = Arc::new(DistanceMatrix::from_points(&[(0.0, 0.0), (0.0, 3.0), (4.0, 0.0)]));
        let cost = TourLength::new(dm, 3).unwrap();
        assert!(cost.eval(&[0, 1, 7]).is_nan());
    }
}
