//! # Problem
//!
//! The `Problem` trait describes a search space: its dimension, the value
//! range of every index, how to draw a random solution and how to clamp values
//! back into range. The `CostEvaluator` trait maps a solution to a cost, lower
//! is better.
//!
//! An [`Instance`] binds a problem to everything a run needs: the cost
//! evaluator, the shared random stream, the (lazily generated) initial
//! solution and the optional known optimal cost. Every stochastic operation
//! reachable from an instance consumes its stream, so seeding the instance
//! once makes a run reproducible.
//!
//! ## Example
//!
//! ```rust
//! use trajex::problem::Instance;
//! use trajex::problems::{Sphere, SphereCost};
//!
//! let mut instance = Instance::new(Sphere::new(3, 100.0).unwrap())
//!     .unwrap()
//!     .with_cost_evaluator(SphereCost)
//!     .with_seed(42);
//!
//! let first = instance.initial_solution().unwrap().clone();
//! let second = instance.initial_solution().unwrap().clone();
//! assert_eq!(first, second);
//!
//! let cost = instance.evaluate(&first).unwrap();
//! assert!(cost >= 0.0);
//! ```

use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::error::{ensure_finite, OptionExt, Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

/// Maps a solution to its cost. Lower is better.
///
/// Evaluators must be deterministic: the same values always yield the same cost.
/// Any `Fn(&[T]) -> f64` closure is an evaluator.
pub trait CostEvaluator<T>: Send + Sync {
    /// Returns the cost of `values`.
    fn eval(&self, values: &[T]) -> f64;
}

impl<T, F> CostEvaluator<T> for F
where
    F: Fn(&[T]) -> f64 + Send + Sync,
{
    fn eval(&self, values: &[T]) -> f64 {
        self(values)
    }
}

/// Describes the structure of a search space.
pub trait Problem: Debug + Send + Sync {
    /// The type of a single solution value.
    type Value: Clone + Debug + PartialEq + Send + Sync;

    /// Returns the dimension of the problem. Every solution has exactly this many values.
    fn dimension(&self) -> usize;

    /// Returns the minimal and maximal values allowed at `idx`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::OutOfBounds` if `idx >= self.dimension()`.
    fn value_range(&self, idx: usize) -> Result<(f64, f64)>;

    /// Creates a new uniformly random, range-valid solution using `rng`.
    fn new_random_solution(&self, rng: &mut RandomNumberGenerator) -> Solution<Self::Value>;

    /// Clamps every value into its declared range.
    fn range_solution_values(&self, values: &mut [Self::Value]);
}

fn missing_evaluator() -> SearchError {
    SearchError::Configuration("Cost evaluator not specified".to_string())
}

/// A problem bound to a cost evaluator, a random stream and an initial solution.
pub struct Instance<P: Problem> {
    problem: P,
    evaluator: Option<Arc<dyn CostEvaluator<P::Value>>>,
    rng: RandomNumberGenerator,
    initial_solution: Option<Solution<P::Value>>,
    optimal_solution_cost: Option<f64>,
}

impl<P: Problem> Instance<P> {
    /// Creates an instance with an entropy-seeded stream and no cost evaluator.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the problem dimension is zero.
    pub fn new(problem: P) -> Result<Self> {
        if problem.dimension() == 0 {
            return Err(SearchError::Configuration(
                "Problem dimension must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            problem,
            evaluator: None,
            rng: RandomNumberGenerator::new(),
            initial_solution: None,
            optimal_solution_cost: None,
        })
    }

    /// Attaches a cost evaluator.
    pub fn with_cost_evaluator<E>(mut self, evaluator: E) -> Self
    where
        E: CostEvaluator<P::Value> + 'static,
    {
        self.set_cost_evaluator(evaluator);
        self
    }

    /// Seeds the shared random stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_random_seed(seed);
        self
    }

    /// Replaces the cost evaluator.
    pub fn set_cost_evaluator<E>(&mut self, evaluator: E)
    where
        E: CostEvaluator<P::Value> + 'static,
    {
        self.evaluator = Some(Arc::new(evaluator));
    }

    /// Returns true if a cost evaluator is attached.
    pub fn has_cost_evaluator(&self) -> bool {
        self.evaluator.is_some()
    }

    /// Reinitializes the shared random stream deterministically.
    pub fn set_random_seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Returns the shared random stream.
    pub fn rng_mut(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    /// Returns the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn dimension(&self) -> usize {
        self.problem.dimension()
    }

    pub fn value_range(&self, idx: usize) -> Result<(f64, f64)> {
        self.problem.value_range(idx)
    }

    pub fn range_solution_values(&self, values: &mut [P::Value]) {
        self.problem.range_solution_values(values);
    }

    /// Draws a new random solution from the shared stream.
    pub fn new_random_solution(&mut self) -> Result<Solution<P::Value>> {
        let solution = self.problem.new_random_solution(&mut self.rng);
        self.check_dimension(&solution)?;
        Ok(solution)
    }

    /// Returns the initial solution, generating and caching a random one on first access.
    ///
    /// Later calls return the cached solution until it is replaced or cleared.
    pub fn initial_solution(&mut self) -> Result<&Solution<P::Value>> {
        if self.initial_solution.is_none() {
            let solution = self.new_random_solution()?;
            self.initial_solution = Some(solution);
        }

        self.initial_solution.as_ref().ok_or_else(|| {
            SearchError::Other("Initial solution could not be generated".to_string())
        })
    }

    /// Informs the initial solution. Values are clamped into range.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::DimensionMismatch` if the length differs from the dimension.
    pub fn set_initial_solution(&mut self, mut solution: Solution<P::Value>) -> Result<()> {
        self.check_dimension(&solution)?;
        self.problem.range_solution_values(solution.values_mut());
        self.initial_solution = Some(solution);
        Ok(())
    }

    /// Drops the cached initial solution; the next access draws a fresh one.
    pub fn clear_initial_solution(&mut self) {
        self.initial_solution = None;
    }

    /// Returns true if an initial solution was informed or already generated.
    pub fn has_initial_solution(&self) -> bool {
        self.initial_solution.is_some()
    }

    /// Returns the cost of the optimal solution, if known.
    pub fn optimal_solution_cost(&self) -> Option<f64> {
        self.optimal_solution_cost
    }

    pub fn set_optimal_solution_cost(&mut self, cost: Option<f64>) {
        self.optimal_solution_cost = cost;
    }

    /// Evaluates the cost of `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no cost evaluator is attached
    /// - the length of `values` differs from the dimension
    /// - the evaluator returns NaN or an infinity
    pub fn evaluate(&self, values: &[P::Value]) -> Result<f64> {
        self.scorer()?.score(values)
    }

    pub(crate) fn scorer(&self) -> Result<Scorer<'_, P>> {
        let evaluator = self
            .evaluator
            .as_deref()
            .ok_or_else_search(missing_evaluator)?;

        Ok(Scorer {
            problem: &self.problem,
            evaluator,
        })
    }

    /// Splits the instance into a read-only scorer and the mutable stream.
    pub(crate) fn split(&mut self) -> Result<(Scorer<'_, P>, &mut RandomNumberGenerator)> {
        let evaluator = self
            .evaluator
            .as_deref()
            .ok_or_else_search(missing_evaluator)?;

        Ok((
            Scorer {
                problem: &self.problem,
                evaluator,
            },
            &mut self.rng,
        ))
    }

    fn check_dimension(&self, values: &[P::Value]) -> Result<()> {
        let expected = self.problem.dimension();
        if values.len() != expected {
            return Err(SearchError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(())
    }
}

impl<P: Problem> Debug for Instance<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("problem", &self.problem)
            .field("has_cost_evaluator", &self.evaluator.is_some())
            .field("initial_solution", &self.initial_solution)
            .field("optimal_solution_cost", &self.optimal_solution_cost)
            .finish()
    }
}

/// Read-only view of an instance used by the search loops.
pub(crate) struct Scorer<'a, P: Problem> {
    problem: &'a P,
    evaluator: &'a dyn CostEvaluator<P::Value>,
}

impl<P: Problem> Clone for Scorer<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Problem> Copy for Scorer<'_, P> {}

impl<P: Problem> Scorer<'_, P> {
    pub(crate) fn score(&self, values: &[P::Value]) -> Result<f64> {
        let expected = self.problem.dimension();
        if values.len() != expected {
            return Err(SearchError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        ensure_finite(self.evaluator.eval(values))
    }

    pub(crate) fn clamp(&self, solution: &mut Solution<P::Value>) {
        self.problem.range_solution_values(solution.values_mut());
    }
}
