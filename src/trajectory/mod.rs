//! # Trajectory Heuristics
//!
//! A trajectory heuristic evolves a single current solution over successive
//! steps, as opposed to a population. Each heuristic owns a problem
//! [`Instance`], a neighborhood structure and an iteration budget, and exposes
//! a per-iteration [`IterationHook`] so statistics can be collected without
//! touching the search loop.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::Result;
use crate::problem::{Instance, Problem};
use crate::solution::Solution;

pub mod hill_climbing;
pub mod options;

pub use hill_climbing::{acceptance_probability, HillClimbing};
pub use options::{ClimbMode, HillClimbingConfig, HillClimbingConfigBuilder, InnerLoop};

/// What happened in one inner-loop iteration.
#[derive(Debug, Clone, Copy)]
pub struct IterationEvent<'a, T> {
    /// Index of the outer run; always 0 outside the iterated modes.
    pub restart: usize,
    /// Index of the iteration within the current run.
    pub iteration: usize,
    /// The candidate generated in this iteration, after clamping.
    pub candidate: &'a Solution<T>,
    pub candidate_cost: f64,
    /// Cost change reported by the neighborhood, if any.
    pub cost_delta: Option<f64>,
    /// Whether the candidate replaced the current solution.
    pub accepted: bool,
    /// Cost of the current solution after the acceptance decision.
    pub incumbent_cost: f64,
}

/// Observes every candidate produced by a trajectory heuristic, accepted or not.
///
/// Closures taking `&IterationEvent<'_, T>` are hooks.
pub trait IterationHook<T> {
    fn on_iteration(&mut self, event: &IterationEvent<'_, T>);
}

/// The hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl<T> IterationHook<T> for NoopHook {
    fn on_iteration(&mut self, _event: &IterationEvent<'_, T>) {}
}

impl<T, F> IterationHook<T> for F
where
    F: FnMut(&IterationEvent<'_, T>),
{
    fn on_iteration(&mut self, event: &IterationEvent<'_, T>) {
        self(event)
    }
}

/// The outcome of a trajectory search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<T> {
    /// The returned solution.
    pub solution: Solution<T>,
    /// Its cost.
    pub cost: f64,
    /// Total inner-loop iterations performed across all runs.
    pub iterations: usize,
    /// Candidates that replaced the current solution.
    pub accepted_moves: usize,
    /// Accepted candidates that strictly lowered the cost.
    pub improving_moves: usize,
    /// Completed outer runs; 1 for the single-run modes.
    pub restarts: usize,
    /// Whether the run was stopped by its cancellation flag.
    pub cancelled: bool,
}

/// A search method that maintains and evolves a single current solution.
pub trait TrajectoryHeuristic<P: Problem> {
    fn instance(&self) -> &Instance<P>;

    fn instance_mut(&mut self) -> &mut Instance<P>;

    /// The inner-loop iteration budget.
    fn max_iterations(&self) -> usize;

    /// Runs the search with an optional cancellation flag, checked before every iteration.
    fn execute_with_cancel(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<P::Value>>;

    /// Runs the search to the end of its budget.
    fn execute(&mut self) -> Result<SearchResult<P::Value>> {
        self.execute_with_cancel(None)
    }
}
