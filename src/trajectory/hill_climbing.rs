//! # Hill Climbing
//!
//! Four execution modes share two single-trajectory loops:
//!
//! - **Default**: starting from the instance's initial solution, draw a random
//!   neighbor each iteration and move to it only if its cost is strictly lower.
//!   Ties are rejected, so the walk can stall on plateaus.
//! - **Stochastic**: draw `r` uniformly from `[0, 1)` and move iff `r < p`, with
//!   `p = 1 / (1 + exp((|c| - |c'|) / T))` where `c` is the current cost and
//!   `c'` the candidate cost. Costs enter the rule as magnitudes, not as a
//!   signed difference; see [`acceptance_probability`].
//! - **Iterated default / iterated stochastic**: run the corresponding loop
//!   `restarts` times, each from the same cached initial solution, and keep the
//!   strictly best result. Callers wanting diversified restarts clear the
//!   instance's initial solution themselves.
//!
//! Every candidate is clamped with the problem's `range_solution_values` before
//! it is evaluated, and the iteration hook sees every candidate, accepted or not.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::error::{Result, SearchError};
use crate::neighborhood::{Neighbor, NeighborhoodStructure};
use crate::problem::{Instance, Problem, Scorer};
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

use super::options::{ClimbMode, HillClimbingConfig, InnerLoop};
use super::{IterationEvent, IterationHook, NoopHook, SearchResult, TrajectoryHeuristic};

/// Probability of moving from a solution of cost `current_cost` to a candidate
/// of cost `candidate_cost` in the stochastic modes:
///
/// ```text
/// p = 1 / (1 + exp((|current_cost| - |candidate_cost|) / temperature))
/// ```
///
/// Equal magnitudes give exactly 0.5, and so does an infinite temperature. As
/// the temperature approaches zero the rule becomes a step function of the
/// magnitude gap. Because magnitudes are compared, problems with negative
/// (fitness-style) costs behave differently than under a signed Metropolis
/// criterion.
///
/// # Examples
///
/// ```
/// use trajex::trajectory::acceptance_probability;
///
/// assert_eq!(acceptance_probability(3.0, -3.0, 1.0), 0.5);
/// let p = acceptance_probability(2.0, 1.0, 1.0);
/// assert!((p - 1.0 / (1.0 + 1f64.exp())).abs() < 1e-12);
/// ```
pub fn acceptance_probability(current_cost: f64, candidate_cost: f64, temperature: f64) -> f64 {
    1.0 / (1.0 + ((current_cost.abs() - candidate_cost.abs()) / temperature).exp())
}

/// A hill climbing search over a problem instance.
///
/// # Examples
///
/// ```
/// use trajex::neighborhood::RandomStep;
/// use trajex::problem::Instance;
/// use trajex::problems::{Sphere, SphereCost};
/// use trajex::trajectory::{HillClimbing, HillClimbingConfig, TrajectoryHeuristic};
///
/// let instance = Instance::new(Sphere::new(4, 10.0).unwrap())
///     .unwrap()
///     .with_cost_evaluator(SphereCost)
///     .with_seed(3);
/// let config = HillClimbingConfig::builder().max_iterations(2000).build();
///
/// let mut climber = HillClimbing::new(instance, RandomStep::new(1.0).unwrap(), config).unwrap();
/// let start = climber.instance_mut().initial_solution().unwrap().clone();
/// let start_cost = climber.instance().evaluate(&start).unwrap();
///
/// let result = climber.execute().unwrap();
/// assert!(result.cost <= start_cost);
/// ```
pub struct HillClimbing<P: Problem, N, H = NoopHook> {
    instance: Instance<P>,
    neighborhood: N,
    config: HillClimbingConfig,
    hook: H,
}

impl<P, N> HillClimbing<P, N, NoopHook>
where
    P: Problem,
    N: NeighborhoodStructure<P::Value>,
{
    /// Creates a hill climbing search without an iteration hook.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config is invalid or the instance
    /// has no cost evaluator.
    pub fn new(instance: Instance<P>, neighborhood: N, config: HillClimbingConfig) -> Result<Self> {
        config.validate()?;
        instance.scorer()?;

        Ok(Self {
            instance,
            neighborhood,
            config,
            hook: NoopHook,
        })
    }
}

impl<P, N, H> HillClimbing<P, N, H>
where
    P: Problem,
    N: NeighborhoodStructure<P::Value>,
    H: IterationHook<P::Value>,
{
    /// Replaces the iteration hook.
    pub fn with_hook<G>(self, hook: G) -> HillClimbing<P, N, G>
    where
        G: IterationHook<P::Value>,
    {
        HillClimbing {
            instance: self.instance,
            neighborhood: self.neighborhood,
            config: self.config,
            hook,
        }
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    pub fn neighborhood(&self) -> &N {
        &self.neighborhood
    }

    pub fn config(&self) -> &HillClimbingConfig {
        &self.config
    }

    /// Replaces the configuration after validating it.
    pub fn set_config(&mut self, config: HillClimbingConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn into_parts(self) -> (Instance<P>, N, H) {
        (self.instance, self.neighborhood, self.hook)
    }

    /// Runs the restarts of an iterated mode on the rayon thread pool.
    ///
    /// Each restart gets its own stream, seeded from a value drawn sequentially
    /// from the instance stream, so a seeded instance gives the same result as
    /// long as the restart count is unchanged. The iteration hook is not called.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configured mode is not iterated.
    #[tracing::instrument(level = "debug", name = "Parallel Hill Climbing", skip(self))]
    pub fn execute_parallel(&mut self) -> Result<SearchResult<P::Value>> {
        let config = self.config;
        let mode = config.get_mode();
        if !mode.is_iterated() {
            return Err(SearchError::Configuration(format!(
                "Parallel execution requires an iterated mode, got {}",
                mode
            )));
        }

        let start = self.instance.initial_solution()?.clone();
        let (scorer, rng) = self.instance.split()?;
        let start_cost = scorer.score(&start)?;
        let seeds: Vec<u64> = (0..config.get_restarts())
            .map(|_| rng.derive_seed())
            .collect();

        let climb = Climb {
            scorer,
            neighborhood: &self.neighborhood,
            config: &config,
            cancel: None,
        };
        let inner = mode.inner_loop();

        let runs = seeds
            .par_iter()
            .enumerate()
            .map(|(restart, &seed)| {
                let mut run_rng = RandomNumberGenerator::from_seed(seed);
                climb.run(start.clone(), inner, restart, &mut run_rng, &mut NoopHook)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut best = starting_point(start, start_cost);
        for (restart, run) in runs.into_iter().enumerate() {
            absorb(&mut best, run, restart);
        }

        tracing::debug!(
            mode = %mode,
            cost = best.cost,
            iterations = best.iterations,
            "Parallel hill climbing finished"
        );
        Ok(best)
    }

    fn execute_default(&mut self, cancel: Option<&AtomicBool>) -> Result<SearchResult<P::Value>> {
        self.execute_single(InnerLoop::Default, cancel)
    }

    fn execute_stochastic(
        &mut self,
        cancel: Option<&AtomicBool>,
    ) -> Result<SearchResult<P::Value>> {
        self.execute_single(InnerLoop::Stochastic, cancel)
    }

    fn execute_single(
        &mut self,
        inner: InnerLoop,
        cancel: Option<&AtomicBool>,
    ) -> Result<SearchResult<P::Value>> {
        let config = self.config;
        let start = self.instance.initial_solution()?.clone();
        let (scorer, rng) = self.instance.split()?;

        let climb = Climb {
            scorer,
            neighborhood: &self.neighborhood,
            config: &config,
            cancel,
        };
        climb.run(start, inner, 0, rng, &mut self.hook)
    }

    fn execute_iterated(
        &mut self,
        inner: InnerLoop,
        cancel: Option<&AtomicBool>,
    ) -> Result<SearchResult<P::Value>> {
        let config = self.config;
        let start = self.instance.initial_solution()?.clone();
        let (scorer, rng) = self.instance.split()?;
        let start_cost = scorer.score(&start)?;

        let climb = Climb {
            scorer,
            neighborhood: &self.neighborhood,
            config: &config,
            cancel,
        };

        let mut best = starting_point(start.clone(), start_cost);
        for restart in 0..config.get_restarts() {
            let run = climb.run(start.clone(), inner, restart, rng, &mut self.hook)?;
            let cancelled = run.cancelled;
            absorb(&mut best, run, restart);
            if cancelled {
                break;
            }
        }

        Ok(best)
    }
}

impl<P, N, H> TrajectoryHeuristic<P> for HillClimbing<P, N, H>
where
    P: Problem,
    N: NeighborhoodStructure<P::Value>,
    H: IterationHook<P::Value>,
{
    fn instance(&self) -> &Instance<P> {
        &self.instance
    }

    fn instance_mut(&mut self) -> &mut Instance<P> {
        &mut self.instance
    }

    fn max_iterations(&self) -> usize {
        self.config.get_max_iterations()
    }

    #[tracing::instrument(level = "debug", name = "Hill Climbing", skip(self, cancel))]
    fn execute_with_cancel(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<P::Value>> {
        let cancel = cancel.as_deref();
        let mode = self.config.get_mode();

        let result = match mode {
            ClimbMode::Default => self.execute_default(cancel),
            ClimbMode::Stochastic => self.execute_stochastic(cancel),
            ClimbMode::IteratedDefault | ClimbMode::IteratedStochastic => {
                self.execute_iterated(mode.inner_loop(), cancel)
            }
        }?;

        tracing::debug!(
            mode = %mode,
            cost = result.cost,
            iterations = result.iterations,
            accepted = result.accepted_moves,
            cancelled = result.cancelled,
            "Hill climbing finished"
        );
        Ok(result)
    }
}

impl<P, N, H> fmt::Debug for HillClimbing<P, N, H>
where
    P: Problem,
    N: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HillClimbing")
            .field("instance", &self.instance)
            .field("neighborhood", &self.neighborhood)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// One single-trajectory loop over borrowed search components.
struct Climb<'a, P: Problem, N> {
    scorer: Scorer<'a, P>,
    neighborhood: &'a N,
    config: &'a HillClimbingConfig,
    cancel: Option<&'a AtomicBool>,
}

impl<P, N> Climb<'_, P, N>
where
    P: Problem,
    N: NeighborhoodStructure<P::Value>,
{
    fn run<G>(
        &self,
        mut current: Solution<P::Value>,
        inner: InnerLoop,
        restart: usize,
        rng: &mut RandomNumberGenerator,
        hook: &mut G,
    ) -> Result<SearchResult<P::Value>>
    where
        G: IterationHook<P::Value> + ?Sized,
    {
        let temperature = self.config.get_temperature();
        let mut current_cost = self.scorer.score(&current)?;
        let mut iterations = 0;
        let mut accepted_moves = 0;
        let mut improving_moves = 0;
        let mut cancelled = false;

        for iteration in 0..self.config.get_max_iterations() {
            if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                tracing::warn!(restart, iteration, "Hill climbing cancelled");
                cancelled = true;
                break;
            }

            let Neighbor {
                solution: mut candidate,
                cost_delta,
            } = self
                .neighborhood
                .random_neighbor_with_rng(&current, None, rng)?;
            self.scorer.clamp(&mut candidate);
            let candidate_cost = self.scorer.score(&candidate)?;

            let improving = candidate_cost < current_cost;
            let accepted = match inner {
                InnerLoop::Default => improving,
                InnerLoop::Stochastic => {
                    rng.uniform() < acceptance_probability(current_cost, candidate_cost, temperature)
                }
            };
            iterations += 1;

            hook.on_iteration(&IterationEvent {
                restart,
                iteration,
                candidate: &candidate,
                candidate_cost,
                cost_delta,
                accepted,
                incumbent_cost: if accepted {
                    candidate_cost
                } else {
                    current_cost
                },
            });

            if accepted {
                tracing::trace!(restart, iteration, cost = candidate_cost, "Accepted candidate");
                accepted_moves += 1;
                if improving {
                    improving_moves += 1;
                }
                current = candidate;
                current_cost = candidate_cost;
            }
        }

        Ok(SearchResult {
            solution: current,
            cost: current_cost,
            iterations,
            accepted_moves,
            improving_moves,
            restarts: usize::from(!cancelled),
            cancelled,
        })
    }
}

fn starting_point<T>(solution: Solution<T>, cost: f64) -> SearchResult<T> {
    SearchResult {
        solution,
        cost,
        iterations: 0,
        accepted_moves: 0,
        improving_moves: 0,
        restarts: 0,
        cancelled: false,
    }
}

/// Folds one outer run into the running best-of-runs result.
fn absorb<T>(best: &mut SearchResult<T>, run: SearchResult<T>, restart: usize) {
    best.iterations += run.iterations;
    best.accepted_moves += run.accepted_moves;
    best.improving_moves += run.improving_moves;
    best.restarts += run.restarts;
    best.cancelled |= run.cancelled;

    if run.cost < best.cost {
        tracing::debug!(restart, cost = run.cost, previous = best.cost, "New best restart");
        best.solution = run.solution;
        best.cost = run.cost;
    }
}
