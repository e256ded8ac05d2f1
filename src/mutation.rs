//! # Mutation Operators
//!
//! Any [`NeighborhoodStructure`] doubles as a mutation operator for a
//! population-based search: with a given probability the genes are replaced by
//! a random neighbor of themselves.
//!
//! ## Example
//!
//! ```rust
//! use trajex::mutation::{MutationOperator, TwoOptMutation};
//!
//! let mut operator = TwoOptMutation::with_seed(Default::default(), 7);
//! let mut genes = vec![0, 1, 2, 3, 4, 5];
//!
//! assert!(operator.mutate(&mut genes, 1.0).unwrap());
//! assert_ne!(genes, vec![0, 1, 2, 3, 4, 5]);
//!
//! genes.sort_unstable();
//! assert_eq!(genes, vec![0, 1, 2, 3, 4, 5]);
//! ```

use std::fmt::Debug;

use crate::error::{Result, SearchError};
use crate::neighborhood::{NeighborhoodStructure, TwoOpt};
use crate::rng::RandomNumberGenerator;

/// Applies a random change to a gene sequence with a given probability.
pub trait MutationOperator<T> {
    /// Mutates `genes` in place with probability `probability`.
    ///
    /// Returns whether the genes were changed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `probability` is outside `[0, 1]`.
    fn mutate(&mut self, genes: &mut [T], probability: f64) -> Result<bool>;
}

/// Mutation by a random neighbor of a neighborhood structure.
///
/// The trigger draw and the neighbor are taken from the operator's own stream,
/// which is entropy-seeded unless replaced.
#[derive(Debug, Clone)]
pub struct NeighborhoodMutation<N> {
    neighborhood: N,
    rng: RandomNumberGenerator,
}

/// 2-opt segment reversal as a permutation mutation.
pub type TwoOptMutation = NeighborhoodMutation<TwoOpt>;

impl<N> NeighborhoodMutation<N> {
    pub fn new(neighborhood: N) -> Self {
        Self::with_rng(neighborhood, RandomNumberGenerator::new())
    }

    pub fn with_rng(neighborhood: N, rng: RandomNumberGenerator) -> Self {
        Self { neighborhood, rng }
    }

    pub fn with_seed(neighborhood: N, seed: u64) -> Self {
        Self::with_rng(neighborhood, RandomNumberGenerator::from_seed(seed))
    }

    /// Replaces the operator's own stream.
    ///
    /// A clone of an instance's stream is an independent fork. To draw from
    /// the instance's stream itself, pass `instance.rng_mut()` to
    /// [`mutate_with_rng`](Self::mutate_with_rng).
    pub fn set_rng(&mut self, rng: RandomNumberGenerator) {
        self.rng = rng;
    }

    pub fn rng_mut(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    pub fn neighborhood(&self) -> &N {
        &self.neighborhood
    }

    /// Mutates `genes` drawing from `rng` instead of the operator's stream.
    ///
    /// The operator's own stream is left untouched.
    pub fn mutate_with_rng<T>(
        &self,
        genes: &mut [T],
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<bool>
    where
        T: Clone + Debug,
        N: NeighborhoodStructure<T>,
    {
        mutate_genes(&self.neighborhood, genes, probability, rng)
    }
}

impl<T, N> MutationOperator<T> for NeighborhoodMutation<N>
where
    T: Clone + Debug,
    N: NeighborhoodStructure<T>,
{
    fn mutate(&mut self, genes: &mut [T], probability: f64) -> Result<bool> {
        mutate_genes(&self.neighborhood, genes, probability, &mut self.rng)
    }
}

fn mutate_genes<T, N>(
    neighborhood: &N,
    genes: &mut [T],
    probability: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<bool>
where
    T: Clone + Debug,
    N: NeighborhoodStructure<T>,
{
    if !(0.0..=1.0).contains(&probability) {
        return Err(SearchError::Configuration(format!(
            "Mutation probability must be within [0, 1], got {}",
            probability
        )));
    }

    if rng.uniform() >= probability {
        return Ok(false);
    }

    let neighbor = neighborhood.random_neighbor_with_rng(genes, None, rng)?;
    genes.clone_from_slice(&neighbor.solution);
    Ok(true)
}
