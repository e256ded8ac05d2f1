//! # trajex
//!
//! Trajectory-based local search: a problem contract, neighborhood structures,
//! a multi-mode hill climber and a bridge that reuses neighborhoods as mutation
//! operators.
//!
//! ```rust
//! use trajex::prelude::*;
//!
//! let instance = Instance::new(Sphere::new(3, 5.0).unwrap())
//!     .unwrap()
//!     .with_cost_evaluator(SphereCost)
//!     .with_seed(42);
//! let config = HillClimbingConfig::builder()
//!     .mode(ClimbMode::IteratedDefault)
//!     .max_iterations(500)
//!     .restarts(4)
//!     .build();
//!
//! let mut climber = HillClimbing::new(instance, RandomStep::new(0.5).unwrap(), config).unwrap();
//! let result = climber.execute().unwrap();
//! assert_eq!(result.restarts, 4);
//! ```

pub mod error;
pub mod mutation;
pub mod neighborhood;
pub mod problem;
pub mod problems;
pub mod rng;
pub mod solution;
pub mod trajectory;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, SearchError};

pub mod prelude {
    pub use crate::error::{Result, SearchError};
    pub use crate::mutation::{MutationOperator, NeighborhoodMutation, TwoOptMutation};
    pub use crate::neighborhood::{DistanceTwoOpt, Neighbor, NeighborhoodStructure, RandomStep, TwoOpt};
    pub use crate::problem::{CostEvaluator, Instance, Problem};
    pub use crate::problems::{DistanceMatrix, Sphere, SphereCost, Tour, TourLength};
    pub use crate::rng::RandomNumberGenerator;
    pub use crate::solution::Solution;
    pub use crate::trajectory::{
        ClimbMode, HillClimbing, HillClimbingConfig, IterationEvent, IterationHook, SearchResult,
        TrajectoryHeuristic,
    };
}
