//! # Bundled Problems
//!
//! Minimal problem definitions used to exercise the search contract: a
//! continuous benchmark function and a symmetric travelling-salesman tour.

pub mod distance;
pub mod sphere;
pub mod tour;

pub use distance::DistanceMatrix;
pub use sphere::{Sphere, SphereCost};
pub use tour::{Tour, TourLength};
