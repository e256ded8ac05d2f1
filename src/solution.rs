//! # Solution
//!
//! A `Solution` is one candidate point of the search space: a fixed-length,
//! ordered sequence of values. Continuous problems use `Solution<f64>`,
//! permutation problems use `Solution<usize>`.
//!
//! Solutions have no identity beyond their values. Neighborhoods never modify
//! the solution they are given; they return an independent copy.
//!
//! ## Example
//!
//! ```rust
//! use trajex::solution::Solution;
//!
//! let tour = Solution::from(vec![0usize, 2, 1, 3]);
//! assert_eq!(tour.len(), 4);
//! assert_eq!(tour[1], 2);
//! assert_eq!(tour.into_vec(), vec![0, 2, 1, 3]);
//! ```

use std::ops::Deref;

/// An ordered, fixed-length sequence of values representing one candidate solution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solution<T> {
    values: Vec<T>,
}

impl<T> Solution<T> {
    /// Wraps the given values.
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    /// Returns the values as a slice.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the values as a mutable slice.
    ///
    /// Used by problems to clamp values back into range after a perturbation.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Consumes the solution, returning its values.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T> Deref for Solution<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.values
    }
}

impl<T> From<Vec<T>> for Solution<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T: Clone> From<&[T]> for Solution<T> {
    fn from(values: &[T]) -> Self {
        Self::new(values.to_vec())
    }
}

impl<T> FromIterator<T> for Solution<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
