//! # Error Types
//!
//! This module defines the error type shared by every search component.
//! Configuration problems are reported as soon as they are detected, either
//! at construction time or on first use, and non-finite costs are surfaced
//! instead of being compared.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use trajex::error::{Result, SearchError};
//!
//! fn budget(max_iterations: usize) -> Result<usize> {
//!     if max_iterations == 0 {
//!         return Err(SearchError::Configuration(
//!             "Maximum iterations must be greater than 0".to_string(),
//!         ));
//!     }
//!     Ok(max_iterations)
//! }
//!
//! assert!(budget(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use trajex::error::{OptionExt, SearchError};
//!
//! fn cheapest(costs: &[f64]) -> trajex::error::Result<f64> {
//!     costs
//!         .iter()
//!         .copied()
//!         .reduce(f64::min)
//!         .ok_or_else_search(|| SearchError::Other("no costs".to_string()))
//! }
//!
//! assert_eq!(cheapest(&[3.0, 1.0]).unwrap(), 1.0);
//! ```

use thiserror::Error;

/// Errors raised by problems, neighborhoods, heuristics and operators.
#[derive(Error, Debug)]
pub enum SearchError {
    /// An invalid or incomplete configuration: a missing cost evaluator, a
    /// zero iteration budget, an unknown mode, a bad position hint.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A solution whose length differs from the problem dimension.
    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The cost evaluator returned NaN or an infinity.
    #[error("Non-finite cost: {0}")]
    NonFiniteCost(f64),

    /// An index outside the declared dimension.
    #[error("Index out of bounds: {0}")]
    OutOfBounds(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T>` using `err_fn` for `None`.
    fn ok_or_else_search<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SearchError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_search<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SearchError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Rejects NaN and infinite costs.
pub(crate) fn ensure_finite(cost: f64) -> Result<f64> {
    if cost.is_finite() {
        Ok(cost)
    } else {
        Err(SearchError::NonFiniteCost(cost))
    }
}
