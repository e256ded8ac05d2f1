//! Dense symmetric distance matrix.

use crate::error::{Result, SearchError};

/// A dense n×n distance matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use trajex::problems::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0)]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes a Euclidean distance matrix from planar coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let size = points.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                let d = (dx * dx + dy * dy).sqrt();
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    /// Creates a distance matrix from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the rows are not square, contain
    /// negative or non-finite distances, or are not symmetric.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(SearchError::Configuration(
                "Distance matrix must be square".to_string(),
            ));
        }

        let data: Vec<f64> = rows.into_iter().flatten().collect();
        if data.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(SearchError::Configuration(
                "Distances must be finite and non-negative".to_string(),
            ));
        }

        let matrix = Self { data, size };
        if !matrix.is_symmetric(1e-9) {
            return Err(SearchError::Configuration(
                "Distance matrix must be symmetric".to_string(),
            ));
        }
        Ok(matrix)
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Length of the closed tour visiting `order` and returning to its first location.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        match order {
            [] | [_] => 0.0,
            [first, .., last] => {
                let open: f64 = order.windows(2).map(|w| self.get(w[0], w[1])).sum();
                open + self.get(*last, *first)
            }
        }
    }

    fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol)
        })
    }
}
