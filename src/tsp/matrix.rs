//! Dense distance matrix.

use super::location::LocationSet;
use crate::error::{Result, RouteError};
use crate::geo::Metric;

/// A dense n×n distance matrix stored in row-major order, indexed by
/// location id.
///
/// Matrices are symmetric with an exactly-zero diagonal and non-negative
/// finite entries. Constructors enforce this; the matrix is read-only
/// afterwards.
///
/// # Examples
///
/// ```
/// use u_anneal_route::geo::{Coordinate, Metric};
/// use u_anneal_route::tsp::{DistanceMatrix, LocationSet};
///
/// let set = LocationSet::new([
///     ("origin", Coordinate::from_lon_lat(0.0, 0.0)),
///     ("far", Coordinate::from_lon_lat(3.0, 4.0)),
/// ]).unwrap();
/// let dm = DistanceMatrix::from_locations(&set, Metric::Euclidean);
/// assert_eq!(dm.distance(0, 1).unwrap(), 5.0);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes all pairwise distances between the locations.
    ///
    /// Only the upper triangle is evaluated and mirrored, so the result is
    /// symmetric regardless of the metric's rounding.
    pub fn from_locations(locations: &LocationSet, metric: Metric) -> Self {
        let points: Vec<_> = locations.iter().map(|l| l.coordinate()).collect();
        let size = points.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = metric.distance(points[i], points[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Fails if the length is not `size * size`, an entry is negative or
    /// not finite, the diagonal is not zero, or the grid is asymmetric.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(RouteError::InvalidMatrix(format!(
                "expected {} entries for size {size}, got {}",
                size * size,
                data.len()
            )));
        }
        if let Some(bad) = data.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(RouteError::InvalidMatrix(format!(
                "entries must be finite and non-negative, got {bad}"
            )));
        }
        let dm = Self { data, size };
        if !dm.has_zero_diagonal() {
            return Err(RouteError::InvalidMatrix("diagonal must be zero".into()));
        }
        if !dm.is_symmetric(0.0) {
            return Err(RouteError::InvalidMatrix("matrix must be symmetric".into()));
        }
        Ok(dm)
    }

    /// Returns the distance from `from` to `to`, or `None` if either id is
    /// out of range.
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        if from < self.size && to < self.size {
            Some(self.data[from * self.size + to])
        } else {
            None
        }
    }

    /// Like [`get`](Self::get), but a missing pair is an error.
    pub fn distance(&self, from: usize, to: usize) -> Result<f64> {
        self.get(from, to).ok_or(RouteError::MissingDistance {
            from,
            to,
            size: self.size,
        })
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.data[i * self.size + j] - self.data[j * self.size + i]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if every diagonal entry is exactly zero.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.data[i * self.size + i] == 0.0)
    }
}
