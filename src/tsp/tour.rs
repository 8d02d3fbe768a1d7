//! Tours and the annealable tour state.

use super::matrix::DistanceMatrix;
use crate::error::{Result, RouteError};
use crate::random::shuffle;
use crate::sa::SaState;
use rand::Rng;

/// A cyclic visiting order: a permutation of the ids `0..len`.
///
/// The edge from the last id back to the first is part of the tour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Visits `0..n` in order.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// A uniformly random permutation of `0..n`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        shuffle(&mut order, rng);
        Self(order)
    }

    /// Wraps an explicit order, checking that it is a permutation of
    /// `0..order.len()`.
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for &id in &order {
            if id >= n {
                return Err(RouteError::InvalidTour(format!(
                    "id {id} out of range for {n} locations"
                )));
            }
            if std::mem::replace(&mut seen[id], true) {
                return Err(RouteError::InvalidTour(format!("id {id} appears twice")));
            }
        }
        Ok(Self(order))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// Sum of the matrix entries over every cyclic edge.
    ///
    /// Tours shorter than two stops cost nothing.
    pub fn cost(&self, matrix: &DistanceMatrix) -> Result<f64> {
        let Some(&last) = self.0.last() else {
            return Ok(0.0);
        };
        if self.0.len() == 1 {
            return Ok(0.0);
        }
        let mut total = 0.0;
        let mut prev = last;
        for &id in &self.0 {
            total += matrix.distance(prev, id)?;
            prev = id;
        }
        Ok(total)
    }

    /// Swaps the stops at positions `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    /// Rotates the tour so that `anchor` comes first, keeping the cyclic
    /// order.
    pub fn rotated_to(&self, anchor: usize) -> Result<Tour> {
        let start = self
            .0
            .iter()
            .position(|&id| id == anchor)
            .ok_or(RouteError::AnchorNotInTour(anchor))?;
        let mut order = self.0.clone();
        order.rotate_left(start);
        Ok(Tour(order))
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A tour under annealing, priced against a shared read-only matrix.
///
/// Perturbation swaps two uniformly drawn positions; drawing the same
/// position twice leaves the tour unchanged.
#[derive(Debug, Clone)]
pub struct TourState<'m> {
    matrix: &'m DistanceMatrix,
    tour: Tour,
}

impl<'m> TourState<'m> {
    pub fn new(matrix: &'m DistanceMatrix, tour: Tour) -> Self {
        Self { matrix, tour }
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }
}

impl SaState for TourState<'_> {
    type Snapshot = Tour;
    type Error = RouteError;

    fn cost(&self) -> Result<f64> {
        self.tour.cost(self.matrix)
    }

    fn perturb<R: Rng>(&mut self, rng: &mut R) {
        let n = self.tour.len();
        if n < 2 {
            return;
        }
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        self.tour.swap(a, b);
    }

    fn snapshot(&self) -> Tour {
        self.tour.clone()
    }

    fn restore(&mut self, snapshot: Tour) {
        self.tour = snapshot;
    }
}
