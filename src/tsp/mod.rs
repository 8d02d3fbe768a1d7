//! Closed-tour routing state.
//!
//! Locations receive dense integer ids at load time; the distance matrix
//! and the tour work on those ids only. [`TourState`] is the
//! [`SaState`](crate::sa::SaState) the annealing engine drives.

mod location;
mod matrix;
mod tour;

pub use location::{Location, LocationSet};
pub use matrix::DistanceMatrix;
pub use tour::{Tour, TourState};
