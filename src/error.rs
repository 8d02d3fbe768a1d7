//! Error types for route planning.

use crate::sa::SaError;
use thiserror::Error;

/// Main error type for the routing domain.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    /// A cost evaluation referenced a pair outside the distance matrix.
    #[error("no distance from location #{from} to #{to} in a {size}x{size} matrix")]
    MissingDistance { from: usize, to: usize, size: usize },

    /// The anchor name does not belong to the location set.
    #[error("anchor location '{0}' is not in the location set")]
    UnknownAnchor(String),

    /// The anchor id does not appear in the tour being rotated.
    #[error("anchor location #{0} does not appear in the tour")]
    AnchorNotInTour(usize),

    /// Two locations share a name.
    #[error("duplicate location name '{0}'")]
    DuplicateLocation(String),

    /// A tour referenced an id with no location behind it.
    #[error("location #{0} is not in the location set")]
    UnknownLocation(usize),

    /// A sequence of ids is not a permutation.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    /// Raw matrix data breaks the matrix invariants.
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),

    /// Invalid annealing or routing configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<SaError<RouteError>> for RouteError {
    fn from(err: SaError<RouteError>) -> Self {
        match err {
            SaError::Config(msg) => RouteError::Config(msg),
            SaError::State(err) => err,
        }
    }
}

/// Result type alias for route planning operations.
pub type Result<T> = std::result::Result<T, RouteError>;
