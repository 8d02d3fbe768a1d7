//! SA error type.

use thiserror::Error;

/// Failure of a Simulated Annealing run.
///
/// The engine adds no failure modes of its own beyond rejecting an
/// invalid configuration; everything else comes from the state.
#[derive(Debug, Error)]
pub enum SaError<E: std::error::Error + 'static> {
    /// The configuration failed [`SaConfig::validate`](super::SaConfig::validate).
    #[error("invalid SA configuration: {0}")]
    Config(String),

    /// The state failed to evaluate its cost.
    #[error(transparent)]
    State(E),
}
