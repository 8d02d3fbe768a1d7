//! Core trait for Simulated Annealing.

use rand::Rng;

/// A mutable search state that Simulated Annealing can drive in place.
///
/// The implementor owns the candidate solution and exposes four
/// capabilities: evaluate, perturb, snapshot and restore. The SA
/// framework handles temperature management, the acceptance criterion,
/// rollback of rejected moves, and best-state tracking.
///
/// # Minimization
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_anneal_route::sa::SaState;
///
/// struct Line { x: f64 }
///
/// impl SaState for Line {
///     type Snapshot = f64;
///     type Error = std::convert::Infallible;
///
///     fn cost(&self) -> Result<f64, Self::Error> { Ok(self.x.abs()) }
///
///     fn perturb<R: Rng>(&mut self, rng: &mut R) {
///         self.x += rng.random_range(-1.0..1.0);
///     }
///
///     fn snapshot(&self) -> f64 { self.x }
///
///     fn restore(&mut self, snapshot: f64) { self.x = snapshot; }
/// }
/// ```
///
/// # References
///
/// Kirkpatrick et al. (1983), Cerny (1985)
pub trait SaState {
    /// An independently owned copy of the state, sufficient to undo a
    /// perturbation. Also the representation of the reported best.
    type Snapshot: Clone;

    /// Error raised when the cost cannot be evaluated.
    type Error: std::error::Error + 'static;

    /// Computes the cost of the current state. Lower is better.
    ///
    /// Must not mutate the state.
    fn cost(&self) -> Result<f64, Self::Error>;

    /// Applies a small random modification in place.
    ///
    /// The neighborhood must be connected (any state reachable from any
    /// other via a sequence of perturbations).
    fn perturb<R: Rng>(&mut self, rng: &mut R);

    /// Captures the current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replaces the current state with the snapshot's contents exactly.
    fn restore(&mut self, snapshot: Self::Snapshot);
}
