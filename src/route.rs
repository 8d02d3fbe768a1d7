//! Route planning: build the matrix, anneal a random tour, rotate the
//! best tour to the anchor.

use crate::error::{Result, RouteError};
use crate::geo::Metric;
use crate::random::create_rng;
use crate::sa::{SaConfig, SaRunner};
use crate::tsp::{DistanceMatrix, LocationSet, Tour, TourState};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

/// Configuration for [`plan_route`].
///
/// # Examples
///
/// ```
/// use u_anneal_route::route::RouteConfig;
/// use u_anneal_route::sa::SaConfig;
///
/// let config = RouteConfig::new("FORTALEZA")
///     .with_annealing(SaConfig::default().with_steps(100_000).with_seed(1));
/// assert_eq!(config.anchor, "FORTALEZA");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteConfig {
    /// Name of the location the reported tour starts at.
    pub anchor: String,

    /// How matrix entries are computed from coordinates.
    pub metric: Metric,

    /// Engine settings. The seed also drives the initial tour.
    pub annealing: SaConfig,
}

impl RouteConfig {
    pub fn new(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            metric: Metric::default(),
            annealing: SaConfig::default(),
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_annealing(mut self, annealing: SaConfig) -> Self {
        self.annealing = annealing;
        self
    }
}

/// Best tour found, starting at the anchor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePlan {
    /// Total length of the closed tour.
    pub cost: f64,

    /// Location names in visiting order, anchor first.
    pub stops: Vec<String>,

    /// Length of the random starting tour.
    pub initial_cost: f64,

    /// Steps the engine executed.
    pub iterations: usize,

    /// Moves the engine kept.
    pub accepted_moves: usize,

    /// Moves that lowered the cost.
    pub improving_moves: usize,

    /// Whether the run stopped early on request.
    pub cancelled: bool,

    /// Sampled best cost over the run.
    pub cost_history: Vec<f64>,
}

/// Plans a short closed tour over `locations`.
pub fn plan_route(locations: &LocationSet, config: &RouteConfig) -> Result<RoutePlan> {
    plan_route_with_cancel(locations, config, None)
}

/// [`plan_route`] with a cancellation flag checked between engine steps.
///
/// A cancelled run still returns the best tour found so far.
pub fn plan_route_with_cancel(
    locations: &LocationSet,
    config: &RouteConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<RoutePlan> {
    let anchor = locations
        .id_of(&config.anchor)
        .ok_or_else(|| RouteError::UnknownAnchor(config.anchor.clone()))?;
    config.annealing.validate().map_err(RouteError::Config)?;

    let matrix = DistanceMatrix::from_locations(locations, config.metric);
    debug!(
        event = "matrix_built",
        locations = matrix.size() as u64,
        metric = ?config.metric,
    );

    let mut rng = create_rng(config.annealing.seed);
    let mut state = TourState::new(&matrix, Tour::random(locations.len(), &mut rng));
    let result = SaRunner::run_with_rng(&mut state, &config.annealing, &mut rng, cancel)?;

    let best = result.best.rotated_to(anchor)?;
    debug!(event = "tour_rotated", anchor = %config.anchor);

    Ok(RoutePlan {
        cost: result.best_cost,
        stops: locations.names(&best)?,
        initial_cost: result.initial_cost,
        iterations: result.iterations,
        accepted_moves: result.accepted_moves,
        improving_moves: result.improving_moves,
        cancelled: result.cancelled,
        cost_history: result.cost_history,
    })
}

/// Rotates a tour of names so that `anchor` comes first.
///
/// Standalone helper for callers holding only names; [`plan_route`] rotates
/// by id through [`Tour::rotated_to`]. Builds a name → position index once;
/// fails if the anchor is absent or appears more than once.
pub fn rotate_to_anchor(stops: &[String], anchor: &str) -> Result<Vec<String>> {
    let mut positions = HashMap::with_capacity(stops.len());
    for (pos, name) in stops.iter().enumerate() {
        if positions.insert(name.as_str(), pos).is_some() {
            return Err(RouteError::DuplicateLocation(name.clone()));
        }
    }
    let start = *positions
        .get(anchor)
        .ok_or_else(|| RouteError::UnknownAnchor(anchor.to_owned()))?;
    let mut rotated = stops.to_vec();
    rotated.rotate_left(start);
    Ok(rotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::sa::CoolingSchedule;

    fn square(side: f64) -> LocationSet {
        LocationSet::new([
            ("sw", Coordinate::from_lon_lat(0.0, 0.0)),
            ("ne", Coordinate::from_lon_lat(side, side)),
            ("se", Coordinate::from_lon_lat(side, 0.0)),
            ("nw", Coordinate::from_lon_lat(0.0, side)),
        ])
        .unwrap()
    }

    fn euclidean(anchor: &str, steps: usize) -> RouteConfig {
        RouteConfig::new(anchor)
            .with_metric(Metric::Euclidean)
            .with_annealing(
                SaConfig::default()
                    .with_initial_temperature(10.0)
                    .with_min_temperature(0.001)
                    .with_cooling(CoolingSchedule::Geometric)
                    .with_steps(steps)
                    .with_seed(42),
            )
    }

    #[test]
    fn test_plan_starts_at_anchor() {
        let plan = plan_route(&square(1.0), &euclidean("ne", 2_000)).unwrap();
        assert_eq!(plan.stops[0], "ne");
        assert_eq!(plan.stops.len(), 4);
        assert!((plan.cost - 4.0).abs() < 1e-9, "got {}", plan.cost);
        assert!(plan.cost <= plan.initial_cost);
        assert_eq!(plan.iterations, 2_000);
    }

    #[test]
    fn test_unknown_anchor_fails_before_search() {
        let err = plan_route(&square(1.0), &euclidean("FORTALEZA", 10)).unwrap_err();
        assert_eq!(err, RouteError::UnknownAnchor("FORTALEZA".into()));
    }

    #[test]
    fn test_invalid_annealing_config() {
        let mut config = euclidean("sw", 10);
        config.annealing.min_temperature = 0.0;
        let err = plan_route(&square(1.0), &config).unwrap_err();
        assert!(matches!(err, RouteError::Config(_)));
    }

    #[test]
    fn test_single_location() {
        let set = LocationSet::new([("only", Coordinate::from_lon_lat(1.0, 2.0))]).unwrap();
        let plan = plan_route(&set, &euclidean("only", 100)).unwrap();
        assert_eq!(plan.cost, 0.0);
        assert_eq!(plan.stops, vec!["only"]);
    }

    #[test]
    fn test_cancelled_plan_keeps_initial_tour() {
        let cancel = Arc::new(AtomicBool::new(true));
        let plan = plan_route_with_cancel(&square(1.0), &euclidean("sw", 1_000), Some(cancel))
            .unwrap();
        assert!(plan.cancelled);
        assert_eq!(plan.iterations, 0);
        assert_eq!(plan.cost, plan.initial_cost);
        assert_eq!(plan.stops[0], "sw");
    }

    #[test]
    fn test_same_seed_same_plan() {
        let a = plan_route(&square(2.0), &euclidean("se", 500)).unwrap();
        let b = plan_route(&square(2.0), &euclidean("se", 500)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rotate_to_anchor() {
        let stops: Vec<String> = ["b", "c", "a"].map(String::from).to_vec();
        let once = rotate_to_anchor(&stops, "a").unwrap();
        assert_eq!(once, vec!["a", "b", "c"]);
        assert_eq!(rotate_to_anchor(&once, "a").unwrap(), once);
    }

    #[test]
    fn test_rotate_to_missing_anchor() {
        let stops: Vec<String> = ["b", "c"].map(String::from).to_vec();
        assert_eq!(
            rotate_to_anchor(&stops, "a").unwrap_err(),
            RouteError::UnknownAnchor("a".into())
        );
    }

    #[test]
    fn test_rotate_rejects_repeated_names() {
        let stops: Vec<String> = ["a", "b", "a"].map(String::from).to_vec();
        assert!(rotate_to_anchor(&stops, "a").is_err());
    }
}
