//! Simulated annealing for short closed tours over geographic points.
//!
//! - **Simulated Annealing (SA)**: a domain-agnostic engine that drives any
//!   [`sa::SaState`] in place with a temperature-controlled acceptance
//!   criterion, rollback of rejected moves, and best-state tracking.
//! - **Tour state (TSP)**: a flat distance matrix over integer location
//!   ids, a permutation tour with swap perturbation, and the cyclic-sum
//!   cost.
//! - **Route planning**: builds the matrix from named coordinates,
//!   anneals a random initial tour, and rotates the best tour to start at
//!   an anchor location.
//!
//! # Example
//!
//! ```
//! use u_anneal_route::geo::{Coordinate, Metric};
//! use u_anneal_route::route::{plan_route, RouteConfig};
//! use u_anneal_route::sa::SaConfig;
//! use u_anneal_route::tsp::LocationSet;
//!
//! let locations = LocationSet::new([
//!     ("a", Coordinate::from_lon_lat(0.0, 0.0)),
//!     ("b", Coordinate::from_lon_lat(1.0, 0.0)),
//!     ("c", Coordinate::from_lon_lat(1.0, 1.0)),
//!     ("d", Coordinate::from_lon_lat(0.0, 1.0)),
//! ]).unwrap();
//! let config = RouteConfig::new("c")
//!     .with_metric(Metric::Euclidean)
//!     .with_annealing(
//!         SaConfig::default()
//!             .with_initial_temperature(10.0)
//!             .with_min_temperature(0.01)
//!             .with_steps(1_000)
//!             .with_seed(3),
//!     );
//! let plan = plan_route(&locations, &config).unwrap();
//! assert_eq!(plan.stops[0], "c");
//! assert!((plan.cost - 4.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod geo;
pub mod random;
pub mod route;
pub mod sa;
pub mod tsp;

pub use error::{Result, RouteError};
