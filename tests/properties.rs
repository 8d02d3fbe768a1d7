//! Property tests for distances, tour cost, perturbation and rotation.

use proptest::prelude::*;
use u_anneal_route::geo::{great_circle_distance, Coordinate, Metric, EARTH_RADIUS_MILES};
use u_anneal_route::random::create_rng;
use u_anneal_route::route::rotate_to_anchor;
use u_anneal_route::sa::{SaConfig, SaRunner, SaState};
use u_anneal_route::tsp::{DistanceMatrix, LocationSet, Tour, TourState};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-180.0..180.0f64, -90.0..90.0f64).prop_map(|(lon, lat)| Coordinate::from_lon_lat(lon, lat))
}

fn locations(max: usize) -> impl Strategy<Value = LocationSet> {
    prop::collection::vec(coordinate(), 0..max).prop_map(|points| {
        LocationSet::new(
            points
                .into_iter()
                .enumerate()
                .map(|(i, c)| (format!("L{i}"), c)),
        )
        .expect("generated names are unique")
    })
}

/// A location set together with a shuffled visiting order over it.
fn locations_and_order(max: usize) -> impl Strategy<Value = (LocationSet, Vec<usize>)> {
    locations(max).prop_flat_map(|set| {
        let order: Vec<usize> = (0..set.len()).collect();
        (Just(set), Just(order).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn distance_to_self_is_zero(a in coordinate()) {
        prop_assert_eq!(great_circle_distance(a, a, EARTH_RADIUS_MILES), 0.0);
        prop_assert_eq!(Metric::Euclidean.distance(a, a), 0.0);
    }

    #[test]
    fn distance_is_symmetric_and_non_negative(a in coordinate(), b in coordinate()) {
        let ab = great_circle_distance(a, b, EARTH_RADIUS_MILES);
        let ba = great_circle_distance(b, a, EARTH_RADIUS_MILES);
        prop_assert_eq!(ab, ba);
        prop_assert!(ab >= 0.0 && ab.is_finite());
    }

    #[test]
    fn matrix_invariants_hold((set, _) in locations_and_order(12)) {
        let dm = DistanceMatrix::from_locations(&set, Metric::default());
        prop_assert!(dm.has_zero_diagonal());
        prop_assert!(dm.is_symmetric(0.0));
    }

    #[test]
    fn cost_is_cyclic_sum_and_rotation_invariant(
        (set, order) in locations_and_order(12),
        shift in 0usize..12,
    ) {
        let dm = DistanceMatrix::from_locations(&set, Metric::default());
        let tour = Tour::from_order(order.clone()).unwrap();
        let cost = tour.cost(&dm).unwrap();

        let n = order.len();
        let expected: f64 = if n < 2 {
            0.0
        } else {
            (0..n).map(|i| dm.get(order[i], order[(i + 1) % n]).unwrap()).sum()
        };
        prop_assert!((cost - expected).abs() <= 1e-9 * expected.max(1.0));

        let mut shifted = order.clone();
        if n > 0 {
            shifted.rotate_left(shift % n);
        }
        let shifted_cost = Tour::from_order(shifted).unwrap().cost(&dm).unwrap();
        prop_assert!((cost - shifted_cost).abs() <= 1e-9 * cost.max(1.0));
    }

    #[test]
    fn perturb_preserves_permutation(
        (set, order) in locations_and_order(16),
        seed in any::<u64>(),
        moves in 1usize..64,
    ) {
        let dm = DistanceMatrix::from_locations(&set, Metric::default());
        let mut state = TourState::new(&dm, Tour::from_order(order).unwrap());
        let mut rng = create_rng(Some(seed));
        for _ in 0..moves {
            state.perturb(&mut rng);
            prop_assert!(Tour::from_order(state.tour().as_slice().to_vec()).is_ok());
            prop_assert_eq!(state.tour().len(), set.len());
        }
    }

    #[test]
    fn rotation_is_cyclic_and_idempotent((set, order) in locations_and_order(16), pick in any::<prop::sample::Index>()) {
        prop_assume!(!order.is_empty());
        let tour = Tour::from_order(order.clone()).unwrap();
        let anchor = order[pick.index(order.len())];

        let once = tour.rotated_to(anchor).unwrap();
        prop_assert_eq!(once.as_slice()[0], anchor);

        // Same successor for every stop, so same cycle.
        let n = order.len();
        let successor = |seq: &[usize], id: usize| {
            let pos = seq.iter().position(|&x| x == id).unwrap();
            seq[(pos + 1) % n]
        };
        for &id in &order {
            prop_assert_eq!(successor(&order, id), successor(once.as_slice(), id));
        }

        prop_assert_eq!(once.rotated_to(anchor).unwrap(), once.clone());

        let names = set.names(&tour).unwrap();
        let anchor_name = set.name(anchor).unwrap();
        let rotated_names = rotate_to_anchor(&names, anchor_name).unwrap();
        prop_assert_eq!(&rotated_names, &set.names(&once).unwrap());
        prop_assert_eq!(rotate_to_anchor(&rotated_names, anchor_name).unwrap(), rotated_names);
    }

    #[test]
    fn best_cost_never_increases((set, order) in locations_and_order(10), seed in any::<u64>()) {
        let dm = DistanceMatrix::from_locations(&set, Metric::default());
        let mut state = TourState::new(&dm, Tour::from_order(order).unwrap());
        let config = SaConfig::default()
            .with_initial_temperature(500.0)
            .with_min_temperature(0.5)
            .with_steps(400)
            .with_progress_updates(40)
            .with_seed(seed);

        let result = SaRunner::run(&mut state, &config).unwrap();

        for w in result.cost_history.windows(2) {
            prop_assert!(w[1] <= w[0]);
        }
        prop_assert!(result.best_cost <= result.initial_cost);
        let recomputed = result.best.cost(&dm).unwrap();
        prop_assert!((recomputed - result.best_cost).abs() <= 1e-9 * recomputed.max(1.0));
        // The live state may be worse than the best, never better.
        prop_assert!(state.cost().unwrap() + 1e-9 >= result.best_cost);
    }
}
