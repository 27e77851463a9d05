//! End-to-end planning scenarios over the public API.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_wasteroute::aco::AcoConfig;
use u_wasteroute::evaluation::{route_distance, route_fitness};
use u_wasteroute::ga::GaConfig;
use u_wasteroute::models::{Bin, GeoPoint, Priority, RoutePlan};
use u_wasteroute::stats::RouteStats;
use u_wasteroute::telemetry::simulate_tick;
use u_wasteroute::{optimize, optimize_with_rng, Algorithm, ConfigError, OptimizerConfig};

const ALL: [Algorithm; 3] = [
    Algorithm::Genetic,
    Algorithm::AntColony,
    Algorithm::NearestNeighbor,
];

fn depot() -> GeoPoint {
    GeoPoint::new(37.765, -122.42)
}

/// Eight San Francisco bins with mixed fill levels and priorities.
fn fixture() -> BTreeMap<String, Bin> {
    let rows = [
        ("BIN_001", 37.7749, -122.4194, 85.0, Priority::High, 450.0, 100.0, "Main Street Corner"),
        ("BIN_002", 37.7849, -122.4094, 92.0, Priority::Critical, 600.0, 80.0, "Central Park East"),
        ("BIN_003", 37.7649, -122.4294, 78.0, Priority::Medium, 320.0, 120.0, "Shopping Mall West"),
        ("BIN_004", 37.7949, -122.3994, 45.0, Priority::Low, 180.0, 90.0, "University Campus"),
        ("BIN_005", 37.7549, -122.4394, 67.0, Priority::Medium, 250.0, 70.0, "Residential District"),
        ("BIN_006", 37.7449, -122.4494, 95.0, Priority::Critical, 750.0, 150.0, "Industrial Zone"),
        ("BIN_007", 37.7349, -122.4594, 34.0, Priority::Low, 120.0, 85.0, "Beach Boardwalk"),
        ("BIN_008", 37.7249, -122.4694, 88.0, Priority::High, 380.0, 95.0, "City Hall Plaza"),
    ];
    rows.iter()
        .map(|&(id, lat, lon, fill, priority, gas, capacity, address)| {
            let bin = Bin::new(GeoPoint::new(lat, lon), fill, gas)
                .with_priority(priority)
                .with_capacity(capacity)
                .with_address(address)
                .with_last_collection("2024-01-15");
            (id.to_string(), bin)
        })
        .collect()
}

fn fast_config(algorithm: Algorithm, capacity: usize) -> OptimizerConfig {
    OptimizerConfig::new(algorithm, capacity)
        .with_ga(GaConfig::default().with_generations(20))
        .with_aco(AcoConfig::default().with_iterations(20))
}

fn assert_distinct(plan: &RoutePlan) {
    let mut keys = plan.route.clone();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), plan.route.len(), "repeated bin in {:?}", plan.route);
}

#[test]
fn test_single_bin_at_depot() {
    let mut bins = BTreeMap::new();
    bins.insert("HERE".to_string(), Bin::new(depot(), 100.0, 0.0));

    let config = OptimizerConfig::new(Algorithm::NearestNeighbor, 5);
    let plan = optimize(&bins, depot(), &config).expect("valid config");
    assert_eq!(plan.route, vec!["HERE"]);
    assert!(plan.distance.abs() < 1e-9);
}

#[test]
fn test_single_bin_at_depot_all_strategies() {
    let mut bins = BTreeMap::new();
    bins.insert("HERE".to_string(), Bin::new(depot(), 100.0, 0.0));

    for algorithm in ALL {
        let config = fast_config(algorithm, 5).with_seed(3);
        let plan = optimize(&bins, depot(), &config).expect("valid config");
        assert_eq!(plan.route, vec!["HERE"], "{algorithm}");
        assert!(plan.distance.abs() < 1e-9, "{algorithm}");
    }
}

#[test]
fn test_fixture_genetic_reproducible() {
    let bins = fixture();
    let config = OptimizerConfig::new(Algorithm::Genetic, 6)
        .with_ga(GaConfig::default().with_generations(10))
        .with_seed(42);

    let first = optimize(&bins, depot(), &config).expect("valid config");
    let second = optimize(&bins, depot(), &config).expect("valid config");
    assert_eq!(first, second);

    assert!(!first.is_empty());
    assert!(first.len() <= 6);
    assert_distinct(&first);
    // GA threshold is 60: BIN_004 (45) and BIN_007 (34) never appear
    assert!(first.route.iter().all(|k| k != "BIN_004" && k != "BIN_007"));

    let d = route_distance(&first.route, &bins, depot());
    assert!((first.distance - d).abs() < 1e-9);
    let f = route_fitness(&first.route, &bins, depot());
    let reported = first.fitness.expect("genetic reports fitness");
    assert!((reported - f).abs() < 1e-6);
}

#[test]
fn test_fixture_injected_rng_matches_seed() {
    let bins = fixture();
    let config = fast_config(Algorithm::AntColony, 6).with_seed(11);
    let seeded = optimize(&bins, depot(), &config).expect("valid config");
    let injected = optimize_with_rng(&bins, depot(), &config, &mut StdRng::seed_from_u64(11))
        .expect("valid config");
    assert_eq!(seeded, injected);
}

#[test]
fn test_fixture_all_strategies() {
    let bins = fixture();
    for algorithm in ALL {
        let plan = optimize(&bins, depot(), &fast_config(algorithm, 6).with_seed(7))
            .expect("valid config");
        assert!(!plan.is_empty(), "{algorithm}");
        assert!(plan.len() <= 6, "{algorithm}");
        assert_distinct(&plan);
        assert!(plan.distance.is_finite() && plan.distance > 0.0, "{algorithm}");
        assert_eq!(plan.fitness.is_some(), algorithm == Algorithm::Genetic);
    }
}

#[test]
fn test_nearest_neighbor_fixture_is_deterministic() {
    let bins = fixture();
    let config = OptimizerConfig::new(Algorithm::NearestNeighbor, 6);
    let a = optimize(&bins, depot(), &config).expect("valid config");
    let b = optimize(&bins, depot(), &config).expect("valid config");
    assert_eq!(a, b);
    // BIN_003 is closest to the depot
    assert_eq!(a.route[0], "BIN_003");
    assert_eq!(a.len(), 6);
}

#[test]
fn test_empty_collection_all_strategies() {
    let bins = BTreeMap::new();
    for algorithm in ALL {
        for capacity in [1, 5, 100] {
            let plan = optimize(&bins, depot(), &fast_config(algorithm, capacity).with_seed(1))
                .expect("valid config");
            assert!(plan.is_empty(), "{algorithm}");
            assert_eq!(plan.distance, f64::INFINITY, "{algorithm}");
            if algorithm == Algorithm::Genetic {
                assert_eq!(plan.fitness, Some(f64::NEG_INFINITY));
            }
        }
    }
}

#[test]
fn test_nothing_eligible_is_not_an_error() {
    let mut bins = fixture();
    bins.retain(|_, b| b.fill_level() < 50.0);
    for algorithm in ALL {
        let plan = optimize(&bins, depot(), &fast_config(algorithm, 6).with_seed(1))
            .expect("valid config");
        assert!(plan.is_unbounded(), "{algorithm}");
    }
}

#[test]
fn test_nan_coordinates_never_reach_the_plan() {
    let mut bins = BTreeMap::new();
    bins.insert("BROKEN".to_string(), Bin::new(GeoPoint::new(f64::NAN, 0.0), 90.0, 300.0));
    bins.insert("OK".to_string(), Bin::new(GeoPoint::new(37.7849, -122.4094), 90.0, 300.0));

    for algorithm in ALL {
        let config = OptimizerConfig::new(algorithm, 5).with_seed(17);
        let plan = optimize(&bins, depot(), &config).expect("valid config");
        assert_eq!(plan.route, vec!["OK"], "{algorithm}");
        assert!(plan.distance.is_finite() && plan.distance > 0.0, "{algorithm}");
        if let Some(fitness) = plan.fitness {
            assert!(fitness.is_finite(), "{algorithm}");
        }
    }

    let nan_depot = GeoPoint::new(f64::NAN, -122.42);
    for algorithm in ALL {
        let config = OptimizerConfig::new(algorithm, 5).with_seed(17);
        let plan = optimize(&fixture(), nan_depot, &config).expect("valid config");
        let expected = if algorithm == Algorithm::Genetic {
            RoutePlan::empty_scored()
        } else {
            RoutePlan::empty()
        };
        assert_eq!(plan, expected, "{algorithm}");
    }
}

#[test]
fn test_invalid_configuration_rejected() {
    let bins = fixture();
    for algorithm in ALL {
        let config = fast_config(algorithm, 0);
        assert_eq!(optimize(&bins, depot(), &config), Err(ConfigError::ZeroCapacity));
    }

    let config = OptimizerConfig::new(Algorithm::AntColony, 6)
        .with_aco(AcoConfig::default().with_iterations(0));
    assert_eq!(optimize(&bins, depot(), &config), Err(ConfigError::ZeroIterations));

    let err = "tabu".parse::<Algorithm>().unwrap_err();
    assert_eq!(err.to_string(), "unknown algorithm: tabu");
}

#[test]
fn test_plan_json_contract() {
    let bins = fixture();
    let plan = optimize(&bins, depot(), &OptimizerConfig::new(Algorithm::NearestNeighbor, 3))
        .expect("valid config");
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["route"].as_array().map(Vec::len), Some(3));
    assert!(json["distance"].is_number());
    assert!(json.get("fitness").is_none());
}

#[test]
fn test_bins_from_json() {
    let json = r#"{
        "BIN_A": {"location": [37.7749, -122.4194], "fill_level": 95, "gas_level": 400},
        "BIN_B": {"location": [37.7849, -122.4094], "fill_level": 40, "gas_level": 100, "priority": "HIGH"}
    }"#;
    let bins: BTreeMap<String, Bin> = serde_json::from_str(json).unwrap();
    assert_eq!(bins["BIN_A"].priority(), Priority::Critical);
    assert_eq!(bins["BIN_B"].priority(), Priority::High);

    let plan = optimize(&bins, depot(), &OptimizerConfig::new(Algorithm::NearestNeighbor, 5))
        .expect("valid config");
    assert_eq!(plan.route, vec!["BIN_A"]);
}

#[test]
fn test_telemetry_then_replan() {
    let mut bins = fixture();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..10 {
        simulate_tick(&mut bins, &mut rng);
    }
    for bin in bins.values() {
        assert_eq!(bin.priority(), Priority::from_fill_level(bin.fill_level()));
    }

    let config = fast_config(Algorithm::Genetic, 6);
    let plan = optimize_with_rng(&bins, depot(), &config, &mut rng).expect("valid config");
    let stats = RouteStats::from_plan(&plan);
    assert_eq!(stats.bins_collected, plan.len());
    assert!(stats.efficiency.is_some_and(|e| e <= 95.0));
    assert!((stats.co2_kg - plan.distance * 2.3).abs() < 1e-9);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_route_within_capacity(capacity in 1usize..10, seed in any::<u64>(), which in 0usize..3) {
        let algorithm = ALL[which];
        let config = OptimizerConfig::new(algorithm, capacity)
            .with_ga(GaConfig::default().with_generations(5))
            .with_aco(AcoConfig::default().with_iterations(5))
            .with_seed(seed);
        let plan = optimize(&fixture(), depot(), &config).expect("valid config");
        prop_assert!(plan.len() <= capacity);
        prop_assert!(plan.distance >= 0.0);
        let mut keys = plan.route.clone();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), plan.len());
    }
}
