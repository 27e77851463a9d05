//! Nearest-neighbor constructive heuristic.
//!
//! Builds one trip greedily: starting from the depot, always visit the
//! nearest unvisited eligible bin until the vehicle capacity is reached or
//! no bins remain. Deterministic; ties go to the bin with the smaller key.
//!
//! # Complexity
//!
//! O(n²) where n = number of eligible bins.

use serde::{Deserialize, Serialize};

use crate::error::{check_threshold, ConfigError};
use crate::evaluation::RouteEvaluator;
use crate::models::{CollectionProblem, RoutePlan};

/// Configuration for the nearest-neighbor baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NnConfig {
    /// Bins must have a fill level strictly above this to be candidates.
    pub min_fill_level: f64,
}

impl Default for NnConfig {
    fn default() -> Self {
        Self {
            min_fill_level: 50.0,
        }
    }
}

impl NnConfig {
    /// Sets the eligibility threshold.
    pub fn with_min_fill_level(mut self, threshold: f64) -> Self {
        self.min_fill_level = threshold;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold(self.min_fill_level)
    }
}

/// Location indices visited by the greedy nearest-bin walk.
pub fn nearest_neighbor_order(problem: &CollectionProblem) -> Vec<usize> {
    let distances = problem.distances();
    let mut remaining = problem.bin_indices();
    let mut route = Vec::with_capacity(problem.capacity().min(remaining.len()));
    let mut current = 0;

    while route.len() < problem.capacity() {
        let Some(next) = distances.nearest_neighbor(current, &remaining) else {
            break;
        };
        remaining.retain(|&b| b != next);
        route.push(next);
        current = next;
    }
    route
}

/// Constructs a collection route using the nearest-neighbor heuristic.
///
/// The plan carries no fitness. With no eligible bins the plan is empty
/// with unbounded distance.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_wasteroute::models::{Bin, CollectionProblem, GeoPoint};
/// use u_wasteroute::constructive::nearest_neighbor;
///
/// let depot = GeoPoint::new(0.0, 0.0);
/// let mut bins = BTreeMap::new();
/// bins.insert("far".to_string(), Bin::new(GeoPoint::new(0.0, 0.3), 80.0, 0.0));
/// bins.insert("near".to_string(), Bin::new(GeoPoint::new(0.0, 0.1), 80.0, 0.0));
/// bins.insert("mid".to_string(), Bin::new(GeoPoint::new(0.0, 0.2), 80.0, 0.0));
///
/// let problem = CollectionProblem::eligible(&bins, depot, 10, 50.0);
/// let plan = nearest_neighbor(&problem);
/// assert_eq!(plan.route, vec!["near", "mid", "far"]);
/// assert_eq!(plan.fitness, None);
/// ```
pub fn nearest_neighbor(problem: &CollectionProblem) -> RoutePlan {
    if problem.is_empty() {
        log::warn!("nearest neighbor: no eligible bins");
        return RoutePlan::empty();
    }

    let order = nearest_neighbor_order(problem);
    let distance = RouteEvaluator::new(problem).distance(&order);
    let plan = RoutePlan::new(problem.route_ids(&order), distance, None);

    log::info!(
        "nearest neighbor: {} eligible bins, route of {} bins, {:.3} km",
        problem.num_bins(),
        plan.len(),
        plan.distance
    );
    plan
}
