//! Optimizer output.

use serde::{Deserialize, Serialize};

/// A planned collection route returned by every strategy.
///
/// `distance` is in kilometers; `f64::INFINITY` marks an unbounded
/// (empty, non-actionable) plan. `fitness` is a relative ranking signal
/// and is `None` for strategies that do not score routes.
///
/// # Examples
///
/// ```
/// use u_wasteroute::models::RoutePlan;
///
/// let plan = RoutePlan::empty();
/// assert!(plan.is_empty());
/// assert!(plan.is_unbounded());
/// assert_eq!(plan.fitness, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Bin keys in visit order, depot excluded.
    pub route: Vec<String>,
    /// Total round-trip distance in kilometers.
    pub distance: f64,
    /// Route fitness, if the strategy computes one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fitness: Option<f64>,
}

impl RoutePlan {
    /// Creates a plan, replacing non-finite metrics with the sentinels.
    pub fn new(route: Vec<String>, distance: f64, fitness: Option<f64>) -> Self {
        Self {
            route,
            distance: sanitize_distance(distance),
            fitness: fitness.map(sanitize_fitness),
        }
    }

    /// The "no actionable plan" result without a fitness.
    pub fn empty() -> Self {
        Self::new(Vec::new(), f64::INFINITY, None)
    }

    /// The "no actionable plan" result for strategies that report fitness.
    pub fn empty_scored() -> Self {
        Self::new(Vec::new(), f64::INFINITY, Some(f64::NEG_INFINITY))
    }

    /// Number of bins on the route.
    pub fn len(&self) -> usize {
        self.route.len()
    }

    /// Returns `true` if the route visits no bins.
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// Returns `true` if the distance is the unbounded sentinel.
    pub fn is_unbounded(&self) -> bool {
        self.distance == f64::INFINITY
    }
}

/// Maps NaN and negative infinity to the unbounded distance sentinel.
fn sanitize_distance(distance: f64) -> f64 {
    if distance.is_nan() || distance < 0.0 {
        f64::INFINITY
    } else {
        distance
    }
}

/// Maps NaN and positive infinity to the minimal fitness sentinel.
fn sanitize_fitness(fitness: f64) -> f64 {
    if fitness.is_nan() || fitness == f64::INFINITY {
        f64::NEG_INFINITY
    } else {
        fitness
    }
}
