//! Route distance and fitness.

use std::collections::BTreeMap;

use crate::distance::haversine;
use crate::models::{Bin, CollectionProblem, GeoPoint};

/// Fitness penalty per kilometer of travel.
pub const DISTANCE_PENALTY_PER_KM: f64 = 10.0;

/// Cap on the gas contribution of a single bin.
pub const MAX_GAS_SCORE: f64 = 50.0;

/// Urgency score of one bin: priority weight + `2 × fill` + capped gas term.
///
/// ```
/// use u_wasteroute::evaluation::bin_score;
/// use u_wasteroute::models::{Bin, GeoPoint};
///
/// // CRITICAL (100) + 95 * 2 + min(750 / 10, 50)
/// let bin = Bin::new(GeoPoint::new(0.0, 0.0), 95.0, 750.0);
/// assert!((bin_score(&bin) - 340.0).abs() < 1e-10);
/// ```
pub fn bin_score(bin: &Bin) -> f64 {
    let priority = bin.priority().fitness_weight();
    let fill = bin.fill_level() * 2.0;
    let gas = (bin.gas_level() / 10.0).min(MAX_GAS_SCORE);
    priority + fill + gas
}

/// Evaluates routes expressed as location indices of a [`CollectionProblem`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_wasteroute::models::{Bin, CollectionProblem, GeoPoint};
/// use u_wasteroute::evaluation::RouteEvaluator;
///
/// let mut bins = BTreeMap::new();
/// bins.insert("A".to_string(), Bin::new(GeoPoint::new(0.0, 0.01), 80.0, 100.0));
/// let problem = CollectionProblem::eligible(&bins, GeoPoint::new(0.0, 0.0), 5, 0.0);
///
/// let evaluator = RouteEvaluator::new(&problem);
/// assert!(evaluator.distance(&[1]) > 0.0);
/// assert_eq!(evaluator.distance(&[]), f64::INFINITY);
/// assert_eq!(evaluator.fitness(&[]), f64::NEG_INFINITY);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator<'a> {
    problem: &'a CollectionProblem,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a CollectionProblem) -> Self {
        Self { problem }
    }

    /// Round-trip distance depot → bins → depot, in kilometers.
    ///
    /// An empty route is unbounded (`f64::INFINITY`).
    pub fn distance(&self, route: &[usize]) -> f64 {
        if route.is_empty() {
            return f64::INFINITY;
        }
        let dm = self.problem.distances();
        let mut total = 0.0;
        let mut prev = 0;
        for &idx in route {
            total += dm.get(prev, idx);
            prev = idx;
        }
        total + dm.get(prev, 0)
    }

    /// Composite fitness: urgency scores minus the distance penalty.
    ///
    /// Higher is better. Empty or unbounded routes score `f64::NEG_INFINITY`.
    pub fn fitness(&self, route: &[usize]) -> f64 {
        let distance = self.distance(route);
        if !distance.is_finite() {
            return f64::NEG_INFINITY;
        }
        let score: f64 = route.iter().map(|&i| bin_score(self.problem.bin(i))).sum();
        score - distance * DISTANCE_PENALTY_PER_KM
    }
}

/// Round-trip distance of a route given by bin keys.
///
/// Keys absent from `bins` are skipped. An empty route is unbounded.
pub fn route_distance<S: AsRef<str>>(
    route: &[S],
    bins: &BTreeMap<String, Bin>,
    depot: GeoPoint,
) -> f64 {
    if route.is_empty() {
        return f64::INFINITY;
    }
    let mut total = 0.0;
    let mut current = depot;
    for bin in route.iter().filter_map(|k| bins.get(k.as_ref())) {
        total += haversine(current, bin.location());
        current = bin.location();
    }
    total + haversine(current, depot)
}

/// Fitness of a route given by bin keys; see [`RouteEvaluator::fitness`].
pub fn route_fitness<S: AsRef<str>>(
    route: &[S],
    bins: &BTreeMap<String, Bin>,
    depot: GeoPoint,
) -> f64 {
    let distance = route_distance(route, bins, depot);
    if !distance.is_finite() {
        return f64::NEG_INFINITY;
    }
    let score: f64 = route
        .iter()
        .filter_map(|k| bins.get(k.as_ref()))
        .map(bin_score)
        .sum();
    score - distance * DISTANCE_PENALTY_PER_KM
}
