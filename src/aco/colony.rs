//! Ant colony iterations.
//!
//! Each [`AntColonyOptimizer::step`] lets every ant build a route against a
//! read-only pheromone matrix, then applies evaporation and deposits once
//! all ants are done.

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::AcoConfig;
use super::pheromone::{deposit_amount, PheromoneMatrix};
use crate::evaluation::RouteEvaluator;
use crate::models::{CollectionProblem, RoutePlan};

/// Pheromones and incumbent between two iterations.
#[derive(Debug, Clone)]
pub struct AcoState {
    /// Iterations completed so far.
    pub iteration: usize,
    /// Trail strengths over eligible bin pairs.
    pub pheromones: PheromoneMatrix,
    /// Shortest route found so far.
    pub best_route: Option<Vec<usize>>,
    /// Distance of `best_route`, `f64::INFINITY` before the first route.
    pub best_distance: f64,
    /// Incumbent distance after each iteration.
    pub best_history: Vec<f64>,
}

/// Result of an ant colony run.
#[derive(Debug, Clone)]
pub struct AcoOutcome {
    /// Shortest route found, without fitness.
    pub plan: RoutePlan,
    /// Number of iterations executed.
    pub iterations: usize,
    /// Incumbent distance after each iteration.
    pub best_history: Vec<f64>,
}

/// Ant colony optimization over eligible bins.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_wasteroute::models::{Bin, CollectionProblem, GeoPoint};
/// use u_wasteroute::aco::{AcoConfig, AntColonyOptimizer};
///
/// let mut bins = BTreeMap::new();
/// bins.insert("A".to_string(), Bin::new(GeoPoint::new(37.775, -122.419), 85.0, 450.0));
/// bins.insert("B".to_string(), Bin::new(GeoPoint::new(37.785, -122.409), 92.0, 600.0));
///
/// let config = AcoConfig::default().with_iterations(10);
/// let problem = CollectionProblem::eligible(&bins, GeoPoint::new(37.765, -122.42), 5, config.min_fill_level);
/// let outcome = AntColonyOptimizer::new(&problem, &config).run(&mut StdRng::seed_from_u64(42));
/// assert_eq!(outcome.plan.len(), 2);
/// assert!(outcome.plan.distance > 0.0);
/// ```
pub struct AntColonyOptimizer<'a> {
    problem: &'a CollectionProblem,
    config: &'a AcoConfig,
    pool: Vec<usize>,
}

impl<'a> AntColonyOptimizer<'a> {
    /// Creates an optimizer for an already filtered problem.
    pub fn new(problem: &'a CollectionProblem, config: &'a AcoConfig) -> Self {
        Self {
            problem,
            config,
            pool: problem.bin_indices(),
        }
    }

    /// Number of ants per iteration.
    pub fn num_ants(&self) -> usize {
        self.config.num_ants(self.problem.num_bins())
    }

    /// Fresh state with uniform pheromones.
    pub fn initial_state(&self) -> AcoState {
        AcoState {
            iteration: 0,
            pheromones: PheromoneMatrix::new(self.problem.num_bins(), self.config.initial_pheromone),
            best_route: None,
            best_distance: f64::INFINITY,
            best_history: Vec::with_capacity(self.config.iterations),
        }
    }

    /// Desirability of moving from `current` to `candidate`.
    ///
    /// `pheromone^alpha × (heuristic / (distance + epsilon))^beta`, where the
    /// first hop (no previous bin) uses pheromone 1.0.
    fn attractiveness(
        &self,
        pheromones: &PheromoneMatrix,
        previous: Option<usize>,
        current: usize,
        candidate: usize,
    ) -> f64 {
        let bin = self.problem.bin(candidate);
        let heuristic = bin.fill_level() / 100.0 * bin.priority().heuristic_multiplier();
        let distance = self.problem.distances().get(current, candidate);
        let pheromone = previous.map_or(1.0, |p| pheromones.get(p, candidate));

        let w = pheromone.powf(self.config.alpha)
            * (heuristic / (distance + self.config.epsilon)).powf(self.config.beta);
        if w.is_finite() && w > 0.0 {
            w
        } else {
            0.0
        }
    }

    /// Builds one ant's route from the depot.
    ///
    /// Stops when the pool is exhausted, capacity is reached, or no
    /// candidate has positive probability.
    pub fn construct_route<R: Rng>(&self, pheromones: &PheromoneMatrix, rng: &mut R) -> Vec<usize> {
        let capacity = self.problem.capacity();
        let mut route = Vec::with_capacity(capacity.min(self.pool.len()));
        let mut available = self.pool.clone();
        let mut weights = Vec::with_capacity(available.len());
        let mut current = 0;

        while !available.is_empty() && route.len() < capacity {
            let previous = route.last().copied();
            weights.clear();
            weights.extend(
                available
                    .iter()
                    .map(|&b| self.attractiveness(pheromones, previous, current, b)),
            );

            match roulette(&weights, rng) {
                Some(i) => {
                    let bin = available.remove(i);
                    route.push(bin);
                    current = bin;
                }
                None => {
                    log::warn!(
                        "ant colony: no probability mass after {} bins, stopping early",
                        route.len()
                    );
                    break;
                }
            }
        }
        route
    }

    /// Runs one iteration: all ants construct, then pheromones update.
    pub fn step<R: Rng>(&self, mut state: AcoState, rng: &mut R) -> AcoState {
        let routes: Vec<Vec<usize>> = (0..self.num_ants())
            .map(|_| self.construct_route(&state.pheromones, rng))
            .collect();

        let evaluator = RouteEvaluator::new(self.problem);
        let distances = route_distances(&evaluator, &routes, self.config.parallel);

        for (route, &distance) in routes.iter().zip(&distances) {
            if distance < state.best_distance {
                state.best_distance = distance;
                state.best_route = Some(route.clone());
            }
        }

        state.pheromones.evaporate(self.config.rho);
        for (route, &distance) in routes.iter().zip(&distances) {
            state
                .pheromones
                .deposit(route, deposit_amount(self.config.q, distance));
        }

        state.iteration += 1;
        state.best_history.push(state.best_distance);
        state
    }

    /// Runs all configured iterations and returns the shortest route found.
    pub fn run<R: Rng>(&self, rng: &mut R) -> AcoOutcome {
        if self.problem.is_empty() {
            log::warn!("ant colony: no bins above fill level {}", self.config.min_fill_level);
            return AcoOutcome {
                plan: RoutePlan::empty(),
                iterations: 0,
                best_history: Vec::new(),
            };
        }

        let mut state = self.initial_state();
        for _ in 0..self.config.iterations {
            state = self.step(state, rng);
            log::debug!(
                "ant colony: iteration {}/{} best distance {:.3} km",
                state.iteration,
                self.config.iterations,
                state.best_distance
            );
        }

        let plan = match &state.best_route {
            Some(route) => RoutePlan::new(self.problem.route_ids(route), state.best_distance, None),
            None => RoutePlan::empty(),
        };

        log::info!(
            "ant colony: {} eligible bins, {} ants x {} iterations, route of {} bins, {:.3} km",
            self.problem.num_bins(),
            self.num_ants(),
            state.iteration,
            plan.len(),
            plan.distance
        );

        AcoOutcome {
            plan,
            iterations: state.iteration,
            best_history: state.best_history,
        }
    }
}

/// Roulette-wheel draw: uniform in `[0, total)`, first positive weight whose
/// cumulative sum reaches the draw wins. `None` when the total mass is not
/// positive.
pub(crate) fn roulette<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    let draw = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if w > 0.0 && draw <= cumulative {
            return Some(i);
        }
    }
    // rounding left the draw just above the last cumulative sum
    weights.iter().rposition(|&w| w > 0.0)
}

#[cfg(feature = "parallel")]
fn route_distances(evaluator: &RouteEvaluator<'_>, routes: &[Vec<usize>], parallel: bool) -> Vec<f64> {
    if parallel {
        routes.par_iter().map(|r| evaluator.distance(r)).collect()
    } else {
        routes.iter().map(|r| evaluator.distance(r)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn route_distances(evaluator: &RouteEvaluator<'_>, routes: &[Vec<usize>], _parallel: bool) -> Vec<f64> {
    routes.iter().map(|r| evaluator.distance(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bin, GeoPoint};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::{BTreeMap, HashSet};

    /// Always draws zero.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn bins() -> BTreeMap<String, Bin> {
        let specs = [
            ("BIN_001", 37.7749, -122.4194, 85.0),
            ("BIN_002", 37.7849, -122.4094, 92.0),
            ("BIN_003", 37.7649, -122.4294, 78.0),
            ("BIN_004", 37.7949, -122.3994, 45.0),
            ("BIN_005", 37.7549, -122.4394, 67.0),
            ("BIN_006", 37.7449, -122.4494, 95.0),
            ("BIN_007", 37.7349, -122.4594, 34.0),
            ("BIN_008", 37.7249, -122.4694, 88.0),
        ];
        specs
            .iter()
            .map(|&(id, lat, lon, fill)| (id.to_string(), Bin::new(GeoPoint::new(lat, lon), fill, 300.0)))
            .collect()
    }

    fn problem(capacity: usize) -> CollectionProblem {
        CollectionProblem::eligible(&bins(), GeoPoint::new(37.765, -122.42), capacity, 50.0)
    }

    #[test]
    fn test_roulette_zero_mass() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(roulette(&[0.0, 0.0], &mut rng), None);
        assert_eq!(roulette(&[], &mut rng), None);
        assert_eq!(roulette(&[f64::NAN, 1.0], &mut rng), None);
    }

    #[test]
    fn test_roulette_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            assert_eq!(roulette(&[0.0, 2.0, 0.0], &mut rng), Some(1));
        }
    }

    #[test]
    fn test_roulette_zero_draw_skips_leading_zero_weights() {
        assert_eq!(roulette(&[0.0, 0.0, 2.0, 1.0], &mut ZeroRng), Some(2));
        assert_eq!(roulette(&[3.0, 0.0], &mut ZeroRng), Some(0));
    }

    #[test]
    fn test_roulette_proportional() {
        let mut rng = StdRng::seed_from_u64(7);
        let heavy = (0..2000)
            .filter(|_| roulette(&[1.0, 9.0], &mut rng) == Some(1))
            .count();
        assert!(heavy > 1600 && heavy < 1990);
    }

    #[test]
    fn test_construct_respects_capacity() {
        let p = problem(3);
        let config = AcoConfig::default();
        let aco = AntColonyOptimizer::new(&p, &config);
        let state = aco.initial_state();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let route = aco.construct_route(&state.pheromones, &mut rng);
            assert_eq!(route.len(), 3);
            let set: HashSet<_> = route.iter().collect();
            assert_eq!(set.len(), 3);
        }
    }

    #[test]
    fn test_construct_stops_without_probability_mass() {
        let p = problem(5);
        let config = AcoConfig::default();
        let aco = AntColonyOptimizer::new(&p, &config);
        // first hop uses pheromone 1.0, every later hop has zero mass
        let empty = PheromoneMatrix::new(p.num_bins(), 0.0);
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let route = aco.construct_route(&empty, &mut rng);
            assert_eq!(route.len(), 1);
        }
    }

    #[test]
    fn test_step_evaluates_partial_routes() {
        let p = problem(5);
        let config = AcoConfig::default();
        let aco = AntColonyOptimizer::new(&p, &config);
        let state = AcoState {
            pheromones: PheromoneMatrix::new(p.num_bins(), 0.0),
            ..aco.initial_state()
        };
        let state = aco.step(state, &mut StdRng::seed_from_u64(6));
        let best = state.best_route.as_ref().expect("partial routes are kept");
        assert_eq!(best.len(), 1);
        assert!(state.best_distance.is_finite() && state.best_distance > 0.0);
        let expected = RouteEvaluator::new(&p).distance(best);
        assert!((state.best_distance - expected).abs() < 1e-12);
    }

    #[test]
    fn test_full_evaporation_still_plans() {
        let p = problem(4);
        let config = AcoConfig::default().with_iterations(30).with_rho(1.0);
        let outcome = AntColonyOptimizer::new(&p, &config).run(&mut StdRng::seed_from_u64(13));
        assert!(!outcome.plan.is_empty());
        assert!(outcome.plan.len() <= 4);
        assert!(outcome.plan.distance.is_finite() && outcome.plan.distance > 0.0);
        assert_eq!(outcome.iterations, 30);
    }

    #[test]
    fn test_construct_exhausts_pool() {
        let p = problem(20);
        let config = AcoConfig::default();
        let aco = AntColonyOptimizer::new(&p, &config);
        let route = aco.construct_route(&aco.initial_state().pheromones, &mut StdRng::seed_from_u64(1));
        // BIN_004 and BIN_007 are at or below 50
        assert_eq!(route.len(), 6);
    }

    #[test]
    fn test_step_keeps_pheromones_nonnegative() {
        let p = problem(4);
        let config = AcoConfig::default();
        let aco = AntColonyOptimizer::new(&p, &config);
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = aco.initial_state();
        for _ in 0..30 {
            state = aco.step(state, &mut rng);
            assert!(state.pheromones.min_value().expect("non-empty") >= 0.0);
        }
        assert_eq!(state.iteration, 30);
    }

    #[test]
    fn test_step_evaporates_unused_pairs() {
        let p = problem(1);
        let config = AcoConfig::default();
        let aco = AntColonyOptimizer::new(&p, &config);
        // single-bin routes traverse no pair: pure evaporation
        let state = aco.step(aco.initial_state(), &mut StdRng::seed_from_u64(3));
        assert!((state.pheromones.get(1, 2) - 0.9).abs() < 1e-12);
        assert!(state.best_route.as_ref().is_some_and(|r| r.len() == 1));
    }

    #[test]
    fn test_best_distance_monotonic() {
        let p = problem(5);
        let config = AcoConfig::default().with_iterations(25);
        let outcome = AntColonyOptimizer::new(&p, &config).run(&mut StdRng::seed_from_u64(8));
        for w in outcome.best_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert_eq!(outcome.iterations, 25);
    }

    #[test]
    fn test_run_reproducible_and_consistent() {
        let p = problem(5);
        let config = AcoConfig::default().with_iterations(15);
        let aco = AntColonyOptimizer::new(&p, &config);
        let a = aco.run(&mut StdRng::seed_from_u64(21));
        let b = aco.run(&mut StdRng::seed_from_u64(21));
        assert_eq!(a.plan, b.plan);
        assert_eq!(a.plan.fitness, None);
        assert!(a.plan.len() <= 5);
        let d = crate::evaluation::route_distance(&a.plan.route, &bins(), p.depot());
        assert!((a.plan.distance - d).abs() < 1e-9);
    }

    #[test]
    fn test_run_no_eligible_bins() {
        let p = CollectionProblem::eligible(&bins(), GeoPoint::new(37.765, -122.42), 5, 99.0);
        let config = AcoConfig::default();
        let outcome = AntColonyOptimizer::new(&p, &config).run(&mut StdRng::seed_from_u64(1));
        assert!(outcome.plan.is_empty());
        assert!(outcome.plan.is_unbounded());
        assert_eq!(outcome.iterations, 0);
    }
}
