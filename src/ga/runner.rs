//! Generational loop of the genetic route optimizer.
//!
//! Each [`GeneticOptimizer::step`] consumes a [`GaState`] and returns the
//! next one: evaluate → track best → elitism → tournament + crossover +
//! adaptive mutation. No state survives a call to [`GeneticOptimizer::run`].

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::chromosome::CandidateRoute;
use super::config::GaConfig;
use super::operators::{adaptive_mutation, order_crossover, shuffle};
use super::selection::{elite_indices, tournament};
use crate::evaluation::RouteEvaluator;
use crate::models::{CollectionProblem, RoutePlan};

/// Population and incumbent between two generations.
#[derive(Debug, Clone)]
pub struct GaState {
    /// Generations completed so far.
    pub generation: usize,
    /// Routes awaiting evaluation in the next step.
    pub population: Vec<CandidateRoute>,
    /// Best route seen in any evaluated generation.
    pub best: Option<CandidateRoute>,
    /// Incumbent fitness after each step.
    pub best_history: Vec<f64>,
}

impl GaState {
    /// Fitness of the incumbent, or `f64::NEG_INFINITY` before any improvement.
    pub fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(f64::NEG_INFINITY, CandidateRoute::fitness)
    }
}

/// Result of a genetic run.
#[derive(Debug, Clone)]
pub struct GaOutcome {
    /// Best route with its distance and fitness.
    pub plan: RoutePlan,
    /// Number of generations executed.
    pub generations: usize,
    /// Incumbent fitness after each generation.
    pub best_history: Vec<f64>,
}

/// Genetic algorithm over variable-length routes of eligible bins.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_wasteroute::models::{Bin, CollectionProblem, GeoPoint};
/// use u_wasteroute::ga::{GaConfig, GeneticOptimizer};
///
/// let mut bins = BTreeMap::new();
/// bins.insert("A".to_string(), Bin::new(GeoPoint::new(37.775, -122.419), 85.0, 450.0));
/// bins.insert("B".to_string(), Bin::new(GeoPoint::new(37.785, -122.409), 92.0, 600.0));
/// bins.insert("C".to_string(), Bin::new(GeoPoint::new(37.764, -122.429), 78.0, 320.0));
///
/// let config = GaConfig::default().with_generations(20);
/// let problem = CollectionProblem::eligible(&bins, GeoPoint::new(37.765, -122.42), 2, config.min_fill_level);
/// let optimizer = GeneticOptimizer::new(&problem, &config);
///
/// let outcome = optimizer.run(&mut StdRng::seed_from_u64(42));
/// assert!(outcome.plan.len() <= 2);
/// assert!(outcome.plan.fitness.is_some());
/// ```
pub struct GeneticOptimizer<'a> {
    problem: &'a CollectionProblem,
    config: &'a GaConfig,
    pool: Vec<usize>,
}

impl<'a> GeneticOptimizer<'a> {
    /// Creates an optimizer for an already filtered problem.
    pub fn new(problem: &'a CollectionProblem, config: &'a GaConfig) -> Self {
        Self {
            problem,
            config,
            pool: problem.bin_indices(),
        }
    }

    /// Population size for this problem.
    pub fn population_size(&self) -> usize {
        self.config.population_size(self.problem.num_bins())
    }

    /// Random initial population: shuffled eligible bins truncated to capacity.
    pub fn initial_state<R: Rng>(&self, rng: &mut R) -> GaState {
        let route_len = self.problem.capacity().min(self.pool.len().max(1));
        let population = (0..self.population_size())
            .map(|_| {
                let mut bins = self.pool.clone();
                shuffle(&mut bins, rng);
                bins.truncate(route_len);
                CandidateRoute::new(bins)
            })
            .collect();

        GaState {
            generation: 0,
            population,
            best: None,
            best_history: Vec::with_capacity(self.config.generations),
        }
    }

    /// Runs one generation.
    ///
    /// Evaluates the incoming population, replaces the incumbent only on a
    /// strictly greater fitness, and breeds the next population.
    pub fn step<R: Rng>(&self, mut state: GaState, rng: &mut R) -> GaState {
        if state.population.is_empty() {
            state.generation += 1;
            state.best_history.push(state.best_fitness());
            return state;
        }

        let evaluator = RouteEvaluator::new(self.problem);
        evaluate_population(&evaluator, &mut state.population, self.config.parallel);

        if let Some(gen_best) = find_best(&state.population) {
            if gen_best.fitness() > state.best_fitness() {
                state.best = Some(gen_best.clone());
            }
        }

        let size = state.population.len();
        let progress = state.generation as f64 / self.config.generations as f64;
        let rate = self.config.mutation_rate(progress);
        let elite_count = (size as f64 * self.config.elite_ratio) as usize;

        let mut next: Vec<CandidateRoute> = elite_indices(&state.population, elite_count)
            .into_iter()
            .map(|i| state.population[i].clone())
            .collect();

        while next.len() < size {
            let p1 = tournament(&state.population, self.config.tournament_size, rng);
            let p2 = tournament(&state.population, self.config.tournament_size, rng);
            let mut child = order_crossover(
                state.population[p1].bins(),
                state.population[p2].bins(),
                rng,
            );
            adaptive_mutation(&mut child, &self.pool, self.problem.capacity(), rate, rng);
            next.push(CandidateRoute::new(child));
        }

        state.population = next;
        state.generation += 1;
        state.best_history.push(state.best_fitness());
        state
    }

    /// Runs all configured generations and returns the best route seen.
    ///
    /// With no eligible bins the plan is empty with unbounded distance and
    /// minimal fitness.
    pub fn run<R: Rng>(&self, rng: &mut R) -> GaOutcome {
        if self.problem.is_empty() {
            log::warn!("genetic: no bins above fill level {}", self.config.min_fill_level);
            return GaOutcome {
                plan: RoutePlan::empty_scored(),
                generations: 0,
                best_history: Vec::new(),
            };
        }

        let mut state = self.initial_state(rng);
        for _ in 0..self.config.generations {
            state = self.step(state, rng);
            log::debug!(
                "genetic: generation {}/{} best fitness {:.3}",
                state.generation,
                self.config.generations,
                state.best_fitness()
            );
        }

        let plan = match state.best {
            Some(best) => {
                let distance = RouteEvaluator::new(self.problem).distance(best.bins());
                let fitness = best.fitness();
                RoutePlan::new(self.problem.route_ids(best.bins()), distance, Some(fitness))
            }
            None => RoutePlan::empty_scored(),
        };

        log::info!(
            "genetic: {} eligible bins, {} generations, route of {} bins, {:.3} km",
            self.problem.num_bins(),
            state.generation,
            plan.len(),
            plan.distance
        );

        GaOutcome {
            plan,
            generations: state.generation,
            best_history: state.best_history,
        }
    }
}

/// Evaluate all candidates in the population.
#[cfg(feature = "parallel")]
fn evaluate_population(
    evaluator: &RouteEvaluator<'_>,
    population: &mut [CandidateRoute],
    parallel: bool,
) {
    if parallel {
        population.par_iter_mut().for_each(|c| {
            let f = evaluator.fitness(c.bins());
            c.set_fitness(f);
        });
    } else {
        for c in population.iter_mut() {
            let f = evaluator.fitness(c.bins());
            c.set_fitness(f);
        }
    }
}

/// Evaluate all candidates in the population.
#[cfg(not(feature = "parallel"))]
fn evaluate_population(
    evaluator: &RouteEvaluator<'_>,
    population: &mut [CandidateRoute],
    _parallel: bool,
) {
    for c in population.iter_mut() {
        let f = evaluator.fitness(c.bins());
        c.set_fitness(f);
    }
}

/// First candidate with the highest fitness; NaN never wins.
fn find_best(population: &[CandidateRoute]) -> Option<&CandidateRoute> {
    let mut best: Option<&CandidateRoute> = None;
    for c in population {
        if c.fitness().is_nan() {
            continue;
        }
        match best {
            Some(b) if c.fitness() <= b.fitness() => {}
            _ => best = Some(c),
        }
    }
    best
}
