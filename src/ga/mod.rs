//! Genetic algorithm for route selection and ordering.
//!
//! - [`CandidateRoute`] — Variable-length chromosome of distinct bin indices
//! - [`GaConfig`] — Generations, population sizing, elitism, mutation schedule
//! - [`GeneticOptimizer`] — Pure `step(state, rng) -> state` generational loop
//! - [`order_crossover`], [`adaptive_mutation`] — Variation operators
//! - [`tournament`] — Parent selection

mod chromosome;
mod config;
mod operators;
mod runner;
mod selection;

pub use chromosome::CandidateRoute;
pub use config::GaConfig;
pub use operators::{adaptive_mutation, order_crossover, shuffle, Mutation};
pub use runner::{GaOutcome, GaState, GeneticOptimizer};
pub use selection::{elite_indices, tournament};
