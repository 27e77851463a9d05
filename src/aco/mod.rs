//! Ant colony optimization for bin collection routes.
//!
//! Ants build routes from the depot by roulette-wheel selection over
//! `pheromone^alpha × (heuristic / (distance + epsilon))^beta`, where the
//! heuristic is `fill_level / 100 × priority multiplier`. After every
//! iteration trails evaporate by `rho` and each ant deposits `q / distance`
//! on the pairs it traversed.
//!
//! The colony minimizes distance only; its plans carry no fitness.

mod colony;
mod config;
mod pheromone;

pub use colony::{AcoOutcome, AcoState, AntColonyOptimizer};
pub use config::AcoConfig;
pub use pheromone::{deposit_amount, PheromoneMatrix, DEPOSIT_DISTANCE_FLOOR};
