//! Route evaluation: travel distance and composite fitness.

mod evaluator;

pub use evaluator::{
    bin_score, route_distance, route_fitness, RouteEvaluator, DISTANCE_PENALTY_PER_KM,
    MAX_GAS_SCORE,
};
