//! # u-wasteroute
//!
//! Route optimization for sensor-equipped waste bins: given bin telemetry,
//! a depot, and a vehicle capacity in bins, plan a single collection trip
//! with a genetic algorithm, an ant colony, or a greedy nearest-neighbor
//! baseline.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (GeoPoint, Bin, Priority, CollectionProblem, RoutePlan)
//! - [`distance`] — Haversine distance and distance matrix
//! - [`evaluation`] — Route distance and fitness
//! - [`constructive`] — Nearest-neighbor baseline
//! - [`ga`] — Genetic algorithm over variable-length routes
//! - [`aco`] — Ant colony optimization
//! - [`optimizer`] — Strategy selection and configuration
//! - [`stats`] — Time, fuel, and emission estimates for a plan
//! - [`telemetry`] — Simulated sensor drift
//! - [`error`] — Configuration errors

pub mod aco;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod models;
pub mod optimizer;
pub mod stats;
pub mod telemetry;

pub use error::ConfigError;
pub use optimizer::{optimize, optimize_with_rng, Algorithm, OptimizerConfig};
