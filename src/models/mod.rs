//! Domain model types for waste-collection routing.
//!
//! Bins carry telemetry and a derived priority, a collection problem is the
//! indexed view of the eligible bins plus the depot, and a route plan is
//! what every optimizer returns.

mod bin;
mod plan;
mod problem;

pub use bin::{Bin, GeoPoint, Priority, GAS_LEVEL_CEILING};
pub use plan::RoutePlan;
pub use problem::CollectionProblem;
