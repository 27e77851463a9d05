//! Great-circle distance and distance matrices.
//!
//! - [`haversine`] — Point-to-point distance in kilometers
//! - [`DistanceMatrix`] — Dense precomputed distances over depot + bins

mod haversine;
mod matrix;

pub use haversine::{haversine, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
