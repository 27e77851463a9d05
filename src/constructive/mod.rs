//! Constructive heuristics for building collection routes.
//!
//! - [`nearest_neighbor`] — Greedy nearest-bin walk from the depot, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::{nearest_neighbor, nearest_neighbor_order, NnConfig};
