//! Indexed view of a bin collection for the optimizers.

use std::collections::BTreeMap;

use super::{Bin, GeoPoint};
use crate::distance::DistanceMatrix;

/// Bins eligible for one search, indexed for fast distance lookups.
///
/// Location 0 is the depot; locations `1..=num_bins()` are the eligible
/// bins in key order. Routes inside the optimizers are sequences of these
/// location indices and are mapped back to bin keys on output.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_wasteroute::models::{Bin, CollectionProblem, GeoPoint};
///
/// let mut bins = BTreeMap::new();
/// bins.insert("A".to_string(), Bin::new(GeoPoint::new(37.77, -122.41), 85.0, 450.0));
/// bins.insert("B".to_string(), Bin::new(GeoPoint::new(37.79, -122.39), 45.0, 180.0));
///
/// let problem = CollectionProblem::eligible(&bins, GeoPoint::new(37.765, -122.42), 5, 60.0);
/// assert_eq!(problem.num_bins(), 1);
/// assert_eq!(problem.id(1), "A");
/// ```
#[derive(Debug, Clone)]
pub struct CollectionProblem {
    depot: GeoPoint,
    ids: Vec<String>,
    bins: Vec<Bin>,
    capacity: usize,
    distances: DistanceMatrix,
}

impl CollectionProblem {
    /// Builds the problem from bins whose fill level is strictly above `min_fill_level`.
    pub fn eligible(
        bins: &BTreeMap<String, Bin>,
        depot: GeoPoint,
        capacity: usize,
        min_fill_level: f64,
    ) -> Self {
        let (ids, bins): (Vec<String>, Vec<Bin>) = bins
            .iter()
            .filter(|(_, b)| b.fill_level() > min_fill_level)
            .map(|(k, b)| (k.clone(), b.clone()))
            .unzip();

        let points: Vec<GeoPoint> = std::iter::once(depot)
            .chain(bins.iter().map(Bin::location))
            .collect();
        let distances = DistanceMatrix::from_points(&points);

        Self {
            depot,
            ids,
            bins,
            capacity,
            distances,
        }
    }

    /// Depot coordinate.
    pub fn depot(&self) -> GeoPoint {
        self.depot
    }

    /// Number of eligible bins (excluding the depot).
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Returns `true` if no bin passed the eligibility filter.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Maximum number of bins per trip.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Location indices of all eligible bins, in key order.
    pub fn bin_indices(&self) -> Vec<usize> {
        (1..=self.bins.len()).collect()
    }

    /// The bin at location `idx` (1-based).
    ///
    /// # Panics
    ///
    /// Panics if `idx` is 0 or out of range.
    pub fn bin(&self, idx: usize) -> &Bin {
        &self.bins[idx - 1]
    }

    /// The key of the bin at location `idx` (1-based).
    pub fn id(&self, idx: usize) -> &str {
        &self.ids[idx - 1]
    }

    /// Distance matrix over depot + eligible bins.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Maps a route of location indices to bin keys.
    pub fn route_ids(&self, route: &[usize]) -> Vec<String> {
        route.iter().map(|&i| self.id(i).to_string()).collect()
    }
}
