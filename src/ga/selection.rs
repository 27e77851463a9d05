//! Parent selection.

use rand::Rng;

use super::chromosome::CandidateRoute;

/// Tournament selection: sample `k` candidates uniformly, return the index
/// of the fittest (highest fitness; ties keep the earlier draw).
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[CandidateRoute], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Indices of the `count` fittest candidates, best first.
///
/// The sort is stable, so equal fitness keeps population order.
pub fn elite_indices(population: &[CandidateRoute], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| {
        population[b]
            .fitness()
            .partial_cmp(&population[a].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(count);
    order
}
