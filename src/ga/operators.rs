//! Variation operators for variable-length routes.
//!
//! - [`order_crossover`] — copy a slice of parent 1, fill from parent 2's order
//! - [`adaptive_mutation`] — swap / reverse / insert / remove with a decaying rate

use std::collections::HashSet;

use rand::Rng;

/// Cumulative probability of a swap mutation.
const SWAP_CUTOFF: f64 = 0.4;
/// Cumulative probability of a swap or reverse mutation.
const REVERSE_CUTOFF: f64 = 0.7;
/// Cumulative probability of swap, reverse, or insert.
const INSERT_CUTOFF: f64 = 0.85;

/// The mutation applied to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// Two positions exchanged.
    Swap,
    /// A contiguous segment reversed.
    Reverse,
    /// An unvisited eligible bin inserted.
    Insert,
    /// One bin removed.
    Remove,
}

/// Fisher-Yates shuffle.
pub fn shuffle<R: Rng>(items: &mut [usize], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Order crossover for routes of possibly different lengths.
///
/// The child targets `(len1 + len2) / 2` bins: a random slice of `parent1`
/// keeps its positions, and the remaining slots take unused bins from
/// `parent2` in order. Slots left unfilled are dropped, so the child never
/// repeats a bin. If one parent is empty, the other is cloned.
///
/// ```
/// use u_wasteroute::ga::order_crossover;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let child = order_crossover(&[1, 2, 3, 4], &[4, 3, 2, 1], &mut rng);
/// let mut sorted = child.clone();
/// sorted.sort();
/// assert_eq!(sorted, vec![1, 2, 3, 4]);
/// ```
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    if parent1.is_empty() || parent2.is_empty() {
        return if parent1.is_empty() {
            parent2.to_vec()
        } else {
            parent1.to_vec()
        };
    }

    let target = (parent1.len() + parent2.len()) / 2;
    let shorter = parent1.len().min(parent2.len());
    let a = rng.random_range(0..shorter);
    let b = rng.random_range(0..shorter);
    let (start, end) = (a.min(b), a.max(b));

    let mut child: Vec<Option<usize>> = vec![None; target];
    let mut used = HashSet::with_capacity(target);

    for (i, &bin) in parent1.iter().enumerate().take(end + 1).skip(start) {
        if i >= target {
            break;
        }
        child[i] = Some(bin);
        used.insert(bin);
    }

    let mut slot = 0;
    for &bin in parent2 {
        while slot < target && child[slot].is_some() {
            slot += 1;
        }
        if slot >= target {
            break;
        }
        if used.insert(bin) {
            child[slot] = Some(bin);
        }
    }

    child.into_iter().flatten().collect()
}

/// Applies at most one mutation with probability `rate`.
///
/// `pool` is the full eligible set; insertion only happens while the route
/// is shorter than both the pool and `capacity`. Routes of one bin or fewer
/// are never mutated. Returns the mutation applied, if any.
pub fn adaptive_mutation<R: Rng>(
    route: &mut Vec<usize>,
    pool: &[usize],
    capacity: usize,
    rate: f64,
    rng: &mut R,
) -> Option<Mutation> {
    if rng.random::<f64>() >= rate || route.len() <= 1 {
        return None;
    }

    let len = route.len();
    let kind = rng.random::<f64>();

    if kind < SWAP_CUTOFF {
        let i = rng.random_range(0..len);
        let j = rng.random_range(0..len);
        route.swap(i, j);
        Some(Mutation::Swap)
    } else if kind < REVERSE_CUTOFF {
        let a = rng.random_range(0..len);
        let b = rng.random_range(0..len);
        route[a.min(b)..=a.max(b)].reverse();
        Some(Mutation::Reverse)
    } else if kind < INSERT_CUTOFF && len < pool.len() && len < capacity {
        let available: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|b| !route.contains(b))
            .collect();
        if available.is_empty() {
            return None;
        }
        let bin = available[rng.random_range(0..available.len())];
        let pos = rng.random_range(0..=len);
        route.insert(pos, bin);
        Some(Mutation::Insert)
    } else {
        // TODO: remove the lowest-priority bin instead of a random one once
        // fitness regressions against the random variant are measured
        let pos = rng.random_range(0..len);
        route.remove(pos);
        Some(Mutation::Remove)
    }
}
