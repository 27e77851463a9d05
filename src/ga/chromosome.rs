//! Variable-length route chromosome.

/// A candidate route: distinct bin location indices in visit order.
///
/// Unlike a full permutation, a candidate may visit any subset of the
/// eligible bins up to the vehicle capacity. Higher fitness is better.
///
/// # Examples
///
/// ```
/// use u_wasteroute::ga::CandidateRoute;
///
/// let route = CandidateRoute::new(vec![3, 1, 2]);
/// assert_eq!(route.bins(), &[3, 1, 2]);
/// assert_eq!(route.fitness(), f64::NEG_INFINITY);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRoute {
    bins: Vec<usize>,
    fitness: f64,
}

impl CandidateRoute {
    /// Creates an unevaluated candidate.
    pub fn new(bins: Vec<usize>) -> Self {
        Self {
            bins,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Bin location indices in visit order.
    pub fn bins(&self) -> &[usize] {
        &self.bins
    }

    /// Mutable access for the mutation operators.
    pub fn bins_mut(&mut self) -> &mut Vec<usize> {
        &mut self.bins
    }

    /// Fitness from the last evaluation.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Stores an evaluated fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Number of bins visited.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns true if the route visits no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Consumes the candidate, returning its bins.
    pub fn into_bins(self) -> Vec<usize> {
        self.bins
    }
}
