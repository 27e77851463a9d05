//! Pheromone trail matrix.

/// Smallest route distance used when computing a deposit.
pub const DEPOSIT_DISTANCE_FLOOR: f64 = 1e-6;

/// Dense pheromone weights over ordered pairs of bin locations.
///
/// Indexed by the same 1-based location indices as
/// [`CollectionProblem`](crate::models::CollectionProblem); the depot has no
/// trail. Weights never go negative: evaporation scales by `1 - rho` with
/// `rho ∈ [0, 1]`, and deposits ignore non-positive or non-finite amounts.
///
/// # Examples
///
/// ```
/// use u_wasteroute::aco::PheromoneMatrix;
///
/// let mut trails = PheromoneMatrix::new(3, 1.0);
/// trails.evaporate(0.1);
/// trails.deposit(&[1, 3], 25.0);
/// assert!((trails.get(1, 3) - 25.9).abs() < 1e-10);
/// assert!((trails.get(3, 1) - 0.9).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates an `n × n` matrix with every entry set to `initial`.
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            data: vec![initial.max(0.0); size * size],
            size,
        }
    }

    /// Number of bins covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Trail strength from bin `from` to bin `to` (1-based).
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[(from - 1) * self.size + (to - 1)]
    }

    /// Multiplies every entry by `1 - rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = (1.0 - rho).clamp(0.0, 1.0);
        for v in &mut self.data {
            *v *= keep;
        }
    }

    /// Adds `amount` to every consecutive pair of `route`.
    pub fn deposit(&mut self, route: &[usize], amount: f64) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        for pair in route.windows(2) {
            self.data[(pair[0] - 1) * self.size + (pair[1] - 1)] += amount;
        }
    }

    /// Smallest entry, or `None` for an empty matrix.
    pub fn min_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }
}

/// Deposit amount `q / distance` for a route of the given length.
///
/// Unbounded or NaN distances deposit nothing; tiny distances are floored.
pub fn deposit_amount(q: f64, distance: f64) -> f64 {
    if !distance.is_finite() {
        return 0.0;
    }
    q / distance.max(DEPOSIT_DISTANCE_FLOOR)
}
