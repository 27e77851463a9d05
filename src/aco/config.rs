//! Ant colony configuration.

use serde::{Deserialize, Serialize};

use crate::error::{check_range, check_threshold, ConfigError};

/// Configuration for the ant colony route optimizer.
///
/// # Defaults
///
/// ```
/// use u_wasteroute::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.iterations, 100);
/// assert_eq!(config.max_ants, 20);
/// assert_eq!(config.beta, 3.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Number of colony iterations.
    pub iterations: usize,

    /// Upper bound on ants per iteration; the colony uses `min(max_ants, eligible)`.
    pub max_ants: usize,

    /// Bins must have a fill level strictly above this to be candidates.
    pub min_fill_level: f64,

    /// Pheromone exponent.
    pub alpha: f64,

    /// Heuristic desirability exponent.
    pub beta: f64,

    /// Evaporation rate per iteration (0.0–1.0).
    pub rho: f64,

    /// Deposit constant; an ant deposits `q / distance` on each traversed pair.
    pub q: f64,

    /// Added to hop distances before dividing.
    pub epsilon: f64,

    /// Pheromone on every pair before the first iteration.
    pub initial_pheromone: f64,

    /// Evaluate ant routes with rayon (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            max_ants: 20,
            min_fill_level: 50.0,
            alpha: 1.0,
            beta: 3.0,
            rho: 0.1,
            q: 100.0,
            epsilon: 0.1,
            initial_pheromone: 1.0,
            parallel: false,
        }
    }
}

impl AcoConfig {
    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the ant count cap.
    pub fn with_max_ants(mut self, n: usize) -> Self {
        self.max_ants = n;
        self
    }

    /// Sets the eligibility threshold.
    pub fn with_min_fill_level(mut self, threshold: f64) -> Self {
        self.min_fill_level = threshold;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho.clamp(0.0, 1.0);
        self
    }

    /// Sets the pheromone and heuristic exponents.
    pub fn with_exponents(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of ants for a given number of eligible bins.
    pub fn num_ants(&self, eligible: usize) -> usize {
        self.max_ants.min(eligible)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.max_ants == 0 {
            return Err(ConfigError::TooSmall {
                name: "max_ants",
                min: 1,
                value: self.max_ants,
            });
        }
        check_threshold(self.min_fill_level)?;
        check_range("alpha", self.alpha, 0.0..=f64::MAX)?;
        check_range("beta", self.beta, 0.0..=f64::MAX)?;
        check_range("rho", self.rho, 0.0..=1.0)?;
        check_range("q", self.q, f64::MIN_POSITIVE..=f64::MAX)?;
        check_range("epsilon", self.epsilon, f64::MIN_POSITIVE..=f64::MAX)?;
        check_range("initial_pheromone", self.initial_pheromone, f64::MIN_POSITIVE..=f64::MAX)?;
        Ok(())
    }
}
