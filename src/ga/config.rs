//! Genetic algorithm configuration.

use serde::{Deserialize, Serialize};

use crate::error::{check_range, check_threshold, ConfigError};

/// Configuration for the genetic route optimizer.
///
/// # Defaults
///
/// ```
/// use u_wasteroute::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.generations, 150);
/// assert_eq!(config.max_population, 50);
/// assert_eq!(config.tournament_size, 5);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_wasteroute::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_generations(10)
///     .with_min_fill_level(70.0)
///     .with_elite_ratio(0.1);
/// assert_eq!(config.generations, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of generations before termination.
    pub generations: usize,

    /// Upper bound on the population size.
    pub max_population: usize,

    /// Population size per eligible bin, capped by `max_population`.
    pub population_factor: usize,

    /// Bins must have a fill level strictly above this to be candidates.
    pub min_fill_level: f64,

    /// Fraction of each generation copied unchanged into the next (0.0–1.0).
    pub elite_ratio: f64,

    /// Number of candidates sampled per tournament.
    pub tournament_size: usize,

    /// Mutation probability at the start of the run, on top of `min_mutation_rate`.
    ///
    /// The effective rate is `base * (1 - progress) + min`.
    pub base_mutation_rate: f64,

    /// Mutation probability floor reached at the end of the run.
    pub min_mutation_rate: f64,

    /// Evaluate population fitness with rayon (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generations: 150,
            max_population: 50,
            population_factor: 3,
            min_fill_level: 60.0,
            elite_ratio: 0.2,
            tournament_size: 5,
            base_mutation_rate: 0.3,
            min_mutation_rate: 0.05,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the population size cap.
    pub fn with_max_population(mut self, n: usize) -> Self {
        self.max_population = n;
        self
    }

    /// Sets the eligibility threshold.
    pub fn with_min_fill_level(mut self, threshold: f64) -> Self {
        self.min_fill_level = threshold;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Population size for a given number of eligible bins.
    pub fn population_size(&self, eligible: usize) -> usize {
        self.max_population
            .min(self.population_factor.saturating_mul(eligible))
    }

    /// Mutation probability at `progress` in `[0, 1]`.
    pub fn mutation_rate(&self, progress: f64) -> f64 {
        self.base_mutation_rate * (1.0 - progress) + self.min_mutation_rate
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.max_population == 0 {
            return Err(ConfigError::TooSmall {
                name: "max_population",
                min: 1,
                value: self.max_population,
            });
        }
        if self.population_factor == 0 {
            return Err(ConfigError::TooSmall {
                name: "population_factor",
                min: 1,
                value: self.population_factor,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::TooSmall {
                name: "tournament_size",
                min: 1,
                value: self.tournament_size,
            });
        }
        check_threshold(self.min_fill_level)?;
        // elites must leave room for at least one offspring
        check_range("elite_ratio", self.elite_ratio, 0.0..=0.99)?;
        check_range("base_mutation_rate", self.base_mutation_rate, 0.0..=1.0)?;
        check_range("min_mutation_rate", self.min_mutation_rate, 0.0..=1.0)?;
        Ok(())
    }
}
