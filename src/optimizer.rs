//! Strategy selection and the single dispatch point.
//!
//! A host passes the bin collection, depot, and an [`OptimizerConfig`];
//! [`optimize`] validates the configuration, builds the eligible
//! [`CollectionProblem`] for the chosen [`Algorithm`], and runs it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::aco::{AcoConfig, AntColonyOptimizer};
use crate::constructive::{nearest_neighbor, NnConfig};
use crate::error::ConfigError;
use crate::ga::{GaConfig, GeneticOptimizer};
use crate::models::{Bin, CollectionProblem, GeoPoint, RoutePlan};

/// Route optimization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Fitness-maximizing genetic search.
    #[default]
    Genetic,
    /// Distance-minimizing ant colony search.
    AntColony,
    /// Deterministic greedy nearest-bin walk.
    NearestNeighbor,
}

impl Algorithm {
    /// Selector string accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Genetic => "genetic",
            Algorithm::AntColony => "ant_colony",
            Algorithm::NearestNeighbor => "nearest_neighbor",
        }
    }

    /// Whether the strategy draws random numbers.
    pub fn is_stochastic(self) -> bool {
        !matches!(self, Algorithm::NearestNeighbor)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "genetic" => Ok(Algorithm::Genetic),
            "ant_colony" => Ok(Algorithm::AntColony),
            "nearest_neighbor" => Ok(Algorithm::NearestNeighbor),
            other => Err(ConfigError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Everything a host supplies besides the bins and depot.
///
/// # Examples
///
/// ```
/// use u_wasteroute::optimizer::{Algorithm, OptimizerConfig};
///
/// let config: OptimizerConfig =
///     serde_json::from_str(r#"{"algorithm":"ant_colony","capacity":6,"aco":{"iterations":20}}"#).unwrap();
/// assert_eq!(config.algorithm, Algorithm::AntColony);
/// assert_eq!(config.aco.iterations, 20);
/// assert_eq!(config.aco.max_ants, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Strategy to run.
    pub algorithm: Algorithm,
    /// Maximum number of bins per trip.
    pub capacity: usize,
    /// Genetic algorithm tuning.
    pub ga: GaConfig,
    /// Ant colony tuning.
    pub aco: AcoConfig,
    /// Nearest-neighbor tuning.
    pub nn: NnConfig,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            capacity: 10,
            ga: GaConfig::default(),
            aco: AcoConfig::default(),
            nn: NnConfig::default(),
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Creates a configuration for `algorithm` with default tuning.
    pub fn new(algorithm: Algorithm, capacity: usize) -> Self {
        Self {
            algorithm,
            capacity,
            ..Self::default()
        }
    }

    /// Sets the strategy.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the vehicle capacity in bins.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces the genetic algorithm tuning.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Replaces the ant colony tuning.
    pub fn with_aco(mut self, aco: AcoConfig) -> Self {
        self.aco = aco;
        self
    }

    /// Replaces the nearest-neighbor tuning.
    pub fn with_nn(mut self, nn: NnConfig) -> Self {
        self.nn = nn;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Eligibility threshold of the selected strategy.
    pub fn min_fill_level(&self) -> f64 {
        match self.algorithm {
            Algorithm::Genetic => self.ga.min_fill_level,
            Algorithm::AntColony => self.aco.min_fill_level,
            Algorithm::NearestNeighbor => self.nn.min_fill_level,
        }
    }

    /// Validates the capacity and the selected strategy's tuning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        match self.algorithm {
            Algorithm::Genetic => self.ga.validate(),
            Algorithm::AntColony => self.aco.validate(),
            Algorithm::NearestNeighbor => self.nn.validate(),
        }
    }
}

/// Plans a collection route with the configured strategy.
///
/// Seeds a [`StdRng`] from `config.seed`, or from OS entropy when unset.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configuration is invalid. An empty or
/// fully filtered bin collection is not an error; it yields an empty plan
/// with unbounded distance.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_wasteroute::models::{Bin, GeoPoint};
/// use u_wasteroute::optimizer::{optimize, Algorithm, OptimizerConfig};
///
/// let depot = GeoPoint::new(37.765, -122.42);
/// let mut bins = BTreeMap::new();
/// bins.insert("BIN_001".to_string(), Bin::new(GeoPoint::new(37.7749, -122.4194), 85.0, 450.0));
///
/// let config = OptimizerConfig::new(Algorithm::NearestNeighbor, 5);
/// let plan = optimize(&bins, depot, &config).unwrap();
/// assert_eq!(plan.route, vec!["BIN_001"]);
/// ```
pub fn optimize(
    bins: &BTreeMap<String, Bin>,
    depot: GeoPoint,
    config: &OptimizerConfig,
) -> Result<RoutePlan, ConfigError> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    optimize_with_rng(bins, depot, config, &mut rng)
}

/// Like [`optimize`], drawing randomness from `rng` instead of `config.seed`.
pub fn optimize_with_rng<R: Rng>(
    bins: &BTreeMap<String, Bin>,
    depot: GeoPoint,
    config: &OptimizerConfig,
    rng: &mut R,
) -> Result<RoutePlan, ConfigError> {
    config.validate()?;
    let problem = CollectionProblem::eligible(bins, depot, config.capacity, config.min_fill_level());

    log::debug!(
        "{}: {} of {} bins eligible (fill > {}), capacity {}",
        config.algorithm,
        problem.num_bins(),
        bins.len(),
        config.min_fill_level(),
        config.capacity
    );

    let plan = match config.algorithm {
        Algorithm::Genetic => GeneticOptimizer::new(&problem, &config.ga).run(rng).plan,
        Algorithm::AntColony => AntColonyOptimizer::new(&problem, &config.aco).run(rng).plan,
        Algorithm::NearestNeighbor => nearest_neighbor(&problem),
    };
    Ok(plan)
}
