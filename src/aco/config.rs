//! ACO configuration and policy switches.

use super::ant::Ant;
use super::pheromone::PheromoneUpdate;
use crate::error::AcoError;

/// Which tours deposit pheromone after an episode.
///
/// All three are standard Ant System variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepositPolicy {
    /// Every ant's tour deposits (classic Ant System).
    #[default]
    AllAnts,
    /// Only the best tour of the current episode deposits.
    IterationBest,
    /// Only the best tour found so far deposits.
    GlobalBest,
}

/// Where each ant starts its tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartCityPolicy {
    /// Ant `k` starts at city position `k % n`.
    #[default]
    FixedPerAgent,
    /// Each ant starts at a uniformly random city.
    Random,
}

/// Configuration for the ACO engine.
///
/// # Examples
///
/// ```
/// use u_aco::aco::{AcoConfig, DepositPolicy};
///
/// let config = AcoConfig::default()
///     .with_num_agents(10)
///     .with_num_episodes(200)
///     .with_alpha(1.0)
///     .with_beta(3.0)
///     .with_rho(0.2)
///     .with_deposit_policy(DepositPolicy::IterationBest)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants per episode. `None` uses one ant per city.
    pub num_agents: Option<usize>,

    /// Episode budget. Must be at least 1.
    pub num_episodes: usize,

    /// Trail exponent. 0 ignores pheromone entirely.
    pub alpha: f64,

    /// Heuristic (inverse distance) exponent. 0 ignores distance.
    pub beta: f64,

    /// Evaporation rate in `[0, 1)`. 0 disables evaporation.
    pub rho: f64,

    /// Deposit constant: each edge of a depositing tour receives `q / length`.
    pub q: f64,

    /// Floor applied after evaporation. Must be non-negative.
    pub min_pheromone: f64,

    /// Which tours deposit pheromone.
    pub deposit_policy: DepositPolicy,

    /// How ants pick their start city.
    pub start_city_policy: StartCityPolicy,

    /// Stop after this many consecutive episodes without improving the
    /// best tour. 0 = disabled.
    pub stagnation_limit: usize,

    /// Construct tours in parallel using rayon (feature `parallel`).
    ///
    /// Results are identical either way for a given seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_agents: None,
            num_episodes: 50,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.1,
            q: 1.0,
            min_pheromone: 1e-10,
            deposit_policy: DepositPolicy::default(),
            start_city_policy: StartCityPolicy::default(),
            stagnation_limit: 0,
            parallel: true,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_num_agents(mut self, n: usize) -> Self {
        self.num_agents = Some(n);
        self
    }

    pub fn with_num_episodes(mut self, n: usize) -> Self {
        self.num_episodes = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_min_pheromone(mut self, floor: f64) -> Self {
        self.min_pheromone = floor;
        self
    }

    pub fn with_deposit_policy(mut self, policy: DepositPolicy) -> Self {
        self.deposit_policy = policy;
        self
    }

    pub fn with_start_city_policy(mut self, policy: StartCityPolicy) -> Self {
        self.start_city_policy = policy;
        self
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of ants for a graph with `num_cities` cities.
    pub fn agents_for(&self, num_cities: usize) -> usize {
        self.num_agents.unwrap_or(num_cities)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AcoError> {
        if self.num_agents == Some(0) {
            return Err(AcoError::InvalidAgentCount(0));
        }
        if self.num_episodes == 0 {
            return Err(AcoError::InvalidConfig(
                "num_episodes must be at least 1".into(),
            ));
        }
        Ant::from_config(self).validate()?;
        PheromoneUpdate::from_config(self).validate()
    }
}
