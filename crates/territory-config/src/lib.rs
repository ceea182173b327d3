//! Configuration system for Territory.
//!
//! Load run configuration from TOML or YAML to pick a strategy, size the
//! local search, and bound the exact solve without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use territory_config::{StrategyKind, TerritoryConfig};
//! use territory_core::Objective;
//! use std::time::Duration;
//!
//! let config = TerritoryConfig::from_toml_str(r#"
//!     random_seed = 42
//!     strategy = "exact"
//!
//!     [local_search]
//!     iterations = 500000
//!
//!     [exact]
//!     objective = "bounding_box"
//!     time_limit_seconds = 60.0
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, StrategyKind::Exact);
//! assert_eq!(config.local_search.iterations, 500_000);
//! assert_eq!(config.exact.objective, Objective::BoundingBox);
//! assert_eq!(config.exact.time_limit(), Duration::from_secs(60));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use territory_config::TerritoryConfig;
//!
//! let config = TerritoryConfig::load("territory.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use territory_core::Objective;
use thiserror::Error;

/// Default local search iteration count.
pub const DEFAULT_ITERATIONS: u64 = 100_000;

/// Default exact solve time limit in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: f64 = 30.0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main run configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerritoryConfig {
    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Which solution strategy to run.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Local search configuration.
    #[serde(default)]
    pub local_search: LocalSearchConfig,

    /// Exact formulation configuration.
    #[serde(default)]
    pub exact: ExactConfig,

    /// Random problem generation, if the run generates its own input.
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}

impl TerritoryConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`TerritoryConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the local search iteration count.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.local_search.iterations = iterations;
        self
    }

    /// Sets the exact objective.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.exact.objective = objective;
        self
    }

    /// Sets the exact time limit.
    pub fn with_time_limit_seconds(mut self, seconds: f64) -> Self {
        self.exact.time_limit_seconds = seconds;
        self
    }

    /// Sets the generator section.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// Zero local search iterations is allowed and means "keep the seed".
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limit = self.exact.time_limit_seconds;
        if limit <= 0.0 || Duration::try_from_secs_f64(limit).is_err() {
            return Err(ConfigError::Invalid(format!(
                "exact.time_limit_seconds must be a positive number of seconds that fits a duration, got {}",
                limit
            )));
        }
        if self.local_search.log_interval == Some(0) {
            return Err(ConfigError::Invalid(
                "local_search.log_interval must be at least 1".to_string(),
            ));
        }
        if let Some(generator) = &self.generator {
            generator.validate()?;
        }
        Ok(())
    }
}

/// Solution strategy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Greedy seed followed by swap/recolor local search.
    #[default]
    Heuristic,

    /// Exact formulation handed to a MIP backend.
    Exact,
}

/// Local search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Number of iterations (one swap and one recolor attempt each).
    #[serde(default = "default_iterations")]
    pub iterations: u64,

    /// Iterations between progress events; defaults to a tenth of the run.
    #[serde(default)]
    pub log_interval: Option<u64>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        LocalSearchConfig {
            iterations: DEFAULT_ITERATIONS,
            log_interval: None,
        }
    }
}

impl LocalSearchConfig {
    /// Returns the progress interval, `max(1, iterations / 10)` unless set.
    pub fn effective_log_interval(&self) -> u64 {
        self.log_interval
            .unwrap_or_else(|| (self.iterations / 10).max(1))
    }
}

fn default_iterations() -> u64 {
    DEFAULT_ITERATIONS
}

/// Exact formulation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExactConfig {
    /// Objective to minimize.
    #[serde(default)]
    pub objective: Objective,

    /// Wall-clock limit handed to the backend.
    #[serde(default = "default_time_limit")]
    pub time_limit_seconds: f64,

    /// Cap on the number of assigned cells.
    #[serde(default)]
    pub stone_budget: Option<u64>,
}

impl Default for ExactConfig {
    fn default() -> Self {
        ExactConfig {
            objective: Objective::default(),
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECS,
            stone_budget: None,
        }
    }
}

impl ExactConfig {
    /// Returns the time limit as a Duration.
    ///
    /// Values too large for a `Duration` saturate to `Duration::MAX`; values
    /// that `validate` rejects (non-positive or NaN) give `Duration::ZERO`.
    pub fn time_limit(&self) -> Duration {
        match Duration::try_from_secs_f64(self.time_limit_seconds) {
            Ok(limit) => limit,
            Err(_) if self.time_limit_seconds > 0.0 => Duration::MAX,
            Err(_) => Duration::ZERO,
        }
    }
}

fn default_time_limit() -> f64 {
    DEFAULT_TIME_LIMIT_SECS
}

/// Random problem generation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// Grid side length n.
    pub size: usize,

    /// Number of players m.
    pub players: usize,

    /// Inclusive range of cell weights.
    #[serde(default = "default_cell_value_range")]
    pub cell_value_range: (u32, u32),

    /// Inclusive range of requirements; derived from the grid when absent.
    #[serde(default)]
    pub requirement_range: Option<(i64, i64)>,
}

impl GeneratorConfig {
    pub fn new(size: usize, players: usize) -> Self {
        GeneratorConfig {
            size,
            players,
            cell_value_range: default_cell_value_range(),
            requirement_range: None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 || self.players == 0 {
            return Err(ConfigError::Invalid(
                "generator.size and generator.players must be at least 1".to_string(),
            ));
        }
        let (low, high) = self.cell_value_range;
        if low > high {
            return Err(ConfigError::Invalid(format!(
                "generator.cell_value_range is empty: ({}, {})",
                low, high
            )));
        }
        if let Some((low, high)) = self.requirement_range {
            if low <= 0 || low > high {
                return Err(ConfigError::Invalid(format!(
                    "generator.requirement_range must be positive and non-empty: ({}, {})",
                    low, high
                )));
            }
        }
        Ok(())
    }
}

fn default_cell_value_range() -> (u32, u32) {
    (1, 9)
}
