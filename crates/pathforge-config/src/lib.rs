//! Configuration system for PathForge.
//!
//! Load planner configuration from TOML or YAML files to control the stop
//! level, termination and the reference planner's knobs without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use pathforge_config::PlannerConfig;
//! use std::time::Duration;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     stop_level = 1
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [qrrt]
//!     range = 0.25
//!     goal_bias = 0.1
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.stop_level, Some(1));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use pathforge_config::PlannerConfig;
//!
//! let config = PlannerConfig::load("planner.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default planner type tag.
pub const DEFAULT_PLANNER_NAME: &str = "QuotientPlanner";

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

/// Main planner configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Planner type tag used in log output.
    #[serde(default)]
    pub name: Option<String>,

    /// Highest level to solve; the finest level when absent.
    #[serde(default)]
    pub stop_level: Option<usize>,

    /// Random seed for reproducible runs. Level `k` uses `seed + k`.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Reference planner configuration.
    #[serde(default)]
    pub qrrt: QrrtConfig,

    /// Raw named-parameter overrides, applied by name after everything else.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
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

    /// Checks values serde cannot: ranges of the reference planner's knobs.
    ///
    /// The stop level can only be checked against a hierarchy, which happens
    /// when the configuration is applied to a planner.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.qrrt.goal_bias) {
            return Err(ConfigError::Invalid(format!(
                "qrrt.goal_bias must be in [0, 1], got {}",
                self.qrrt.goal_bias
            )));
        }
        if let Some(range) = self.qrrt.range {
            if !(range > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "qrrt.range must be positive, got {}",
                    range
                )));
            }
        }
        Ok(())
    }

    /// Planner type tag, or the default.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PLANNER_NAME)
    }

    /// Sets the planner type tag.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the stop level.
    pub fn with_stop_level(mut self, level: usize) -> Self {
        self.stop_level = Some(level);
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the quantum budget.
    pub fn with_quantum_count_limit(mut self, quanta: u64) -> Self {
        self.termination = Some(TerminationConfig {
            quantum_count_limit: Some(quanta),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Adds a raw named-parameter override.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Seed for the planner of `level`, if a base seed is configured.
    pub fn level_seed(&self, level: usize) -> Option<u64> {
        self.random_seed.map(|s| s.wrapping_add(level as u64))
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds limit.
    pub milliseconds_spent_limit: Option<u64>,

    /// Maximum number of expansion quanta per solve call.
    pub quantum_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    ///
    /// Seconds and milliseconds add up; the sum saturates at `Duration::MAX`.
    pub fn time_limit(&self) -> Option<Duration> {
        let limit = Duration::from_secs(self.seconds_spent_limit.unwrap_or(0))
            .saturating_add(Duration::from_millis(self.milliseconds_spent_limit.unwrap_or(0)));
        (!limit.is_zero()).then_some(limit)
    }

    /// True when no limit is configured at all.
    pub fn is_unbounded(&self) -> bool {
        self.time_limit().is_none() && self.quantum_count_limit.is_none()
    }
}

fn default_goal_bias() -> f64 {
    0.05
}

/// Configuration of the rapidly-exploring quotient-space tree planner.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct QrrtConfig {
    /// Maximum extension distance; derived from the space's extent when absent.
    #[serde(default)]
    pub range: Option<f64>,

    /// Probability of sampling the goal.
    #[serde(default = "default_goal_bias")]
    pub goal_bias: f64,

    /// Sample budget per level; the level is exhausted once spent.
    #[serde(default)]
    pub max_samples: Option<u64>,
}

impl Default for QrrtConfig {
    fn default() -> Self {
        Self {
            range: None,
            goal_bias: default_goal_bias(),
            max_samples: None,
        }
    }
}

#[cfg(test)]
mod tests;
