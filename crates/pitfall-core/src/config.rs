//! Configuration loading and typed config structures for Pitfall.
//!
//! The canonical configuration lives in `pitfall-config.yaml` at the
//! project root. Every field has a default, so an empty file (or a missing
//! section) yields the calibrated settings.

use std::path::Path;

use pitfall_agents::{AgentError, CostConfig};
use serde::Deserialize;

/// Environment variable that overrides `logging.level`.
pub const LOG_ENV: &str = "PITFALL_LOG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The cost table is unusable.
    #[error("invalid costs: {source}")]
    Costs {
        /// The underlying validation error.
        #[from]
        source: AgentError,
    },

    /// A mission setting is out of range.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `pitfall-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PitfallConfig {
    /// Scoring and pacing of the mission loop.
    #[serde(default)]
    pub mission: MissionConfig,

    /// Planner step costs.
    #[serde(default)]
    pub costs: CostConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PitfallConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `PITFALL_LOG` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error from [`Self::validate`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.logging.apply_env_override();
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error from [`Self::validate`].
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can drive a mission to an end.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the move penalty is not positive,
    /// the pit penalty is negative, or the score floor is not below zero.
    /// Returns [`ConfigError::Costs`] if the cost table is rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mission = &self.mission;
        if mission.move_penalty <= 0 {
            return Err(ConfigError::Invalid {
                reason: format!("move_penalty must be positive, got {}", mission.move_penalty),
            });
        }
        if mission.pit_penalty < 0 {
            return Err(ConfigError::Invalid {
                reason: format!("pit_penalty must not be negative, got {}", mission.pit_penalty),
            });
        }
        if mission.min_score >= 0 {
            return Err(ConfigError::Invalid {
                reason: format!("min_score must be negative, got {}", mission.min_score),
            });
        }
        self.costs.validate()?;
        Ok(())
    }
}

/// Scoring and pacing of the mission loop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MissionConfig {
    /// The mission fails once the score falls to this value.
    #[serde(default = "default_min_score")]
    pub min_score: i64,

    /// Deducted for every tick that ends on a pit.
    #[serde(default = "default_pit_penalty")]
    pub pit_penalty: i64,

    /// Deducted for every other tick.
    #[serde(default = "default_move_penalty")]
    pub move_penalty: i64,

    /// Real-time milliseconds between ticks, for watching a run.
    #[serde(default)]
    pub tick_delay_ms: u64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            pit_penalty: default_pit_penalty(),
            move_penalty: default_move_penalty(),
            tick_delay_ms: 0,
        }
    }
}

const fn default_min_score() -> i64 {
    -100
}

const fn default_pit_penalty() -> i64 {
    20
}

const fn default_move_penalty() -> i64 {
    1
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit one JSON object per event instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Replace the level with `PITFALL_LOG` if it is set and not blank.
    pub fn apply_env_override(&mut self) {
        if let Ok(level) = std::env::var(LOG_ENV)
            && !level.trim().is_empty()
        {
            self.level = level;
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}
