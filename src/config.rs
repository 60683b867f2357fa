//! Pipeline configuration
//!
//! Loaded from YAML; every field is optional and falls back to its default.
//!
//! ```yaml
//! seed: 7
//! walk:
//!   walk_length: 20
//!   p: 0.5
//! training:
//!   dimensions: 32
//! ```

use crate::algo::{SkipGramConfig, WalkConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Random walk sampling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkSettings {
    /// Maximum nodes per walk, start node included
    pub walk_length: usize,
    /// Walks started from every node
    pub walks_per_node: usize,
    /// Return parameter
    pub p: f64,
    /// In-out parameter
    pub q: f64,
    /// Worker threads for walk sampling
    pub workers: usize,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            walk_length: 30,
            walks_per_node: 200,
            p: 1.0,
            q: 1.0,
            workers: 4,
        }
    }
}

/// Skip-gram training settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSettings {
    pub dimensions: usize,
    pub window_size: usize,
    pub min_count: u64,
    pub iterations: usize,
    pub negative_samples: usize,
    pub learning_rate: f32,
    pub min_learning_rate: f32,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            dimensions: 64,
            window_size: 10,
            min_count: 1,
            iterations: 5,
            negative_samples: 5,
            learning_rate: 0.025,
            min_learning_rate: 0.0001,
        }
    }
}

/// Query settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Default number of results
    pub top_n: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongGraphConfig {
    /// Seed shared by walk sampling and training
    pub seed: u64,
    pub walk: WalkSettings,
    pub training: TrainingSettings,
    pub search: SearchSettings,
}

impl Default for SongGraphConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            walk: WalkSettings::default(),
            training: TrainingSettings::default(),
            search: SearchSettings::default(),
        }
    }
}

impl SongGraphConfig {
    /// Parse a YAML document. The result is not validated.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        // An empty document deserializes as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                })
            }
        }

        fn non_zero(field: &'static str, value: usize) -> ConfigResult<()> {
            if value == 0 {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be at least 1".to_string(),
                })
            } else {
                Ok(())
            }
        }

        positive("walk.p", self.walk.p)?;
        positive("walk.q", self.walk.q)?;
        non_zero("walk.walk_length", self.walk.walk_length)?;
        non_zero("walk.workers", self.walk.workers)?;
        non_zero("training.dimensions", self.training.dimensions)?;
        non_zero("training.window_size", self.training.window_size)?;
        non_zero("training.iterations", self.training.iterations)?;

        if self.training.min_learning_rate > self.training.learning_rate {
            return Err(ConfigError::Invalid {
                field: "training.min_learning_rate",
                reason: format!(
                    "{} exceeds learning_rate {}",
                    self.training.min_learning_rate, self.training.learning_rate
                ),
            });
        }

        Ok(())
    }

    /// Walk parameters for the sampler
    pub fn walk_config(&self) -> WalkConfig {
        WalkConfig {
            walks_per_node: self.walk.walks_per_node,
            walk_length: self.walk.walk_length,
            return_bias: self.walk.p,
            exploration_bias: self.walk.q,
            seed: self.seed,
        }
    }

    /// Training parameters for the skip-gram trainer
    pub fn skipgram_config(&self) -> SkipGramConfig {
        SkipGramConfig {
            dimensions: self.training.dimensions,
            window_size: self.training.window_size,
            min_count: self.training.min_count,
            iterations: self.training.iterations,
            negative_samples: self.training.negative_samples,
            learning_rate: self.training.learning_rate,
            min_learning_rate: self.training.min_learning_rate,
            seed: self.seed,
        }
    }
}
