//! Configuration structures for training
//!
//! This module provides the hyperparameters consumed by the training loop and
//! the demo binary. Only `learning_rate`, `hidden_nodes` and `output_nodes`
//! reach the network itself; the rest drive the loop around it.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Hyperparameters for a training run, parsed from JSON.
///
/// Every field is optional in the file; missing fields take the defaults
/// from [`TrainingConfig::default`].
///
/// # Example
///
/// ```json
/// {
///   "iterations": 16000,
///   "learning_rate": 0.1,
///   "hidden_nodes": 20,
///   "output_nodes": 1,
///   "batch_size": 128,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Number of batches drawn and trained on
    pub iterations: usize,

    /// Step size of each batch update
    pub learning_rate: f64,

    /// Size of the hidden layer
    pub hidden_nodes: usize,

    /// Size of the output layer
    pub output_nodes: usize,

    /// Records sampled (with replacement) per iteration
    pub batch_size: usize,

    /// Record losses every this many iterations
    pub eval_every: usize,

    /// Log progress every this many iterations
    pub log_every: usize,

    /// Seed for weight initialization and batch sampling; entropy when absent
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            iterations: 16_000,
            learning_rate: 0.1,
            hidden_nodes: 20,
            output_nodes: 1,
            batch_size: 128,
            eval_every: 1,
            log_every: 1_000,
            seed: None,
        }
    }
}

/// Loads a training configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a `TrainingConfig` and
/// validates it.
///
/// # Examples
///
/// ```no_run
/// use demand_net::config::load_config;
///
/// let cfg = load_config("config/bikesharing.json").unwrap();
/// assert_eq!(cfg.output_nodes, 1);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainingConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TrainingConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Check that every setting is usable by the network and the training loop.
pub fn validate_config(config: &TrainingConfig) -> Result<(), ConfigError> {
    if !(config.learning_rate.is_finite() && config.learning_rate > 0.0) {
        return Err(ConfigError::Invalid(format!(
            "learning_rate must be positive, got {}",
            config.learning_rate
        )));
    }

    let counts = [
        ("iterations", config.iterations),
        ("hidden_nodes", config.hidden_nodes),
        ("output_nodes", config.output_nodes),
        ("batch_size", config.batch_size),
        ("eval_every", config.eval_every),
        ("log_every", config.log_every),
    ];
    for (name, value) in counts {
        if value == 0 {
            return Err(ConfigError::Invalid(format!("{} must be positive", name)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TrainingConfig::default()).is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrainingConfig = serde_json::from_str(r#"{ "hidden_nodes": 5 }"#).unwrap();
        assert_eq!(config.hidden_nodes, 5);
        assert_eq!(config.iterations, 16_000);
        assert_eq!(config.batch_size, 128);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<TrainingConfig, _> = serde_json::from_str(r#"{ "momentum": 0.9 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = TrainingConfig {
            batch_size: 0,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(msg)) if msg.contains("batch_size")
        ));
    }

    #[test]
    fn test_negative_learning_rate_rejected() {
        let config = TrainingConfig {
            learning_rate: -0.1,
            ..TrainingConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
