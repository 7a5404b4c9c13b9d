//! Error types for network construction, training and configuration
//!
//! Shape and construction failures are caller errors: they are reported
//! synchronously and never leave a network partially updated.

use thiserror::Error;

/// Errors raised by [`Network`](crate::network::Network) and the training loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// An input did not have the length the network (or its partner input) requires.
    #[error("shape mismatch in {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// A dimension or the learning rate was not strictly positive.
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),
}

impl NetworkError {
    pub(crate) fn shape(context: &'static str, expected: usize, got: usize) -> Self {
        NetworkError::ShapeMismatch {
            context,
            expected,
            got,
        }
    }
}

/// Errors raised while loading a [`TrainingConfig`](crate::config::TrainingConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
