//! Demand regression network
//!
//! A feed-forward network with one sigmoid hidden layer and a linear output,
//! trained with batch gradient descent and backpropagation to predict a
//! continuous demand value from numeric features.
//!
//! # Modules
//!
//! - `network`: The network, its forward pass and backpropagation
//! - `optimizers`: Batch gradient descent step
//! - `training`: Fixed-iteration loop over randomly sampled batches
//! - `utils`: Shared utilities (activation, RNG, loss)
//! - `config`: Training configuration structures
//! - `error`: Error types

pub mod config;
pub mod error;
pub mod network;
pub mod optimizers;
pub mod training;
pub mod utils;

pub use error::{ConfigError, NetworkError};
pub use network::Network;
