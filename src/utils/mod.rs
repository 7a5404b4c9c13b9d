//! Shared utilities for the network and its training loop
//!
//! This module provides the hidden-layer activation, random source helpers
//! and the regression loss used to monitor training.

pub mod activations;
pub mod metrics;
pub mod rng;

pub use activations::{sigmoid, sigmoid_derivative};
pub use metrics::mean_squared_error;
pub use rng::{sample_batch_indices, seeded_rng};
