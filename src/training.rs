//! Fixed-iteration training loop over randomly sampled batches
//!
//! Each iteration draws `batch_size` records with replacement, trains the
//! network on them once, and periodically records the mean squared error on
//! the full training set (and on a validation set when one is given).

use ndarray::{Array1, Array2, Axis};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::TrainingConfig;
use crate::error::NetworkError;
use crate::network::Network;
use crate::utils::{mean_squared_error, sample_batch_indices};

/// Feature rows paired with one scalar target per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f64>,
    targets: Array1<f64>,
}

impl Dataset {
    /// Pair `features` (n × input_dim) with `targets` (n).
    ///
    /// # Errors
    ///
    /// [`NetworkError::ShapeMismatch`] if the row and target counts differ.
    pub fn new(features: Array2<f64>, targets: Array1<f64>) -> Result<Self, NetworkError> {
        if features.nrows() != targets.len() {
            return Err(NetworkError::shape(
                "dataset targets",
                features.nrows(),
                targets.len(),
            ));
        }
        Ok(Self { features, targets })
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn targets(&self) -> &Array1<f64> {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Draw `batch_size` records uniformly with replacement.
    pub fn sample_batch<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        batch_size: usize,
    ) -> (Array2<f64>, Array1<f64>) {
        let indices = sample_batch_indices(rng, self.len(), batch_size);
        (
            self.features.select(Axis(0), &indices),
            self.targets.select(Axis(0), &indices),
        )
    }

    /// Mean squared error of `network` over every record.
    pub fn mse(&self, network: &Network) -> Result<f64, NetworkError> {
        let predictions = network.predict_batch(self.features.view())?;
        mean_squared_error(&predictions, self.targets.view())
    }
}

/// Losses recorded during a run, one entry per evaluation point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LossHistory {
    /// Iteration (1-based) at which each entry was recorded
    pub iterations: Vec<usize>,
    /// Training-set MSE
    pub train: Vec<f64>,
    /// Validation-set MSE; empty when no validation set was given
    pub validation: Vec<f64>,
}

impl LossHistory {
    pub fn last_train(&self) -> Option<f64> {
        self.train.last().copied()
    }

    pub fn last_validation(&self) -> Option<f64> {
        self.validation.last().copied()
    }
}

/// Drives [`Network::train`] for a fixed number of iterations.
#[derive(Debug, Clone)]
pub struct TrainingLoop {
    iterations: usize,
    batch_size: usize,
    eval_every: usize,
    log_every: usize,
}

impl TrainingLoop {
    pub fn new(config: &TrainingConfig) -> Self {
        Self {
            iterations: config.iterations,
            batch_size: config.batch_size,
            eval_every: config.eval_every.max(1),
            log_every: config.log_every.max(1),
        }
    }

    /// Train `network` on batches drawn from `train` and return the loss history.
    ///
    /// The final iteration is always evaluated, so the history is never empty
    /// when at least one iteration runs.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ShapeMismatch`] if a dataset's rows do not match the
    /// network's input dimension. The check happens before the first update.
    pub fn run<R: Rng + ?Sized>(
        &self,
        network: &mut Network,
        train: &Dataset,
        validation: Option<&Dataset>,
        rng: &mut R,
    ) -> Result<LossHistory, NetworkError> {
        for dataset in std::iter::once(train).chain(validation) {
            if dataset.features.ncols() != network.input_dim() {
                return Err(NetworkError::shape(
                    "training features",
                    network.input_dim(),
                    dataset.features.ncols(),
                ));
            }
        }

        info!(
            iterations = self.iterations,
            batch_size = self.batch_size,
            records = train.len(),
            "starting training"
        );

        let mut history = LossHistory::default();
        for iteration in 1..=self.iterations {
            let (features, targets) = train.sample_batch(rng, self.batch_size);
            network.train(features.view(), targets.view())?;

            let is_last = iteration == self.iterations;
            if iteration % self.eval_every != 0 && !is_last {
                continue;
            }

            let train_loss = train.mse(network)?;
            history.iterations.push(iteration);
            history.train.push(train_loss);
            let validation_loss = match validation {
                Some(dataset) => {
                    let loss = dataset.mse(network)?;
                    history.validation.push(loss);
                    Some(loss)
                }
                None => None,
            };

            if !train_loss.is_finite() {
                warn!(iteration, "training loss is no longer finite");
            }
            if iteration % self.log_every == 0 || is_last {
                let progress = 100.0 * iteration as f64 / self.iterations as f64;
                info!(
                    iteration,
                    progress = %format_args!("{:.1}%", progress),
                    train_loss,
                    validation_loss,
                    "training progress"
                );
            } else {
                debug!(iteration, train_loss, "evaluated");
            }
        }

        Ok(history)
    }
}
