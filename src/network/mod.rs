//! Feed-forward network with one sigmoid hidden layer and a linear output
//!
//! The network owns two dense weight matrices:
//!
//! - `weights_input_hidden` (input_dim × hidden_dim)
//! - `weights_hidden_output` (hidden_dim × output_dim)
//!
//! There are no biases. `predict` runs the forward pass only; `train` runs
//! forward pass, backpropagation and one batch-mean gradient step.
//!
//! # Example
//!
//! ```
//! use demand_net::network::Network;
//! use demand_net::utils::seeded_rng;
//! use ndarray::array;
//!
//! let mut rng = seeded_rng(Some(7));
//! let mut network = Network::with_rng(2, 4, 1, 0.1, &mut rng).unwrap();
//!
//! let features = array![[0.5, -0.2], [0.1, 0.9]];
//! let targets = array![0.8, -0.7];
//! network.train(features.view(), targets.view()).unwrap();
//!
//! let prediction = network.predict(array![0.5, -0.2].view()).unwrap();
//! assert_eq!(prediction.len(), 1);
//! ```

mod backward;
mod forward;

pub use backward::GradientAccumulator;
pub use forward::ForwardPass;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Normal;
use tracing::debug;

use crate::error::NetworkError;
use crate::optimizers::Sgd;

/// One-hidden-layer regression network.
///
/// Weight shapes are fixed at construction. Only [`Network::train`] mutates
/// the weights. The network holds no locks: callers sharing one instance
/// across threads must serialize access themselves.
#[derive(Debug, Clone)]
pub struct Network {
    weights_input_hidden: Array2<f64>,
    weights_hidden_output: Array2<f64>,
    optimizer: Sgd,
}

impl Network {
    /// Create a network with weights drawn from the thread-local RNG.
    ///
    /// See [`Network::with_rng`] for the initialization scheme.
    pub fn new(
        input_dim: usize,
        hidden_dim: usize,
        output_dim: usize,
        learning_rate: f64,
    ) -> Result<Self, NetworkError> {
        Self::with_rng(
            input_dim,
            hidden_dim,
            output_dim,
            learning_rate,
            &mut rand::thread_rng(),
        )
    }

    /// Create a network with weights drawn from `rng`.
    ///
    /// Each layer is initialized from a normal distribution with mean 0 and
    /// standard deviation `fan_in^-0.5`: `input_dim^-0.5` for the input→hidden
    /// weights and `hidden_dim^-0.5` for the hidden→output weights.
    ///
    /// # Errors
    ///
    /// [`NetworkError::InvalidConstruction`] if any dimension is zero or the
    /// learning rate is not a positive finite number.
    pub fn with_rng<R: Rng + ?Sized>(
        input_dim: usize,
        hidden_dim: usize,
        output_dim: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Self, NetworkError> {
        validate_dimensions(input_dim, hidden_dim, output_dim)?;
        validate_learning_rate(learning_rate)?;

        let weights_input_hidden = Array2::random_using(
            (input_dim, hidden_dim),
            fan_in_normal(input_dim)?,
            rng,
        );
        let weights_hidden_output = Array2::random_using(
            (hidden_dim, output_dim),
            fan_in_normal(hidden_dim)?,
            rng,
        );

        Ok(Self {
            weights_input_hidden,
            weights_hidden_output,
            optimizer: Sgd::new(learning_rate),
        })
    }

    /// Create a network from caller-fixed weight matrices.
    ///
    /// # Errors
    ///
    /// [`NetworkError::InvalidConstruction`] if a dimension is zero, the hidden
    /// dimensions of the two matrices disagree, or the learning rate is not a
    /// positive finite number.
    pub fn from_weights(
        weights_input_hidden: Array2<f64>,
        weights_hidden_output: Array2<f64>,
        learning_rate: f64,
    ) -> Result<Self, NetworkError> {
        let (input_dim, hidden_dim) = weights_input_hidden.dim();
        let (hidden_rows, output_dim) = weights_hidden_output.dim();

        validate_dimensions(input_dim, hidden_dim, output_dim)?;
        if hidden_rows != hidden_dim {
            return Err(NetworkError::InvalidConstruction(format!(
                "hidden→output weights have {} rows but the hidden layer has {} units",
                hidden_rows, hidden_dim
            )));
        }
        validate_learning_rate(learning_rate)?;

        Ok(Self {
            weights_input_hidden,
            weights_hidden_output,
            optimizer: Sgd::new(learning_rate),
        })
    }

    /// Number of input features per example.
    pub fn input_dim(&self) -> usize {
        self.weights_input_hidden.nrows()
    }

    /// Number of hidden units.
    pub fn hidden_dim(&self) -> usize {
        self.weights_input_hidden.ncols()
    }

    /// Number of output units.
    pub fn output_dim(&self) -> usize {
        self.weights_hidden_output.ncols()
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    pub fn weights_input_hidden(&self) -> &Array2<f64> {
        &self.weights_input_hidden
    }

    pub fn weights_hidden_output(&self) -> &Array2<f64> {
        &self.weights_hidden_output
    }

    /// Total number of trainable weights in both matrices.
    pub fn parameter_count(&self) -> usize {
        self.weights_input_hidden.len() + self.weights_hidden_output.len()
    }

    /// Run the forward pass for one feature vector and keep every intermediate signal.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ShapeMismatch`] if `x.len() != input_dim`.
    pub fn forward(&self, x: ArrayView1<f64>) -> Result<ForwardPass, NetworkError> {
        self.check_row_len("forward features", x.len())?;
        Ok(forward::forward(
            x,
            &self.weights_input_hidden,
            &self.weights_hidden_output,
        ))
    }

    /// Predict the output vector (length `output_dim`) for one feature vector.
    ///
    /// Pure function of the current weights and `x`.
    pub fn predict(&self, x: ArrayView1<f64>) -> Result<Array1<f64>, NetworkError> {
        Ok(self.forward(x)?.output)
    }

    /// Predict every row of `features`, returning an (n × output_dim) matrix.
    ///
    /// Each row goes through the same forward pass as [`Network::predict`].
    pub fn predict_batch(&self, features: ArrayView2<f64>) -> Result<Array2<f64>, NetworkError> {
        self.check_row_len("predict_batch features", features.ncols())?;

        let mut outputs = Array2::zeros((features.nrows(), self.output_dim()));
        for (x, mut out) in features.rows().into_iter().zip(outputs.rows_mut()) {
            let pass = forward::forward(x, &self.weights_input_hidden, &self.weights_hidden_output);
            out.assign(&pass.output);
        }
        Ok(outputs)
    }

    /// Train on one batch: forward pass, backpropagation, then one weight update.
    ///
    /// `features` holds one example per row and `targets` one scalar per row.
    /// Weight steps are summed over the batch and applied once as their mean:
    ///
    /// - `weights_hidden_output += learning_rate * delta_ho / n`
    /// - `weights_input_hidden += learning_rate * delta_ih / n`
    ///
    /// An empty batch leaves the weights unchanged.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ShapeMismatch`] if the rows are not `input_dim` long or
    /// the number of targets differs from the number of rows. Shapes are
    /// checked before any weight is touched.
    pub fn train(
        &mut self,
        features: ArrayView2<f64>,
        targets: ArrayView1<f64>,
    ) -> Result<(), NetworkError> {
        self.check_row_len("train features", features.ncols())?;
        if features.nrows() != targets.len() {
            return Err(NetworkError::shape(
                "train targets",
                features.nrows(),
                targets.len(),
            ));
        }
        if features.nrows() == 0 {
            debug!("empty batch, weights unchanged");
            return Ok(());
        }

        let mut accumulator =
            GradientAccumulator::new(self.input_dim(), self.hidden_dim(), self.output_dim());
        for (x, &y) in features.rows().into_iter().zip(targets.iter()) {
            let pass = forward::forward(x, &self.weights_input_hidden, &self.weights_hidden_output);
            accumulator.accumulate(x, &pass, y, &self.weights_hidden_output);
        }

        let n_records = accumulator.n_records();
        self.optimizer.apply(
            &mut self.weights_hidden_output,
            accumulator.delta_hidden_output(),
            n_records,
        );
        self.optimizer.apply(
            &mut self.weights_input_hidden,
            accumulator.delta_input_hidden(),
            n_records,
        );
        debug!(n_records, "applied batch weight update");

        Ok(())
    }

    fn check_row_len(&self, context: &'static str, got: usize) -> Result<(), NetworkError> {
        if got != self.input_dim() {
            return Err(NetworkError::shape(context, self.input_dim(), got));
        }
        Ok(())
    }
}

fn validate_dimensions(
    input_dim: usize,
    hidden_dim: usize,
    output_dim: usize,
) -> Result<(), NetworkError> {
    for (name, dim) in [
        ("input_dim", input_dim),
        ("hidden_dim", hidden_dim),
        ("output_dim", output_dim),
    ] {
        if dim == 0 {
            return Err(NetworkError::InvalidConstruction(format!(
                "{} must be positive",
                name
            )));
        }
    }
    Ok(())
}

fn validate_learning_rate(learning_rate: f64) -> Result<(), NetworkError> {
    if !(learning_rate.is_finite() && learning_rate > 0.0) {
        return Err(NetworkError::InvalidConstruction(format!(
            "learning_rate must be positive and finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

fn fan_in_normal(fan_in: usize) -> Result<Normal<f64>, NetworkError> {
    let std_dev = (fan_in as f64).powf(-0.5);
    Normal::new(0.0, std_dev)
        .map_err(|e| NetworkError::InvalidConstruction(format!("weight distribution: {}", e)))
}
