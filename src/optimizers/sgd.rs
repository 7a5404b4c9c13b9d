//! Batch gradient descent step
//!
//! This module applies the mean of the accumulated weight steps of one batch:
//! `weights = weights + learning_rate * delta / n_records`

use ndarray::Array2;

/// Plain gradient descent over the batch-mean weight step.
///
/// The accumulated deltas are built from `target - prediction`, so they
/// already point downhill on squared error and the update is additive:
///
/// `w = w + η * Δw / n`
///
/// where η (eta) is the learning rate and n the number of records in the batch.
/// There is no momentum, regularization or adaptive learning rate.
///
/// # Example
///
/// ```
/// use demand_net::optimizers::Sgd;
/// use ndarray::array;
///
/// let sgd = Sgd::new(0.5);
/// let mut weights = array![[1.0, 2.0]];
/// let delta = array![[0.2, -0.4]];
///
/// sgd.apply(&mut weights, &delta, 2);
/// assert!((weights[[0, 0]] - 1.05).abs() < 1e-12);
/// assert!((weights[[0, 1]] - 1.9).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f64,
}

impl Sgd {
    /// Creates a new step rule with the given learning rate.
    ///
    /// The network validates that the rate is positive before building one.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    /// Get the learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Apply the averaged step `learning_rate * delta / n_records` to `weights` in place.
    ///
    /// # Panics
    ///
    /// Panics if `weights` and `delta` have different shapes.
    pub fn apply(&self, weights: &mut Array2<f64>, delta: &Array2<f64>, n_records: usize) {
        assert_eq!(
            weights.dim(),
            delta.dim(),
            "Weights and weight step must have the same shape"
        );
        if n_records == 0 {
            return;
        }

        let n = n_records as f64;
        weights.zip_mut_with(delta, |w, &d| *w += self.learning_rate * d / n);
    }
}
