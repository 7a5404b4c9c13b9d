//! Forward pass shared by prediction and training.

use ndarray::{Array1, Array2, ArrayView1};

use crate::utils::sigmoid;

/// Intermediate signals of one forward pass.
///
/// Training keeps `hidden_out` and `output` for the backward pass of the
/// same example; prediction only returns `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    /// Signals into the hidden layer: `x · weights_input_hidden`.
    pub hidden_pre: Array1<f64>,
    /// Signals from the hidden layer: `sigmoid(hidden_pre)`.
    pub hidden_out: Array1<f64>,
    /// Signals from the output layer. The output activation is the identity.
    pub output: Array1<f64>,
}

/// Run one feature vector through both weight matrices.
///
/// The caller guarantees `x.len() == weights_input_hidden.nrows()`.
pub(crate) fn forward(
    x: ArrayView1<f64>,
    weights_input_hidden: &Array2<f64>,
    weights_hidden_output: &Array2<f64>,
) -> ForwardPass {
    let hidden_pre = x.dot(weights_input_hidden);
    let hidden_out = hidden_pre.mapv(sigmoid);
    let output = hidden_out.dot(weights_hidden_output);

    ForwardPass {
        hidden_pre,
        hidden_out,
        output,
    }
}
