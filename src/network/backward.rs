//! Backpropagation and batch accumulation of weight steps.

use ndarray::linalg::general_mat_mul;
use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::forward::ForwardPass;
use crate::utils::sigmoid_derivative;

/// Weight steps summed over the examples of one batch.
///
/// Both matrices start at zero and share the shape of the weights they
/// will update. Nothing is applied until the whole batch has been seen.
#[derive(Debug, Clone)]
pub struct GradientAccumulator {
    delta_ih: Array2<f64>,
    delta_ho: Array2<f64>,
    n_records: usize,
}

impl GradientAccumulator {
    /// Create a zeroed accumulator for the given layer sizes.
    pub fn new(input_dim: usize, hidden_dim: usize, output_dim: usize) -> Self {
        Self {
            delta_ih: Array2::zeros((input_dim, hidden_dim)),
            delta_ho: Array2::zeros((hidden_dim, output_dim)),
            n_records: 0,
        }
    }

    /// Backpropagate the error of one example and add its weight steps.
    ///
    /// `pass` must come from the forward pass of `x` through the current
    /// weights. The scalar `target` is compared against every output unit.
    pub fn accumulate(
        &mut self,
        x: ArrayView1<f64>,
        pass: &ForwardPass,
        target: f64,
        weights_hidden_output: &Array2<f64>,
    ) {
        // Identity output activation: the error term is the raw residual.
        let output_error_term: Array1<f64> = pass.output.mapv(|o| target - o);

        let hidden_error = weights_hidden_output.dot(&output_error_term);
        let hidden_error_term =
            hidden_error * &pass.hidden_out.mapv(sigmoid_derivative);

        // delta_ih += outer(x, hidden_error_term)
        general_mat_mul(
            1.0,
            &x.insert_axis(Axis(1)),
            &hidden_error_term.view().insert_axis(Axis(0)),
            1.0,
            &mut self.delta_ih,
        );
        // delta_ho += outer(hidden_out, output_error_term)
        general_mat_mul(
            1.0,
            &pass.hidden_out.view().insert_axis(Axis(1)),
            &output_error_term.view().insert_axis(Axis(0)),
            1.0,
            &mut self.delta_ho,
        );

        self.n_records += 1;
    }

    /// Accumulated input→hidden step (input_dim × hidden_dim).
    pub fn delta_input_hidden(&self) -> &Array2<f64> {
        &self.delta_ih
    }

    /// Accumulated hidden→output step (hidden_dim × output_dim).
    pub fn delta_hidden_output(&self) -> &Array2<f64> {
        &self.delta_ho
    }

    /// Number of examples accumulated so far.
    pub fn n_records(&self) -> usize {
        self.n_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::forward::forward;
    use ndarray::array;

    #[test]
    fn test_accumulator_starts_at_zero() {
        let acc = GradientAccumulator::new(3, 2, 1);
        assert_eq!(acc.delta_input_hidden().dim(), (3, 2));
        assert_eq!(acc.delta_hidden_output().dim(), (2, 1));
        assert!(acc.delta_input_hidden().iter().all(|&d| d == 0.0));
        assert!(acc.delta_hidden_output().iter().all(|&d| d == 0.0));
        assert_eq!(acc.n_records(), 0);
    }

    #[test]
    fn test_zero_error_adds_nothing() {
        let w_ih = array![[0.2, -0.1], [0.4, 0.3]];
        let w_ho = array![[0.5], [-0.6]];
        let x = array![1.0, -2.0];
        let pass = forward(x.view(), &w_ih, &w_ho);

        let mut acc = GradientAccumulator::new(2, 2, 1);
        acc.accumulate(x.view(), &pass, pass.output[0], &w_ho);

        assert!(acc.delta_input_hidden().iter().all(|&d| d == 0.0));
        assert!(acc.delta_hidden_output().iter().all(|&d| d == 0.0));
        assert_eq!(acc.n_records(), 1);
    }

    #[test]
    fn test_single_example_matches_hand_computation() {
        // Zero input weights put every hidden unit at 0.5, derivative 0.25.
        let w_ih = Array2::zeros((2, 2));
        let w_ho = array![[1.0], [2.0]];
        let x = array![1.0, 3.0];
        let pass = forward(x.view(), &w_ih, &w_ho);
        // output = 0.5 + 1.0 = 1.5; error = 2.0 - 1.5 = 0.5
        let mut acc = GradientAccumulator::new(2, 2, 1);
        acc.accumulate(x.view(), &pass, 2.0, &w_ho);

        // delta_ho = hidden_out * error = 0.25 each
        assert!((acc.delta_hidden_output()[[0, 0]] - 0.25).abs() < 1e-12);
        assert!((acc.delta_hidden_output()[[1, 0]] - 0.25).abs() < 1e-12);

        // hidden_error_term = [0.5, 1.0] * 0.25 = [0.125, 0.25]
        let expected = array![[0.125, 0.25], [0.375, 0.75]];
        for (got, want) in acc.delta_input_hidden().iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_contributions_sum_across_examples() {
        let w_ih = array![[0.1, 0.2], [0.3, 0.4]];
        let w_ho = array![[0.7], [-0.4]];
        let x = array![1.0, 2.0];
        let pass = forward(x.view(), &w_ih, &w_ho);

        let mut once = GradientAccumulator::new(2, 2, 1);
        once.accumulate(x.view(), &pass, 1.0, &w_ho);

        let mut twice = GradientAccumulator::new(2, 2, 1);
        twice.accumulate(x.view(), &pass, 1.0, &w_ho);
        twice.accumulate(x.view(), &pass, 1.0, &w_ho);

        assert_eq!(twice.n_records(), 2);
        for (a, b) in once
            .delta_input_hidden()
            .iter()
            .zip(twice.delta_input_hidden().iter())
        {
            assert!((2.0 * a - b).abs() < 1e-12);
        }
    }
}
