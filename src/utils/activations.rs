//! Activation function for the hidden layer
//!
//! The hidden layer uses the logistic sigmoid. The output layer is linear,
//! so it has no activation function here.

/// Sigmoid activation function.
///
/// Returns the sigmoid of the input: 1 / (1 + exp(-x))
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative assuming s = sigmoid(z).
///
/// Returns the derivative: s * (1 - s)
pub fn sigmoid_derivative(s: f64) -> f64 {
    s * (1.0 - s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_sigmoid_zero() {
        assert!((sigmoid(0.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_sigmoid_known_value() {
        // 1 / (1 + e^-2.2)
        assert!((sigmoid(2.2) - 0.9002495108803148).abs() < EPSILON);
    }

    #[test]
    fn test_sigmoid_symmetry() {
        for &z in &[0.1, 1.0, 3.5, 10.0] {
            assert!((sigmoid(z) + sigmoid(-z) - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_sigmoid_saturates_without_nan() {
        assert!(sigmoid(800.0).is_finite());
        assert!(sigmoid(-800.0).is_finite());
        assert_eq!(sigmoid(-800.0), 0.0);
    }

    #[test]
    fn test_sigmoid_derivative_at_half() {
        assert!((sigmoid_derivative(0.5) - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_sigmoid_derivative_matches_finite_difference() {
        let z = 0.7;
        let h = 1e-6;
        let numeric = (sigmoid(z + h) - sigmoid(z - h)) / (2.0 * h);
        assert!((sigmoid_derivative(sigmoid(z)) - numeric).abs() < 1e-9);
    }
}
