//! Regression loss used to monitor training.

use ndarray::{Array2, ArrayView1, Axis};

use crate::error::NetworkError;

/// Mean squared error between predictions (n × output_dim) and scalar targets (n).
///
/// Each target is compared against every output column, so the mean is taken
/// over all n × output_dim residuals. An empty prediction set yields 0.0.
pub fn mean_squared_error(
    predictions: &Array2<f64>,
    targets: ArrayView1<f64>,
) -> Result<f64, NetworkError> {
    if predictions.nrows() != targets.len() {
        return Err(NetworkError::shape(
            "mean_squared_error targets",
            predictions.nrows(),
            targets.len(),
        ));
    }
    if predictions.is_empty() {
        return Ok(0.0);
    }

    let residuals = predictions - &targets.insert_axis(Axis(1));
    Ok(residuals.mapv(|r| r * r).sum() / residuals.len() as f64)
}
