//! Weight update rule
//!
//! The network is trained with plain batch gradient descent only. The step
//! rule lives here, apart from the backpropagation that produces the
//! accumulated weight steps, so the two can be tested independently.
//!
//! # Example
//!
//! ```ignore
//! use demand_net::optimizers::Sgd;
//!
//! let sgd = Sgd::new(0.1);
//!
//! // After accumulating the weight steps of a batch of n records:
//! sgd.apply(&mut weights_hidden_output, &delta_ho, n);
//! sgd.apply(&mut weights_input_hidden, &delta_ih, n);
//! ```

pub mod sgd;

pub use sgd::Sgd;
