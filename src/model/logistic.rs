//! Logistic regression scored on burn tensors
//!
//! Architecture: Input(N) → Linear(N, 1) → sigmoid

use burn::backend::NdArray;
use burn::tensor::activation::sigmoid;
use burn::tensor::Tensor;
use serde::{Deserialize, Serialize};

type InferenceBackend = NdArray<f32>;

/// Linear model over the full feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    /// One coefficient per schema slot
    pub weights: Vec<f32>,
    #[serde(default)]
    pub bias: f32,
}

impl LogisticModel {
    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    /// Positive-class probability for a single row
    ///
    /// # Arguments
    /// * `x` - Feature row, same length as `weights`
    pub fn predict(&self, x: &[f32]) -> f64 {
        let device = Default::default();
        let n = self.weights.len();

        let row = Tensor::<InferenceBackend, 1>::from_floats(x, &device).reshape([1, n]);
        let weights =
            Tensor::<InferenceBackend, 1>::from_floats(self.weights.as_slice(), &device)
                .reshape([n, 1]);

        let logit = row.matmul(weights).add_scalar(self.bias);
        let prob: f32 = sigmoid(logit).into_scalar();
        prob as f64
    }
}
