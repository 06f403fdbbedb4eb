//! Pre-trained churn classifiers
//!
//! - Trees: gradient-boosted ensemble with a logistic link
//! - Logistic: linear baseline evaluated on burn tensors
//! - Store: one-time artifact loading

pub mod classifier;
pub mod logistic;
pub mod store;
pub mod trees;

pub use classifier::{ClassProbabilities, Classifier, ClassifierKind, ProbabilisticClassifier};
pub use logistic::LogisticModel;
pub use store::{ModelBundle, ModelStore};
pub use trees::TreeEnsemble;

/// Logistic link
pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
