//! Prediction and inference
//!
//! Score encoded customers, bucket the risk and attach recommendations.

pub mod inference;
pub mod recommend;
pub mod risk;

pub use inference::{format_report, ChurnPredictor, PredictionReport};
pub use recommend::recommend;
pub use risk::{classify, RiskAssessment};
