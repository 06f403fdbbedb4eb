//! Churn classifier loaded from the model artifact

use serde::{Deserialize, Serialize};
use std::fmt;

use super::logistic::LogisticModel;
use super::trees::TreeEnsemble;
use crate::{ChurnError, Result};

/// Per-class probabilities for one row: `[no churn, churn]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities(pub [f64; 2]);

impl ClassProbabilities {
    pub fn from_positive(p: f64) -> Self {
        ClassProbabilities([1.0 - p, p])
    }

    /// Probability of the churn class
    pub fn positive(&self) -> f64 {
        self.0[1]
    }
}

/// Anything that scores a feature row of fixed width
pub trait ProbabilisticClassifier {
    /// Input width the model was trained on
    fn num_features(&self) -> usize;

    /// Class probabilities for a row of exactly `num_features()` values
    fn predict_proba(&self, x: &[f32]) -> Result<ClassProbabilities>;
}

/// Supported classifier kinds, tagged by `type` in the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Classifier {
    GradientBoostedTrees(TreeEnsemble),
    Logistic(LogisticModel),
}

impl Classifier {
    pub fn kind(&self) -> ClassifierKind {
        match self {
            Classifier::GradientBoostedTrees(_) => ClassifierKind::GradientBoostedTrees,
            Classifier::Logistic(_) => ClassifierKind::Logistic,
        }
    }

    /// Structural checks beyond what deserialization guarantees
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Classifier::GradientBoostedTrees(model) => model.validate(),
            Classifier::Logistic(_) => Ok(()),
        }
    }
}

impl ProbabilisticClassifier for Classifier {
    fn num_features(&self) -> usize {
        match self {
            Classifier::GradientBoostedTrees(model) => model.num_features,
            Classifier::Logistic(model) => model.num_features(),
        }
    }

    fn predict_proba(&self, x: &[f32]) -> Result<ClassProbabilities> {
        let expected = self.num_features();
        if x.len() != expected {
            return Err(ChurnError::FeatureShape {
                expected,
                actual: x.len(),
            });
        }

        let p = match self {
            Classifier::GradientBoostedTrees(model) => model.predict(x).ok_or_else(|| {
                ChurnError::InvalidModel("tree references a node or feature out of range".into())
            })?,
            Classifier::Logistic(model) => model.predict(x),
        };
        Ok(ClassProbabilities::from_positive(p))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    GradientBoostedTrees,
    Logistic,
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierKind::GradientBoostedTrees => write!(f, "Gradient-boosted trees"),
            ClassifierKind::Logistic => write!(f, "Logistic regression"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::trees::{RegressionTree, TreeNode};

    #[test]
    fn test_wrong_width_rejected() {
        let clf = Classifier::Logistic(LogisticModel {
            weights: vec![1.0, 1.0, 1.0],
            bias: 0.0,
        });
        assert!(matches!(
            clf.predict_proba(&[1.0, 2.0]),
            Err(ChurnError::FeatureShape {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_deserialized_bad_tree_is_an_error() {
        // Deserialized directly, without going through ModelBundle validation
        let json = r#"{
            "type": "gradient_boosted_trees",
            "num_features": 2,
            "trees": [{"nodes": [{"feature": 0, "threshold": 1.0, "left": 4, "right": 5}]}]
        }"#;
        let clf: Classifier = serde_json::from_str(json).unwrap();
        assert!(clf.validate().is_err());
        assert!(matches!(
            clf.predict_proba(&[0.0, 0.0]),
            Err(ChurnError::InvalidModel(_))
        ));

        let clf = Classifier::GradientBoostedTrees(TreeEnsemble {
            num_features: 1,
            base_margin: 0.0,
            trees: vec![RegressionTree {
                nodes: vec![TreeNode::Leaf { leaf: 0.0 }],
            }],
        });
        assert_eq!(clf.predict_proba(&[3.0]).unwrap().positive(), 0.5);
    }

    #[test]
    fn test_tagged_json() {
        let json = r#"{"type": "logistic", "weights": [0.0, 0.0], "bias": 0.0}"#;
        let clf: Classifier = serde_json::from_str(json).unwrap();
        assert_eq!(clf.kind(), ClassifierKind::Logistic);
        assert_eq!(clf.num_features(), 2);

        let json = r#"{
            "type": "gradient_boosted_trees",
            "num_features": 4,
            "trees": [{"nodes": [{"leaf": 0.0}]}]
        }"#;
        let clf: Classifier = serde_json::from_str(json).unwrap();
        assert_eq!(clf.kind(), ClassifierKind::GradientBoostedTrees);
        assert_eq!(clf.num_features(), 4);
        assert!(clf.validate().is_ok());
    }

    #[test]
    fn test_class_probabilities_sum_to_one() {
        let clf = Classifier::Logistic(LogisticModel {
            weights: vec![1.0, 1.0],
            bias: -1.0,
        });
        let probs = clf.predict_proba(&[0.5, 1.5]).unwrap();
        assert!((probs.0[0] + probs.0[1] - 1.0).abs() < 1e-9);
        assert!(probs.positive() > 0.5);
    }
}
