//! Churn probability, binary decision and risk tier

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;
use crate::model::ProbabilisticClassifier;
use crate::{ChurnError, Result, RiskTier, ThresholdConfig};

/// Below this probability a customer is low risk
pub const LOW_THR: f64 = 0.30;
/// Above this probability a customer is high risk
pub const HIGH_THR: f64 = 0.70;
/// Churn is predicted at or above this probability
pub const DECISION_THR: f64 = 0.5;

/// Outcome of scoring one feature row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Positive-class probability, as produced by the model
    pub probability: f64,
    pub will_churn: bool,
    pub tier: RiskTier,
}

impl RiskAssessment {
    /// Derive decision and tier from a probability
    pub fn from_probability(probability: f64, thresholds: &ThresholdConfig) -> Self {
        RiskAssessment {
            probability,
            will_churn: probability >= thresholds.decision,
            tier: risk_tier(probability, thresholds),
        }
    }

    /// Decision as 0 (stays) or 1 (churns)
    pub fn decision(&self) -> u8 {
        u8::from(self.will_churn)
    }
}

/// Bucket a probability. Both boundaries belong to `Medium`.
pub fn risk_tier(probability: f64, thresholds: &ThresholdConfig) -> RiskTier {
    if probability < thresholds.low {
        RiskTier::Low
    } else if probability > thresholds.high {
        RiskTier::High
    } else {
        RiskTier::Medium
    }
}

/// Score a feature row with the default thresholds
pub fn classify<C: ProbabilisticClassifier + ?Sized>(
    features: &FeatureVector,
    classifier: &C,
) -> Result<RiskAssessment> {
    classify_with(features, classifier, &ThresholdConfig::default())
}

/// Score a feature row. The row width is checked before the model runs.
pub fn classify_with<C: ProbabilisticClassifier + ?Sized>(
    features: &FeatureVector,
    classifier: &C,
    thresholds: &ThresholdConfig,
) -> Result<RiskAssessment> {
    let expected = classifier.num_features();
    if features.len() != expected {
        return Err(ChurnError::FeatureShape {
            expected,
            actual: features.len(),
        });
    }

    let probability = classifier.predict_proba(features.as_slice())?.positive();
    Ok(RiskAssessment::from_probability(probability, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassProbabilities;

    /// Returns a fixed churn probability regardless of input
    struct FixedModel {
        width: usize,
        p: f64,
    }

    impl ProbabilisticClassifier for FixedModel {
        fn num_features(&self) -> usize {
            self.width
        }

        fn predict_proba(&self, _x: &[f32]) -> Result<ClassProbabilities> {
            Ok(ClassProbabilities::from_positive(self.p))
        }
    }

    fn tier(p: f64) -> RiskTier {
        risk_tier(p, &ThresholdConfig::default())
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier(0.30), RiskTier::Medium);
        assert_eq!(tier(0.70), RiskTier::Medium);
        assert_eq!(tier(0.2999), RiskTier::Low);
        assert_eq!(tier(0.7001), RiskTier::High);
        assert_eq!(tier(0.0), RiskTier::Low);
        assert_eq!(tier(1.0), RiskTier::High);
    }

    #[test]
    fn test_decision_independent_of_tier() {
        let a = RiskAssessment::from_probability(0.6, &ThresholdConfig::default());
        assert_eq!(a.decision(), 1);
        assert_eq!(a.tier, RiskTier::Medium);

        let a = RiskAssessment::from_probability(0.5, &ThresholdConfig::default());
        assert_eq!(a.decision(), 1);

        let a = RiskAssessment::from_probability(0.4999, &ThresholdConfig::default());
        assert_eq!(a.decision(), 0);
        assert_eq!(a.tier, RiskTier::Medium);
    }

    #[test]
    fn test_classify_high_risk() {
        let model = FixedModel { width: 4, p: 0.82 };
        let a = classify(&FeatureVector::zeros(4), &model).unwrap();
        assert_eq!(a.probability, 0.82);
        assert_eq!(a.decision(), 1);
        assert_eq!(a.tier, RiskTier::High);
    }

    #[test]
    fn test_probability_not_clamped() {
        let model = FixedModel { width: 1, p: 1.25 };
        let a = classify(&FeatureVector::zeros(1), &model).unwrap();
        assert_eq!(a.probability, 1.25);
        assert_eq!(a.tier, RiskTier::High);
    }

    #[test]
    fn test_shape_mismatch() {
        let model = FixedModel { width: 5, p: 0.1 };
        let err = classify(&FeatureVector::from_vec(vec![0.5; 4]), &model).unwrap_err();
        assert!(matches!(
            err,
            ChurnError::FeatureShape {
                expected: 5,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = ThresholdConfig {
            low: 0.2,
            high: 0.5,
            decision: 0.4,
        };
        let a = RiskAssessment::from_probability(0.45, &thresholds);
        assert_eq!(a.tier, RiskTier::Medium);
        assert!(a.will_churn);
        assert_eq!(risk_tier(0.51, &thresholds), RiskTier::High);
    }
}
