//! End-to-end churn prediction for one customer

use serde::{Serialize, Serializer};

use super::recommend::recommend;
use super::risk::{classify_with, RiskAssessment};
use crate::features::encode;
use crate::model::{ModelBundle, ModelStore};
use crate::{CustomerProfile, Result, RiskTier, ThresholdConfig};

/// Everything shown to the user after a prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    /// Populated feature slots, a sanity check on the encoding
    pub non_zero_features: usize,
    /// 0 = no churn, 1 = churn
    pub decision: u8,
    #[serde(serialize_with = "four_decimals")]
    pub probability: f64,
    pub risk_tier: RiskTier,
    pub recommendations: Vec<String>,
}

impl PredictionReport {
    /// Fill fraction for a progress bar. Out-of-range probabilities render empty.
    pub fn progress(&self) -> f64 {
        if (0.0..=1.0).contains(&self.probability) {
            self.probability
        } else {
            0.0
        }
    }
}

fn four_decimals<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10_000.0).round() / 10_000.0)
}

/// Runs the encode → classify → recommend pipeline over a loaded model
pub struct ChurnPredictor<'a> {
    bundle: &'a ModelBundle,
    thresholds: ThresholdConfig,
}

impl<'a> ChurnPredictor<'a> {
    pub fn new(bundle: &'a ModelBundle, thresholds: ThresholdConfig) -> Self {
        ChurnPredictor { bundle, thresholds }
    }

    /// Load (or reuse) the store's model
    pub fn from_store(store: &'a ModelStore, thresholds: ThresholdConfig) -> Result<Self> {
        Ok(Self::new(store.load()?, thresholds))
    }

    /// Predict churn for a single customer
    pub fn predict(&self, profile: &CustomerProfile) -> Result<PredictionReport> {
        profile.validate()?;

        let features = encode(profile, &self.bundle.schema);
        let non_zero_features = features.non_zero_count();
        log::debug!(
            "Encoded {} of {} features as non-zero",
            non_zero_features,
            features.len()
        );

        let assessment = classify_with(&features, &self.bundle.classifier, &self.thresholds)?;
        log::debug!(
            "Churn probability {:.4} → decision {}, {} risk",
            assessment.probability,
            assessment.decision(),
            assessment.tier
        );

        Ok(self.report(profile, non_zero_features, assessment))
    }

    fn report(
        &self,
        profile: &CustomerProfile,
        non_zero_features: usize,
        assessment: RiskAssessment,
    ) -> PredictionReport {
        PredictionReport {
            non_zero_features,
            decision: assessment.decision(),
            probability: assessment.probability,
            risk_tier: assessment.tier,
            recommendations: recommend(assessment.tier, profile),
        }
    }
}

const BAR_WIDTH: usize = 30;

/// Format a report for terminal display
pub fn format_report(report: &PredictionReport) -> String {
    let filled = (report.progress() * BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled.min(BAR_WIDTH)),
        "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
    );

    let mut out = format!(
        r#"
┌─────────────────────────────────────────────────┐
│  Prediction Results
├─────────────────────────────────────────────────┤
│  Non-zero features:  {}
│  Prediction:         {} (0 = No churn, 1 = Churn)
│  Churn probability:  {:.4}
│  Risk level:         {}
│  [{}]
├─────────────────────────────────────────────────┤
│  Business Recommendations
"#,
        report.non_zero_features, report.decision, report.probability, report.risk_tier, bar
    );
    for rec in &report.recommendations {
        out.push_str(&format!("│  - {}\n", rec));
    }
    out.push_str("└─────────────────────────────────────────────────┘\n");
    out
}
