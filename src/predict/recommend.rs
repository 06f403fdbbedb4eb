//! Retention recommendations per risk tier

use crate::{CustomerProfile, RiskTier};

const HIGH_RISK: [&str; 3] = [
    "High-risk customer: immediate retention actions recommended.",
    "Offer a strong incentive (e.g., 15–20% discount + free upgrade) for 1-year commitment.",
    "Have an agent contact the customer within 24–48 hours.",
];

const MEDIUM_RISK: [&str; 2] = [
    "Moderate churn risk: proactive engagement recommended.",
    "Send a personalized offer (small discount or loyalty points) and survey about service quality.",
];

const LOW_RISK: [&str; 2] = [
    "Low churn risk: keep customer engaged with regular loyalty rewards.",
    "Promote cross-sell/upsell opportunities based on usage.",
];

pub const LOW_SATISFACTION: &str =
    "Customer satisfaction is low (1–2/5): prioritize service quality review and support follow-up.";

/// Satisfaction scores at or below this get the follow-up advisory
pub const LOW_SATISFACTION_MAX: u8 = 2;

/// Tier advice first, then the satisfaction follow-up if it applies
pub fn recommend(tier: RiskTier, profile: &CustomerProfile) -> Vec<String> {
    let tier_recs: &[&str] = match tier {
        RiskTier::High => &HIGH_RISK,
        RiskTier::Medium => &MEDIUM_RISK,
        RiskTier::Low => &LOW_RISK,
    };

    let mut recs: Vec<String> = tier_recs.iter().map(|r| r.to_string()).collect();
    if profile.satisfaction <= LOW_SATISFACTION_MAX {
        recs.push(LOW_SATISFACTION.to_string());
    }
    recs
}
