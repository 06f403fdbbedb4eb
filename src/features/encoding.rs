//! One-hot and numeric placement of a customer profile into the model's
//! feature space
//!
//! Fields whose feature name is missing from the schema are skipped. For
//! categorical fields this leaves every one-hot slot at zero, which the model
//! reads as its reference category.

use super::FeatureSchema;
use crate::CustomerProfile;

pub const TENURE: &str = "Tenure in Months";
pub const MONTHLY_CHARGE: &str = "Monthly Charge";
pub const TOTAL_CHARGES: &str = "Total Charges";
pub const AVG_LONG_DISTANCE: &str = "Avg Monthly Long Distance Charges";
pub const NUM_REFERRALS: &str = "Number of Referrals";
pub const SATISFACTION: &str = "Satisfaction Score";

pub const INTERNET_TYPE: &str = "Internet Type";
pub const CONTRACT: &str = "Contract";

/// Dense feature row aligned to a [`FeatureSchema`]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// Zero-filled vector with one slot per feature
    pub fn zeros(len: usize) -> Self {
        FeatureVector {
            values: vec![0.0; len],
        }
    }

    pub fn from_vec(values: Vec<f32>) -> Self {
        FeatureVector { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Number of populated slots
    pub fn non_zero_count(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }

    fn set(&mut self, schema: &FeatureSchema, name: &str, value: f32) {
        if let Some(slot) = schema.position(name) {
            self.values[slot] = value;
        }
    }
}

/// Composite one-hot feature name, e.g. `Contract_One Year`
pub fn one_hot_name(category: &str, value: &str) -> String {
    format!("{}_{}", category, value)
}

/// Encode a profile into a feature row for `schema`
pub fn encode(profile: &CustomerProfile, schema: &FeatureSchema) -> FeatureVector {
    let mut x = FeatureVector::zeros(schema.len());

    x.set(schema, TENURE, profile.tenure as f32);
    x.set(schema, MONTHLY_CHARGE, profile.monthly_charge as f32);
    x.set(schema, TOTAL_CHARGES, profile.total_charges as f32);
    x.set(schema, AVG_LONG_DISTANCE, profile.avg_long_distance as f32);
    x.set(schema, NUM_REFERRALS, profile.num_referrals as f32);
    x.set(schema, SATISFACTION, profile.satisfaction as f32);

    x.set(
        schema,
        &one_hot_name(INTERNET_TYPE, profile.internet_type.label()),
        1.0,
    );
    x.set(schema, &one_hot_name(CONTRACT, profile.contract.label()), 1.0);

    x
}
