//! Customer churn prediction
//!
//! Encodes a customer profile against the feature schema of a pre-trained
//! classifier, scores churn probability, buckets it into a risk tier and
//! attaches retention recommendations.

pub mod features;
pub mod model;
pub mod predict;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Internet service type selected for the customer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InternetType {
    FiberOptic,
    Cable,
    Dsl,
    None,
    /// Any label outside the known set, carried verbatim
    Other(String),
}

impl InternetType {
    /// Label as it appears in the training data
    pub fn label(&self) -> &str {
        match self {
            InternetType::FiberOptic => "Fiber Optic",
            InternetType::Cable => "Cable",
            InternetType::Dsl => "DSL",
            InternetType::None => "None",
            InternetType::Other(label) => label,
        }
    }
}

impl From<String> for InternetType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Fiber Optic" => InternetType::FiberOptic,
            "Cable" => InternetType::Cable,
            "DSL" => InternetType::Dsl,
            "None" => InternetType::None,
            _ => InternetType::Other(label),
        }
    }
}

impl From<InternetType> for String {
    fn from(value: InternetType) -> Self {
        match value {
            InternetType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::str::FromStr for InternetType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(InternetType::from(s.to_string()))
    }
}

impl fmt::Display for InternetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contract term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Contract {
    MonthToMonth,
    OneYear,
    TwoYear,
    Other(String),
}

impl Contract {
    pub fn label(&self) -> &str {
        match self {
            Contract::MonthToMonth => "Month-to-Month",
            Contract::OneYear => "One Year",
            Contract::TwoYear => "Two Year",
            Contract::Other(label) => label,
        }
    }
}

impl From<String> for Contract {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Month-to-Month" => Contract::MonthToMonth,
            "One Year" => Contract::OneYear,
            "Two Year" => Contract::TwoYear,
            _ => Contract::Other(label),
        }
    }
}

impl From<Contract> for String {
    fn from(value: Contract) -> Self {
        match value {
            Contract::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::str::FromStr for Contract {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Contract::from(s.to_string()))
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Customer attributes submitted for a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Tenure in months
    pub tenure: u32,
    pub monthly_charge: f64,
    pub total_charges: f64,
    /// Average monthly long-distance charge
    pub avg_long_distance: f64,
    pub num_referrals: u32,
    /// Satisfaction score on a 1-5 scale
    pub satisfaction: u8,
    pub internet_type: InternetType,
    pub contract: Contract,
}

impl Default for CustomerProfile {
    fn default() -> Self {
        CustomerProfile {
            tenure: 1,
            monthly_charge: 85.0,
            total_charges: 85.0,
            avg_long_distance: 22.0,
            num_referrals: 0,
            satisfaction: 1,
            internet_type: InternetType::FiberOptic,
            contract: Contract::MonthToMonth,
        }
    }
}

impl CustomerProfile {
    pub const MIN_SATISFACTION: u8 = 1;
    pub const MAX_SATISFACTION: u8 = 5;
    pub const MAX_TENURE: u32 = 120;

    /// Check the documented input ranges
    pub fn validate(&self) -> Result<()> {
        if self.tenure > Self::MAX_TENURE {
            return Err(ChurnError::InvalidInput {
                field: "tenure",
                message: format!(
                    "must be at most {} months, got {}",
                    Self::MAX_TENURE,
                    self.tenure
                ),
            });
        }

        if !(Self::MIN_SATISFACTION..=Self::MAX_SATISFACTION).contains(&self.satisfaction) {
            return Err(ChurnError::InvalidInput {
                field: "satisfaction",
                message: format!(
                    "must be between {} and {}, got {}",
                    Self::MIN_SATISFACTION,
                    Self::MAX_SATISFACTION,
                    self.satisfaction
                ),
            });
        }

        let charges = [
            ("monthly_charge", self.monthly_charge),
            ("total_charges", self.total_charges),
            ("avg_long_distance", self.avg_long_distance),
        ];
        for (field, value) in charges {
            if !value.is_finite() || value < 0.0 {
                return Err(ChurnError::InvalidInput {
                    field,
                    message: format!("must be a non-negative amount, got {}", value),
                });
            }
        }

        Ok(())
    }

    /// Load a profile from a JSON file
    pub fn from_json_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ChurnError::file(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| ChurnError::Parse(format!("Invalid profile {}: {}", path, e)))
    }
}

/// Churn risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Medium => write!(f, "Medium"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum ChurnError {
    #[error("Failed to load model from {path}: {message}")]
    ModelLoad { path: String, message: String },

    #[error("Feature vector has {actual} entries, model expects {expected}")]
    FeatureShape { expected: usize, actual: usize },

    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Failed to access {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ChurnError {
    /// IO failure tagged with the file it concerns
    pub fn file(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        ChurnError::File {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChurnError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub artifact_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Probabilities strictly below this are low risk
    pub low: f64,
    /// Probabilities strictly above this are high risk
    pub high: f64,
    /// Probability at or above which churn is predicted
    pub decision: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        ThresholdConfig {
            low: predict::risk::LOW_THR,
            high: predict::risk::HIGH_THR,
            decision: predict::risk::DECISION_THR,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model: ModelConfig {
                artifact_path: "model/churn_model.json".to_string(),
            },
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChurnError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ChurnError::Config(format!("Failed to parse config {}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChurnError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| ChurnError::file(path, e))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !(in_unit(t.low) && in_unit(t.high) && in_unit(t.decision)) || t.low > t.high {
            return Err(ChurnError::Config(format!(
                "Thresholds must lie in [0, 1] with low <= high (low={}, high={}, decision={})",
                t.low, t.high, t.decision
            )));
        }
        Ok(())
    }
}
