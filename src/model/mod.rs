//! Multi-target prediction pipeline: per-condition training, feature
//! normalization, inference with confidence scoring, and fallbacks for
//! degraded operation.

pub mod fallback;
pub mod forest;
pub mod inference;
pub mod registry;
pub mod scaler;
pub mod schema;
pub mod trainer;

// Re-export commonly used types
pub use fallback::FallbackGenerator;
pub use forest::{ForestConfig, RandomForest};
pub use inference::InferenceEngine;
pub use registry::{ConditionModel, ModelRegistry, TrainedConditionModel};
pub use scaler::StandardScaler;
pub use schema::FeatureSchema;
pub use trainer::{train_registry, TrainingOptions};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The six heart conditions tracked independently by the pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    CoronaryArteryDisease,
    Arrhythmia,
    HeartFailure,
    ValveDisease,
    Cardiomyopathy,
    Hypertension,
}

impl Condition {
    /// Fixed iteration order used by the registry and the risk bundle.
    pub const ALL: [Condition; 6] = [
        Condition::CoronaryArteryDisease,
        Condition::Arrhythmia,
        Condition::HeartFailure,
        Condition::ValveDisease,
        Condition::Cardiomyopathy,
        Condition::Hypertension,
    ];

    /// Stable identifier, also the label column name in the training dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::CoronaryArteryDisease => "coronary_artery_disease",
            Condition::Arrhythmia => "arrhythmia",
            Condition::HeartFailure => "heart_failure",
            Condition::ValveDisease => "valve_disease",
            Condition::Cardiomyopathy => "cardiomyopathy",
            Condition::Hypertension => "hypertension",
        }
    }

    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::CoronaryArteryDisease => "Coronary Artery Disease (CAD)",
            Condition::Arrhythmia => "Heart Arrhythmia",
            Condition::HeartFailure => "Heart Failure",
            Condition::ValveDisease => "Heart Valve Disease",
            Condition::Cardiomyopathy => "Cardiomyopathy",
            Condition::Hypertension => "Hypertension (High Blood Pressure)",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown condition: {s}"))
    }
}

/// Discretized probability band used for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Map a positive-class probability (0.0..=1.0) to a tier.
    ///
    /// Boundaries are closed on the upper side: exactly 0.30 is Moderate,
    /// exactly 0.70 is High.
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.30 {
            RiskTier::Low
        } else if probability < 0.70 {
            RiskTier::Moderate
        } else {
            RiskTier::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk estimate for one condition.
///
/// `probability` and `confidence` are percentages in 0..=100, rounded to one
/// decimal place. Confidence reflects input completeness, not model
/// calibration certainty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probability: f64,
    pub risk_level: RiskTier,
    pub confidence: f64,
}

/// Risk estimates for all six conditions. The sole output of the inference
/// engine; every condition key is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBundle {
    #[serde(flatten)]
    conditions: BTreeMap<Condition, PredictionResult>,
}

impl RiskBundle {
    pub(crate) fn from_map(conditions: BTreeMap<Condition, PredictionResult>) -> Self {
        debug_assert_eq!(conditions.len(), Condition::ALL.len());
        Self { conditions }
    }

    pub fn get(&self, condition: Condition) -> Option<&PredictionResult> {
        self.conditions.get(&condition)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Condition, &PredictionResult)> {
        self.conditions.iter().map(|(c, r)| (*c, r))
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Round a percentage to one decimal place for reporting.
pub(crate) fn round_pct(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_identifiers_are_stable() {
        let ids: Vec<&str> = Condition::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "coronary_artery_disease",
                "arrhythmia",
                "heart_failure",
                "valve_disease",
                "cardiomyopathy",
                "hypertension",
            ]
        );
    }

    #[test]
    fn test_condition_round_trips_through_from_str() {
        for condition in Condition::ALL {
            let parsed: Condition = condition.as_str().parse().expect("known identifier");
            assert_eq!(parsed, condition);
        }
        assert!("angina".parse::<Condition>().is_err());
    }

    #[test]
    fn test_risk_tier_boundaries() {
        assert_eq!(RiskTier::from_probability(0.299), RiskTier::Low);
        assert_eq!(RiskTier::from_probability(0.30), RiskTier::Moderate);
        assert_eq!(RiskTier::from_probability(0.699), RiskTier::Moderate);
        assert_eq!(RiskTier::from_probability(0.70), RiskTier::High);
        assert_eq!(RiskTier::from_probability(0.0), RiskTier::Low);
        assert_eq!(RiskTier::from_probability(1.0), RiskTier::High);
    }

    #[test]
    fn test_risk_tier_serializes_as_display_string() {
        let json = serde_json::to_string(&RiskTier::Moderate).expect("serialize");
        assert_eq!(json, "\"Moderate\"");
    }

    #[test]
    fn test_round_pct() {
        assert_eq!(round_pct(65.6000000001), 65.6);
        assert_eq!(round_pct(10.04), 10.0);
        assert_eq!(round_pct(10.05), 10.1);
    }
}
