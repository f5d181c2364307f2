//! Immutable per-condition model registry.

use std::collections::HashMap;

use crate::data::errors::DataResult;
use crate::model::forest::RandomForest;
use crate::model::scaler::StandardScaler;
use crate::model::Condition;

/// Scored output of a trained model for one row. The hard class is computed
/// alongside the probability and kept as an audit field; tiering uses the
/// probability alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPrediction {
    pub probability: f64,
    pub predicted_class: u8,
}

/// Fitted scaler and classifier for exactly one condition. Created once at
/// startup and never mutated; replacing it means building a new registry.
#[derive(Debug, Clone)]
pub struct TrainedConditionModel {
    scaler: StandardScaler,
    forest: RandomForest,
    accuracy: f64,
}

impl TrainedConditionModel {
    pub fn new(scaler: StandardScaler, forest: RandomForest, accuracy: f64) -> Self {
        Self {
            scaler,
            forest,
            accuracy,
        }
    }

    /// Held-out accuracy recorded at training time, for observability only.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Scale a complete feature row and score it.
    pub fn score(&self, row: &[f64]) -> DataResult<ScoredPrediction> {
        let scaled = self.scaler.transform_row(row)?;
        Ok(ScoredPrediction {
            probability: self.forest.predict_proba(&scaled),
            predicted_class: self.forest.predict(&scaled),
        })
    }
}

/// Registry slot for one condition: either a trained model or an explicit
/// absence marker, so dispatch at inference time is exhaustive.
#[derive(Debug, Clone)]
pub enum ConditionModel {
    Trained(TrainedConditionModel),
    Absent,
}

impl ConditionModel {
    pub fn is_trained(&self) -> bool {
        matches!(self, ConditionModel::Trained(_))
    }
}

/// Mapping from each condition to its model slot. Built exactly once per
/// process lifetime and read-only during inference; share it by reference
/// rather than through ambient global state.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: HashMap<Condition, ConditionModel>,
}

impl ModelRegistry {
    /// Build a registry from trained slots; conditions without an entry are
    /// marked absent so every lookup is total.
    pub fn new(mut models: HashMap<Condition, ConditionModel>) -> Self {
        for condition in Condition::ALL {
            models.entry(condition).or_insert(ConditionModel::Absent);
        }
        Self { models }
    }

    /// Registry with every condition marked absent, the degraded mode used
    /// when no training data is available.
    pub fn all_absent() -> Self {
        Self::new(HashMap::new())
    }

    pub fn get(&self, condition: Condition) -> &ConditionModel {
        // new() guarantees a slot for every condition
        self.models
            .get(&condition)
            .unwrap_or(&ConditionModel::Absent)
    }

    /// Number of conditions with a trained model.
    pub fn trained_count(&self) -> usize {
        self.models.values().filter(|m| m.is_trained()).count()
    }
}
