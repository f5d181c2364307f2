//! Inference over the trained registry.
//!
//! `predict` is a no-throw boundary: every failure inside the pipeline is
//! absorbed and converted into a valid, safe risk bundle. Callers always get
//! six conditions with values in their documented ranges.

use std::collections::BTreeMap;

use tracing::{debug, error};

use crate::data::errors::DataResult;
use crate::data::FeatureVector;
use crate::model::fallback::FallbackGenerator;
use crate::model::registry::{ConditionModel, ModelRegistry};
use crate::model::schema::FeatureSchema;
use crate::model::{round_pct, Condition, PredictionResult, RiskBundle, RiskTier};

/// Base confidence when no recognized features are supplied.
const CONFIDENCE_FLOOR: f64 = 60.0;
/// Additional confidence available from full input coverage.
const CONFIDENCE_SPAN: f64 = 35.0;
/// Confidence is capped below certainty regardless of input completeness.
const CONFIDENCE_CAP: f64 = 95.0;

/// Stateless per-request scoring against an immutable registry.
pub struct InferenceEngine {
    registry: ModelRegistry,
    fallback: FallbackGenerator,
}

impl InferenceEngine {
    pub fn new(registry: ModelRegistry, fallback: FallbackGenerator) -> Self {
        Self { registry, fallback }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Score a partial feature vector against all six conditions.
    ///
    /// Never fails: conditions without a trained model fall back per
    /// condition, and any unhandled computation error yields the uniform
    /// safety-net bundle rather than a partial result.
    pub fn predict(&self, input: &FeatureVector) -> RiskBundle {
        match self.predict_checked(input) {
            Ok(bundle) => bundle,
            Err(e) => {
                error!("Error making predictions: {e}, returning safe bundle");
                self.fallback.safe_bundle()
            }
        }
    }

    fn predict_checked(&self, input: &FeatureVector) -> DataResult<RiskBundle> {
        let row = FeatureSchema::complete_row(input);
        let confidence = confidence_for(FeatureSchema::present_count(input));

        let mut conditions = BTreeMap::new();
        for condition in Condition::ALL {
            let result = match self.registry.get(condition) {
                ConditionModel::Trained(model) => {
                    let scored = model.score(&row)?;
                    debug!(
                        "{condition}: probability {:.3}, class {}",
                        scored.probability, scored.predicted_class
                    );
                    PredictionResult {
                        probability: round_pct(scored.probability * 100.0),
                        risk_level: RiskTier::from_probability(scored.probability),
                        confidence,
                    }
                }
                ConditionModel::Absent => self.fallback.condition_fallback(),
            };
            conditions.insert(condition, result);
        }

        Ok(RiskBundle::from_map(conditions))
    }
}

/// Confidence from input completeness: how many of the schema's features the
/// caller actually supplied. A deliberate proxy, not model calibration.
pub fn confidence_for(present: usize) -> f64 {
    let fraction = present as f64 / FeatureSchema::LEN as f64;
    round_pct((CONFIDENCE_FLOOR + fraction * CONFIDENCE_SPAN).min(CONFIDENCE_CAP))
}
