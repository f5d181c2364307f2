//! Synthetic predictions for degraded operation.

use std::collections::BTreeMap;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{Condition, PredictionResult, RiskBundle, RiskTier};

/// Confidence attached to every fallback prediction, the caller's signal
/// that the value is synthetic rather than model-derived.
pub const FALLBACK_CONFIDENCE: f64 = 50.0;

/// Probability reported for every condition when the whole pipeline fails.
pub const SAFE_PROBABILITY: f64 = 10.0;

/// Produces bounded low-risk predictions when no trained model is available.
///
/// The pseudo-random source is injected at construction and seeded, so tests
/// can fix the seed and assert exact bounds.
#[derive(Debug)]
pub struct FallbackGenerator {
    rng: Mutex<StdRng>,
}

impl FallbackGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Synthetic prediction for a single condition with no trained model:
    /// probability in [0, 50) percent, tier Low below 30 else Moderate,
    /// fixed confidence.
    pub fn condition_fallback(&self) -> PredictionResult {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let drawn: f64 = rng.random_range(0.0..50.0);
        // Truncate instead of rounding so the value stays below 50
        let probability = (drawn * 10.0).floor() / 10.0;
        let risk_level = if probability < 30.0 {
            RiskTier::Low
        } else {
            RiskTier::Moderate
        };
        PredictionResult {
            probability,
            risk_level,
            confidence: FALLBACK_CONFIDENCE,
        }
    }

    /// Last-resort bundle returned on any unhandled inference failure: every
    /// condition uniformly low-risk.
    pub fn safe_bundle(&self) -> RiskBundle {
        let mut conditions = BTreeMap::new();
        for condition in Condition::ALL {
            conditions.insert(
                condition,
                PredictionResult {
                    probability: SAFE_PROBABILITY,
                    risk_level: RiskTier::Low,
                    confidence: FALLBACK_CONFIDENCE,
                },
            );
        }
        RiskBundle::from_map(conditions)
    }
}
