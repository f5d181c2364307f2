//! Integration tests for the multi-condition prediction pipeline
//! End-to-end coverage: training, inference, confidence scoring, and
//! degraded-mode behavior against a synthetic patient dataset.

use heartrisk::data::dataset::{PatientRecord, TrainingDataset};
use heartrisk::data::FeatureVector;
use heartrisk::model::trainer::{self, TrainingOptions};
use heartrisk::model::{
    Condition, FallbackGenerator, FeatureSchema, ForestConfig, InferenceEngine, ModelRegistry,
    RiskTier,
};

/// Build a cleanly separable dataset: even rows are high-risk profiles
/// positive for every condition, odd rows are low-risk and negative.
fn synthetic_dataset(n: usize) -> TrainingDataset {
    let names = FeatureSchema::names();
    let rows = (0..n)
        .map(|i| {
            let risky = i % 2 == 0;
            // Jitter varies within each class but not with the label, so
            // only the driven features carry signal
            let jitter = ((i / 2) % 6) as f64;

            let mut features = Vec::with_capacity(FeatureSchema::LEN);
            for name in names {
                let value = match name {
                    "age" => if risky { 66.0 + jitter } else { 32.0 + jitter },
                    "trestbps" => if risky { 150.0 + jitter } else { 112.0 + jitter },
                    "chol" => if risky { 280.0 + jitter } else { 185.0 + jitter },
                    "thalach" => if risky { 110.0 - jitter } else { 175.0 - jitter },
                    "bmi" => if risky { 33.0 } else { 22.0 },
                    "smoking" => if risky { 1.0 } else { 0.0 },
                    "stress_level" => if risky { 8.0 } else { 3.0 },
                    "physical_activity" => if risky { 1.0 } else { 7.0 },
                    _ => FeatureSchema::default_for(name).unwrap_or(0.0) + jitter * 0.1,
                };
                features.push(Some(value));
            }

            PatientRecord {
                features,
                labels: [u8::from(risky); 6],
            }
        })
        .collect();
    TrainingDataset::new(rows)
}

fn fast_options() -> TrainingOptions {
    TrainingOptions {
        forest: ForestConfig {
            n_trees: 15,
            max_depth: 6,
            min_samples_split: 2,
            seed: 42,
        },
        test_fraction: 0.2,
        split_seed: 42,
    }
}

fn trained_engine() -> InferenceEngine {
    let dataset = synthetic_dataset(80);
    let registry = trainer::train_registry(Some(&dataset), &fast_options());
    assert_eq!(
        registry.trained_count(),
        6,
        "all six conditions should train on the synthetic dataset"
    );
    InferenceEngine::new(registry, FallbackGenerator::new(42))
}

fn degraded_engine() -> InferenceEngine {
    InferenceEngine::new(ModelRegistry::all_absent(), FallbackGenerator::new(42))
}

fn vector(pairs: &[(&str, f64)]) -> FeatureVector {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

#[test]
fn test_empty_input_yields_complete_bundle() {
    let engine = trained_engine();
    let bundle = engine.predict(&FeatureVector::new());

    assert_eq!(bundle.len(), 6);
    for condition in Condition::ALL {
        let result = bundle.get(condition).expect("every condition present");
        assert!((0.0..=100.0).contains(&result.probability));
        assert!((0.0..=100.0).contains(&result.confidence));
    }
}

#[test]
fn test_confidence_never_decreases_with_more_inputs() {
    let engine = trained_engine();

    let partials: Vec<FeatureVector> = vec![
        vector(&[]),
        vector(&[("age", 61.0), ("bmi", 27.0)]),
        vector(&[
            ("age", 61.0),
            ("bmi", 27.0),
            ("smoking", 0.0),
            ("chol", 210.0),
            ("trestbps", 128.0),
        ]),
        FeatureSchema::names()
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    FeatureSchema::default_for(name).unwrap_or(0.0),
                )
            })
            .collect(),
    ];

    let mut last = 0.0;
    for input in &partials {
        let bundle = engine.predict(input);
        for (_, result) in bundle.iter() {
            assert!(
                result.confidence >= last,
                "confidence dropped from {last} with more inputs"
            );
            assert!(result.confidence <= 95.0);
        }
        let first = bundle
            .get(Condition::CoronaryArteryDisease)
            .expect("present");
        last = first.confidence;
    }

    // Full coverage hits the cap exactly
    let full = engine.predict(&partials[3]);
    for (_, result) in full.iter() {
        assert_eq!(result.confidence, 95.0);
    }
}

#[test]
fn test_predict_is_idempotent_for_identical_input() {
    let engine = trained_engine();
    let input = vector(&[("age", 70.0), ("bmi", 32.0), ("smoking", 1.0)]);

    let first = engine.predict(&input);
    let second = engine.predict(&input);
    assert_eq!(first, second);
}

#[test]
fn test_zero_trained_models_degrades_to_fallback() {
    let engine = degraded_engine();
    let bundle = engine.predict(&vector(&[("age", 55.0)]));

    assert_eq!(bundle.len(), 6);
    for (_, result) in bundle.iter() {
        assert!(result.probability < 50.0);
        assert_eq!(result.confidence, 50.0);
        assert_ne!(result.risk_level, RiskTier::High);
    }
}

#[test]
fn test_trainer_and_inference_share_the_schema() {
    let trainer_columns: std::collections::HashSet<&str> =
        trainer::training_feature_names().into_iter().collect();
    let imputation_keys: std::collections::HashSet<&str> =
        FeatureSchema::names().into_iter().collect();
    assert_eq!(trainer_columns, imputation_keys);
}

#[test]
fn test_end_to_end_four_of_25_features() {
    let engine = trained_engine();
    let input = vector(&[
        ("age", 70.0),
        ("bmi", 32.0),
        ("smoking", 1.0),
        ("stress_level", 8.0),
    ]);

    let bundle = engine.predict(&input);
    assert_eq!(bundle.len(), 6);
    for (_, result) in bundle.iter() {
        // 60 + (4/25) * 35 = 65.6 for every trained condition
        assert_eq!(result.confidence, 65.6);
        // Tier follows the computed probability alone
        assert_eq!(
            result.risk_level,
            RiskTier::from_probability(result.probability / 100.0)
        );
    }
}

#[test]
fn test_unknown_keys_do_not_affect_confidence() {
    let engine = trained_engine();
    let mut input = vector(&[
        ("age", 70.0),
        ("bmi", 32.0),
        ("smoking", 1.0),
        ("stress_level", 8.0),
    ]);
    input.insert("shoe_size".to_string(), 44.0);
    input.insert("favorite_color".to_string(), 2.0);

    let bundle = engine.predict(&input);
    for (_, result) in bundle.iter() {
        assert_eq!(result.confidence, 65.6);
    }
}

#[test]
fn test_risk_separates_high_and_low_profiles() {
    let engine = trained_engine();

    let risky = vector(&[
        ("age", 70.0),
        ("trestbps", 155.0),
        ("chol", 290.0),
        ("thalach", 105.0),
        ("bmi", 34.0),
        ("smoking", 1.0),
        ("stress_level", 9.0),
        ("physical_activity", 1.0),
    ]);
    let healthy = vector(&[
        ("age", 30.0),
        ("trestbps", 110.0),
        ("chol", 180.0),
        ("thalach", 180.0),
        ("bmi", 21.0),
        ("smoking", 0.0),
        ("stress_level", 2.0),
        ("physical_activity", 8.0),
    ]);

    let risky_bundle = engine.predict(&risky);
    let healthy_bundle = engine.predict(&healthy);

    for condition in Condition::ALL {
        let high = risky_bundle.get(condition).expect("present");
        let low = healthy_bundle.get(condition).expect("present");
        assert!(
            high.probability > low.probability,
            "{condition}: risky profile should score above healthy profile"
        );
        assert_eq!(low.risk_level, RiskTier::Low);
    }
}

#[test]
fn test_internal_failure_returns_uniform_safe_bundle() {
    use heartrisk::model::registry::{ConditionModel, TrainedConditionModel};
    use heartrisk::model::StandardScaler;
    use heartrisk::model::RandomForest;
    use std::collections::HashMap;

    // A model fitted on the wrong width cannot score a 25-feature row; the
    // engine must abandon partial results and return the safety net
    let narrow_rows = vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0], vec![6.0, 7.0, 8.0]];
    let labels = vec![0u8, 1, 1];
    let scaler = StandardScaler::fit(&narrow_rows).expect("fit scaler");
    let forest = RandomForest::fit(
        &narrow_rows,
        &labels,
        &ForestConfig {
            n_trees: 3,
            max_depth: 2,
            min_samples_split: 2,
            seed: 1,
        },
    )
    .expect("fit forest");

    let mut models = HashMap::new();
    models.insert(
        Condition::Arrhythmia,
        ConditionModel::Trained(TrainedConditionModel::new(scaler, forest, 1.0)),
    );
    let engine = InferenceEngine::new(
        ModelRegistry::new(models),
        FallbackGenerator::new(42),
    );

    let bundle = engine.predict(&vector(&[("age", 50.0)]));
    assert_eq!(bundle.len(), 6);
    for (_, result) in bundle.iter() {
        assert_eq!(result.probability, 10.0);
        assert_eq!(result.risk_level, RiskTier::Low);
        assert_eq!(result.confidence, 50.0);
    }
}

#[test]
fn test_serialized_bundle_uses_condition_identifiers() {
    let engine = degraded_engine();
    let bundle = engine.predict(&FeatureVector::new());

    let json = serde_json::to_value(&bundle).expect("serialize");
    let object = json.as_object().expect("bundle serializes to an object");
    assert_eq!(object.len(), 6);
    for condition in Condition::ALL {
        let entry = &object[condition.as_str()];
        assert!(entry["probability"].is_number());
        assert!(entry["risk_level"].is_string());
        assert!(entry["confidence"].is_number());
    }
}
