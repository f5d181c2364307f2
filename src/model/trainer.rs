//! Per-condition model training.
//!
//! Each of the six conditions gets its own scaler and classifier fitted
//! against the shared feature matrix. Failures are isolated per condition:
//! one condition failing to train leaves the other five untouched, and a
//! missing dataset degrades the whole registry to absence markers instead of
//! aborting startup.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::data::dataset::TrainingDataset;
use crate::data::errors::{DataError, DataResult};
use crate::model::forest::{ForestConfig, RandomForest};
use crate::model::registry::{ConditionModel, ModelRegistry, TrainedConditionModel};
use crate::model::scaler::StandardScaler;
use crate::model::schema::FeatureSchema;
use crate::model::Condition;

/// Training run parameters: forest hyperparameters plus the held-out split.
#[derive(Debug, Clone)]
pub struct TrainingOptions {
    pub forest: ForestConfig,
    /// Fraction of rows held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the deterministic stratified partition.
    pub split_seed: u64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            forest: ForestConfig::default(),
            test_fraction: 0.2,
            split_seed: 42,
        }
    }
}

/// The feature columns the trainer selects as X. Identical to the inference
/// engine's imputation keys by construction; both sides read the schema.
pub fn training_feature_names() -> [&'static str; FeatureSchema::LEN] {
    FeatureSchema::names()
}

/// Build the model registry from the available training data. Never panics
/// and never returns an error: a missing or unusable dataset yields a
/// registry with every condition marked absent.
pub fn train_registry(
    dataset: Option<&TrainingDataset>,
    options: &TrainingOptions,
) -> ModelRegistry {
    let Some(dataset) = dataset else {
        warn!("No training data available, creating fallback-only registry");
        return ModelRegistry::all_absent();
    };
    if dataset.is_empty() {
        warn!("Training dataset has no rows, creating fallback-only registry");
        return ModelRegistry::all_absent();
    }

    let x = match impute_features(dataset) {
        Ok(x) => x,
        Err(e) => {
            warn!("Error preparing feature matrix: {e}, creating fallback-only registry");
            return ModelRegistry::all_absent();
        }
    };

    let mut models = HashMap::new();
    for condition in Condition::ALL {
        match train_condition(&x, dataset, condition, options) {
            Ok(model) => {
                info!(
                    "Model for {} - accuracy: {:.3}",
                    condition,
                    model.accuracy()
                );
                models.insert(condition, ConditionModel::Trained(model));
            }
            Err(e) => {
                warn!("Training failed for {condition}: {e}, marking condition unavailable");
                models.insert(condition, ConditionModel::Absent);
            }
        }
    }

    let registry = ModelRegistry::new(models);
    info!(
        "Successfully trained {} of {} condition models",
        registry.trained_count(),
        Condition::ALL.len()
    );
    registry
}

fn train_condition(
    x: &[Vec<f64>],
    dataset: &TrainingDataset,
    condition: Condition,
    options: &TrainingOptions,
) -> DataResult<TrainedConditionModel> {
    let y: Vec<u8> = dataset.rows().iter().map(|r| r.label(condition)).collect();

    let (train_idx, test_idx) =
        stratified_split(&y, options.test_fraction, options.split_seed)?;

    let x_train: Vec<Vec<f64>> = train_idx.iter().map(|&i| x[i].clone()).collect();
    let y_train: Vec<u8> = train_idx.iter().map(|&i| y[i]).collect();
    let x_test: Vec<Vec<f64>> = test_idx.iter().map(|&i| x[i].clone()).collect();
    let y_test: Vec<u8> = test_idx.iter().map(|&i| y[i]).collect();

    // Fit the scaler on the train partition only, then apply the fitted
    // transform to both partitions
    let scaler = StandardScaler::fit(&x_train)?;
    let x_train_scaled = scaler.transform(&x_train)?;
    let x_test_scaled = scaler.transform(&x_test)?;

    let forest = RandomForest::fit(&x_train_scaled, &y_train, &options.forest)?;

    let mut correct = 0usize;
    for (row, &label) in x_test_scaled.iter().zip(y_test.iter()) {
        if forest.predict(row) == label {
            correct += 1;
        }
    }
    let accuracy = correct as f64 / y_test.len() as f64;

    Ok(TrainedConditionModel::new(scaler, forest, accuracy))
}

/// Impute missing cells with the per-column sample median over the available
/// training rows. Schema defaults are reserved for inference-time absent
/// features and are not used here.
fn impute_features(dataset: &TrainingDataset) -> DataResult<Vec<Vec<f64>>> {
    let names = FeatureSchema::names();
    let mut medians = Vec::with_capacity(FeatureSchema::LEN);

    for column in 0..FeatureSchema::LEN {
        let mut available: Vec<f64> = dataset
            .rows()
            .iter()
            .filter_map(|r| r.features[column])
            .collect();
        if available.is_empty() {
            return Err(DataError::training(format!(
                "feature column {} has no values to impute from",
                names[column]
            )));
        }
        available.sort_by(|a, b| a.total_cmp(b));
        medians.push(median_of_sorted(&available));
    }

    Ok(dataset
        .rows()
        .iter()
        .map(|record| {
            record
                .features
                .iter()
                .enumerate()
                .map(|(column, cell)| cell.unwrap_or(medians[column]))
                .collect()
        })
        .collect())
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Deterministic label-stratified split: the positive/negative ratio is
/// preserved in both partitions and the same seed always yields the same
/// partition.
fn stratified_split(
    y: &[u8],
    test_fraction: f64,
    seed: u64,
) -> DataResult<(Vec<usize>, Vec<usize>)> {
    let mut positives: Vec<usize> = Vec::new();
    let mut negatives: Vec<usize> = Vec::new();
    for (i, &label) in y.iter().enumerate() {
        if label == 1 {
            positives.push(i);
        } else {
            negatives.push(i);
        }
    }

    if positives.len() < 2 || negatives.len() < 2 {
        return Err(DataError::training(format!(
            "label classes too small to stratify ({} positive, {} negative)",
            positives.len(),
            negatives.len()
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for class in [&mut positives, &mut negatives] {
        class.shuffle(&mut rng);
        // At least one row of each class lands in both partitions
        let take = ((class.len() as f64 * test_fraction).round() as usize)
            .max(1)
            .min(class.len() - 1);
        test.extend_from_slice(&class[..take]);
        train.extend_from_slice(&class[take..]);
    }

    Ok((train, test))
}
