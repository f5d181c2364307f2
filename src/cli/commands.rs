//! CLI command implementations. This layer validates caller input, builds
//! the registry at startup, and attaches knowledge-base guidance to elevated
//! risks; the prediction core stays behind `model::InferenceEngine`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::data::dataset::TrainingDataset;
use crate::data::{validation, FeatureVector};
use crate::knowledge::{self, DietRecommendations, DiseaseInfo};
use crate::model::registry::{ConditionModel, ModelRegistry};
use crate::model::{
    train_registry, Condition, FallbackGenerator, FeatureSchema, InferenceEngine, RiskBundle,
    RiskTier,
};

/// One assessment: the caller's inputs, the full risk bundle, and
/// knowledge-base details for every condition above Low risk.
#[derive(Debug, Serialize)]
struct AssessmentReport {
    id: Uuid,
    generated_at: DateTime<Utc>,
    inputs: FeatureVector,
    risks: RiskBundle,
    details: Vec<ConditionDetail>,
}

#[derive(Debug, Serialize)]
struct ConditionDetail {
    condition: Condition,
    probability: f64,
    risk_level: RiskTier,
    confidence: f64,
    disease_info: DiseaseInfo,
    health_tips: Vec<String>,
    diet_recommendations: DietRecommendations,
}

impl AssessmentReport {
    fn build(inputs: FeatureVector, risks: RiskBundle) -> Self {
        // Only elevated risks get the full explanation treatment
        let details = risks
            .iter()
            .filter(|(_, result)| result.risk_level != RiskTier::Low)
            .map(|(condition, result)| ConditionDetail {
                condition,
                probability: result.probability,
                risk_level: result.risk_level,
                confidence: result.confidence,
                disease_info: knowledge::disease_info(condition),
                health_tips: knowledge::health_tips(condition, &inputs),
                diet_recommendations: knowledge::diet_recommendations(condition, &inputs),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            inputs,
            risks,
            details,
        }
    }
}

fn build_registry(config: &Config) -> ModelRegistry {
    let dataset = TrainingDataset::load(&config.data.dataset_path);
    train_registry(dataset.as_ref(), &config.training_options())
}

/// Assess risks for a partial feature vector supplied inline or from a file.
pub fn predict(config: &Config, input: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let raw = match (input, file) {
        (Some(inline), _) => inline,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        (None, None) => bail!("Provide the feature vector via --input or --file"),
    };

    let features: FeatureVector = serde_json::from_str(&raw)
        .context("Input must be a JSON object mapping feature names to numbers")?;
    validation::validate_values(&features)?;
    validation::validate_feature_count(&features)?;

    let registry = build_registry(config);
    let engine = InferenceEngine::new(
        registry,
        FallbackGenerator::new(config.model.fallback_seed),
    );

    let risks = engine.predict(&features);
    let report = AssessmentReport::build(features, risks);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Train all condition models and report per-condition status.
pub fn train(config: &Config) -> Result<()> {
    let registry = build_registry(config);

    println!("Condition                 | Status      | Accuracy");
    println!("--------------------------|-------------|---------");
    for condition in Condition::ALL {
        match registry.get(condition) {
            ConditionModel::Trained(model) => {
                println!(
                    "{:<25} | trained     | {:.3}",
                    condition,
                    model.accuracy()
                );
            }
            ConditionModel::Absent => {
                println!("{:<25} | unavailable |   -", condition);
            }
        }
    }
    info!(
        "{} of {} condition models available",
        registry.trained_count(),
        Condition::ALL.len()
    );
    Ok(())
}

/// Print the feature schema with canonical defaults.
pub fn schema() -> Result<()> {
    println!("Feature                  | Default");
    println!("-------------------------|--------");
    for name in FeatureSchema::names() {
        let default = FeatureSchema::default_for(name).unwrap_or_default();
        println!("{name:<24} | {default}");
    }
    Ok(())
}

/// Print the tracked conditions.
pub fn conditions() -> Result<()> {
    for condition in Condition::ALL {
        println!("{:<25} {}", condition.as_str(), condition.display_name());
    }
    Ok(())
}

/// Print detailed information about one condition.
pub fn info(condition: &str) -> Result<()> {
    let condition: Condition = condition
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Use an identifier from the `conditions` command")?;

    let info = knowledge::disease_info(condition);
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
