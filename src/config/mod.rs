use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::model::{ForestConfig, TrainingOptions};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the historical training dataset (CSV)
    pub dataset_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub test_fraction: f64,
    pub split_seed: u64,
    pub fallback_seed: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file - this sets env vars that aren't already set
        dotenv::dotenv().ok();

        let config = Config {
            data: DataConfig {
                dataset_path: env::var("HEART_DATASET_PATH")
                    .unwrap_or_else(|_| "data/heart_disease_dataset.csv".to_string()),
            },
            model: ModelConfig {
                trees: env::var("MODEL_TREES")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .context("Invalid MODEL_TREES value")?,
                max_depth: env::var("MODEL_MAX_DEPTH")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("Invalid MODEL_MAX_DEPTH value")?,
                min_samples_split: env::var("MODEL_MIN_SAMPLES_SPLIT")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .context("Invalid MODEL_MIN_SAMPLES_SPLIT value")?,
                test_fraction: env::var("MODEL_TEST_FRACTION")
                    .unwrap_or_else(|_| "0.2".to_string())
                    .parse()
                    .context("Invalid MODEL_TEST_FRACTION value")?,
                split_seed: env::var("MODEL_SPLIT_SEED")
                    .unwrap_or_else(|_| "42".to_string())
                    .parse()
                    .context("Invalid MODEL_SPLIT_SEED value")?,
                fallback_seed: env::var("MODEL_FALLBACK_SEED")
                    .unwrap_or_else(|_| "42".to_string())
                    .parse()
                    .context("Invalid MODEL_FALLBACK_SEED value")?,
            },
        };

        Ok(config)
    }

    /// Bridge the model section into the trainer's options.
    pub fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            forest: ForestConfig {
                n_trees: self.model.trees,
                max_depth: self.model.max_depth,
                min_samples_split: self.model.min_samples_split,
                seed: self.model.split_seed,
            },
            test_fraction: self.model.test_fraction,
            split_seed: self.model.split_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                dataset_path: "data/heart_disease_dataset.csv".to_string(),
            },
            model: ModelConfig {
                trees: 100,
                max_depth: 10,
                min_samples_split: 5,
                test_fraction: 0.2,
                split_seed: 42,
                fallback_seed: 42,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_training_setup() {
        let config = Config::default();
        let options = config.training_options();
        assert_eq!(options.forest.n_trees, 100);
        assert_eq!(options.forest.max_depth, 10);
        assert_eq!(options.forest.min_samples_split, 5);
        assert_eq!(options.test_fraction, 0.2);
    }
}
