//! Training data loading and input validation.
//! The dataset is an external collaborator: loading failures are reported to
//! the trainer as "no data", never as a crash.

pub mod dataset;
pub mod errors;

// Re-export commonly used types
pub use dataset::{PatientRecord, TrainingDataset};
pub use errors::{DataError, DataResult};

use std::collections::HashMap;

/// A partial feature vector as supplied by the caller: a subset of the
/// schema's keys mapped to numeric values. Absent keys are absent, never
/// null; unknown keys are ignored by the pipeline.
pub type FeatureVector = HashMap<String, f64>;

/// Validation helpers for caller-supplied input. The core itself treats any
/// absent key as "apply default"; these checks belong to the request-handling
/// layer in front of it.
pub mod validation {
    use super::*;
    use crate::model::FeatureSchema;

    /// Minimum number of recognized parameters required before a prediction
    /// is considered meaningful.
    pub const MIN_FEATURES: usize = 3;

    /// Reject inputs with too few schema-recognized parameters.
    pub fn validate_feature_count(input: &FeatureVector) -> DataResult<()> {
        let present = FeatureSchema::present_count(input);
        if present < MIN_FEATURES {
            return Err(DataError::validation_error(
                "features",
                "fill in at least 3 health parameters for an accurate prediction",
            ));
        }
        Ok(())
    }

    /// Reject non-finite values; the pipeline expects plain numbers.
    pub fn validate_values(input: &FeatureVector) -> DataResult<()> {
        for (name, value) in input {
            if !value.is_finite() {
                return Err(DataError::Validation {
                    field: name.clone(),
                    message: format!("value {value} is not a finite number"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_feature_count() {
        let mut input = FeatureVector::new();
        input.insert("age".to_string(), 50.0);
        input.insert("bmi".to_string(), 25.0);
        assert!(validation::validate_feature_count(&input).is_err());

        input.insert("smoking".to_string(), 1.0);
        assert!(validation::validate_feature_count(&input).is_ok());
    }

    #[test]
    fn test_unknown_keys_do_not_count_toward_minimum() {
        let mut input = FeatureVector::new();
        input.insert("one".to_string(), 1.0);
        input.insert("two".to_string(), 2.0);
        input.insert("three".to_string(), 3.0);
        assert!(validation::validate_feature_count(&input).is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut input = FeatureVector::new();
        input.insert("age".to_string(), f64::NAN);
        assert!(validation::validate_values(&input).is_err());

        let mut ok = FeatureVector::new();
        ok.insert("age".to_string(), 61.0);
        assert!(validation::validate_values(&ok).is_ok());
    }
}
