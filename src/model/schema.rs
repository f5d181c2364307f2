//! Fixed feature schema shared by training and inference.
//!
//! The schema is the single source of truth for which columns the trainer
//! selects and which keys the inference engine imputes. Any drift between the
//! two call sites is a correctness bug, so both must go through this module.

use std::collections::HashMap;

/// Ordered feature names with their canonical defaults. The default is a
/// clinically plausible median used when imputing features absent from a
/// caller-supplied vector; training-time missing cells use per-column sample
/// medians instead.
const FEATURES: [(&str, f64); FeatureSchema::LEN] = [
    ("age", 50.0),
    ("sex", 1.0),
    ("cp", 2.0),
    ("trestbps", 130.0),
    ("chol", 240.0),
    ("fbs", 0.0),
    ("restecg", 1.0),
    ("thalach", 150.0),
    ("exang", 0.0),
    ("oldpeak", 1.0),
    ("slope", 1.0),
    ("ca", 1.0),
    ("thal", 2.0),
    ("bmi", 25.0),
    ("smoking", 0.0),
    ("alcohol_intake", 0.0),
    ("physical_activity", 5.0),
    ("stress_level", 5.0),
    ("family_history", 0.0),
    ("diabetes", 0.0),
    ("heart_rate_variability", 40.0),
    ("valve_noise", 0.0),
    ("aortic_size", 35.0),
    ("infection_history", 0.0),
    ("congenital_defect", 0.0),
];

/// The fixed clinical/lifestyle feature schema. Immutable after
/// initialization; exposes the ordered name list and per-feature defaults.
pub struct FeatureSchema;

impl FeatureSchema {
    /// Number of features in the schema.
    pub const LEN: usize = 25;

    /// Ordered feature names.
    pub fn names() -> [&'static str; Self::LEN] {
        let mut names = [""; Self::LEN];
        for (i, (name, _)) in FEATURES.iter().enumerate() {
            names[i] = name;
        }
        names
    }

    /// Canonical default for a feature, or None for names outside the schema.
    pub fn default_for(name: &str) -> Option<f64> {
        FEATURES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, default)| *default)
    }

    /// Whether a name belongs to the schema.
    pub fn contains(name: &str) -> bool {
        FEATURES.iter().any(|(n, _)| *n == name)
    }

    /// Build a complete feature row in schema order from a partial input,
    /// imputing defaults for absent keys. Unknown keys are ignored. Total:
    /// this never fails.
    pub fn complete_row(input: &HashMap<String, f64>) -> [f64; Self::LEN] {
        let mut row = [0.0; Self::LEN];
        for (i, (name, default)) in FEATURES.iter().enumerate() {
            row[i] = input.get(*name).copied().unwrap_or(*default);
        }
        row
    }

    /// Count of schema features present in a caller-supplied input. Drives
    /// the confidence score; unknown keys do not count.
    pub fn present_count(input: &HashMap<String, f64>) -> usize {
        input.keys().filter(|k| Self::contains(k)).count()
    }
}
