//! Historical patient dataset used for model training.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{error, info};

use crate::data::errors::{DataError, DataResult};
use crate::model::{Condition, FeatureSchema};

/// One historical record: the 25 schema features (cells may be missing) plus
/// six binary condition labels in `Condition::ALL` order.
#[derive(Debug, Clone)]
pub struct PatientRecord {
    pub features: Vec<Option<f64>>,
    pub labels: [u8; 6],
}

impl PatientRecord {
    pub fn label(&self, condition: Condition) -> u8 {
        self.labels[condition as usize]
    }
}

/// A table of historical records with full schema coverage.
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    rows: Vec<PatientRecord>,
}

impl TrainingDataset {
    pub fn new(rows: Vec<PatientRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[PatientRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load a dataset from a CSV file with the 25 schema columns plus the six
    /// label columns.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> DataResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Parse a dataset from any CSV source. Empty feature cells become
    /// missing values; label cells must be 0 or 1.
    pub fn from_reader<R: Read>(reader: R) -> DataResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let column = |name: &str| -> DataResult<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        let mut feature_columns = Vec::with_capacity(FeatureSchema::LEN);
        for name in FeatureSchema::names() {
            feature_columns.push(column(name)?);
        }
        let mut label_columns = [0usize; 6];
        for condition in Condition::ALL {
            label_columns[condition as usize] = column(condition.as_str())?;
        }

        let mut rows = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;

            let mut features = Vec::with_capacity(FeatureSchema::LEN);
            for (&index, name) in feature_columns.iter().zip(FeatureSchema::names()) {
                let cell = record.get(index).unwrap_or("").trim();
                if cell.is_empty() {
                    features.push(None);
                } else {
                    let value: f64 = cell.parse().map_err(|_| {
                        DataError::parse_error(format!(
                            "row {}: invalid value {cell:?} for feature {name}",
                            line + 2
                        ))
                    })?;
                    features.push(Some(value));
                }
            }

            let mut labels = [0u8; 6];
            for condition in Condition::ALL {
                let index = label_columns[condition as usize];
                let cell = record.get(index).unwrap_or("").trim();
                labels[condition as usize] = match cell {
                    "0" => 0,
                    "1" => 1,
                    other => {
                        return Err(DataError::validation_error(
                            condition.as_str().to_string(),
                            format!("row {}: label must be 0 or 1, got {other:?}", line + 2),
                        ))
                    }
                };
            }

            rows.push(PatientRecord { features, labels });
        }

        if rows.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        Ok(Self::new(rows))
    }

    /// Boundary helper for the trainer: any loading failure is logged and
    /// reported as "no data" so service startup never crashes on a bad file.
    pub fn load<P: AsRef<Path>>(path: P) -> Option<Self> {
        match Self::from_csv_path(path.as_ref()) {
            Ok(dataset) => {
                info!(
                    "Loaded training dataset: {} rows from {}",
                    dataset.len(),
                    path.as_ref().display()
                );
                Some(dataset)
            }
            Err(e) => {
                error!(
                    "Error loading training data from {}: {e}",
                    path.as_ref().display()
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_line() -> String {
        let mut columns: Vec<&str> = FeatureSchema::names().to_vec();
        columns.extend(Condition::ALL.iter().map(|c| c.as_str()));
        columns.join(",")
    }

    fn row_line(age: &str, label: &str) -> String {
        // age, then 24 filled features, then six identical labels
        let mut cells = vec![age.to_string()];
        cells.extend(std::iter::repeat("1".to_string()).take(FeatureSchema::LEN - 1));
        cells.extend(std::iter::repeat(label.to_string()).take(6));
        cells.join(",")
    }

    #[test]
    fn test_parses_rows_and_missing_cells() {
        let csv = format!("{}\n{}\n{}\n", header_line(), row_line("63", "1"), row_line("", "0"));
        let dataset = TrainingDataset::from_reader(csv.as_bytes()).expect("parse");

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[0].features[0], Some(63.0));
        assert_eq!(dataset.rows()[1].features[0], None);
        assert_eq!(dataset.rows()[0].label(Condition::Arrhythmia), 1);
        assert_eq!(dataset.rows()[1].label(Condition::Arrhythmia), 0);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "age,sex\n50,1\n";
        match TrainingDataset::from_reader(csv.as_bytes()) {
            Err(DataError::MissingColumn(_)) => {}
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_label_is_an_error() {
        let csv = format!("{}\n{}\n", header_line(), row_line("50", "2"));
        assert!(TrainingDataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_bad_feature_value_is_an_error() {
        let csv = format!("{}\n{}\n", header_line(), row_line("old", "1"));
        assert!(TrainingDataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let csv = format!("{}\n", header_line());
        match TrainingDataset::from_reader(csv.as_bytes()) {
            Err(DataError::EmptyDataset) => {}
            other => panic!("expected EmptyDataset, got {other:?}"),
        }
    }

    #[test]
    fn test_load_returns_none_for_missing_file() {
        assert!(TrainingDataset::load("/nonexistent/heart.csv").is_none());
    }
}
