//! Per-column z-score feature scaling.

use serde::{Deserialize, Serialize};

use crate::data::errors::{DataError, DataResult};

/// Zero-mean, unit-variance scaler fitted per column.
///
/// Fit on the training partition only; the same fitted transform is applied
/// to the test partition and to inference-time rows so no test statistics
/// leak into the scaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    std_devs: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and standard deviations over a row-major matrix.
    pub fn fit(rows: &[Vec<f64>]) -> DataResult<Self> {
        let first = rows.first().ok_or_else(|| {
            DataError::training("cannot fit scaler on an empty partition")
        })?;
        let width = first.len();

        let mut means = vec![0.0; width];
        for row in rows {
            if row.len() != width {
                return Err(DataError::training("ragged feature matrix"));
            }
            for (i, value) in row.iter().enumerate() {
                means[i] += value;
            }
        }
        let n = rows.len() as f64;
        for mean in &mut means {
            *mean /= n;
        }

        let mut std_devs = vec![0.0; width];
        for row in rows {
            for (i, value) in row.iter().enumerate() {
                std_devs[i] += (value - means[i]).powi(2);
            }
        }
        for std_dev in &mut std_devs {
            // Floor prevents division by zero on constant columns
            *std_dev = (*std_dev / n).sqrt().max(1e-8);
        }

        Ok(Self { means, std_devs })
    }

    /// Number of columns the scaler was fitted on.
    pub fn width(&self) -> usize {
        self.means.len()
    }

    /// Scale a single row with the fitted statistics.
    pub fn transform_row(&self, row: &[f64]) -> DataResult<Vec<f64>> {
        if row.len() != self.means.len() {
            return Err(DataError::inference(format!(
                "row has {} columns, scaler fitted on {}",
                row.len(),
                self.means.len()
            )));
        }
        Ok(row
            .iter()
            .enumerate()
            .map(|(i, value)| (value - self.means[i]) / self.std_devs[i])
            .collect())
    }

    /// Scale a row-major matrix with the fitted statistics.
    pub fn transform(&self, rows: &[Vec<f64>]) -> DataResult<Vec<Vec<f64>>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}
