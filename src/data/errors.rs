use thiserror::Error;

/// Error types for dataset loading and the prediction pipeline
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Data validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),

    #[error("Dataset contains no usable rows")]
    EmptyDataset,

    #[error("Training error: {message}")]
    Training { message: String },

    #[error("Inference error: {message}")]
    Inference { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for data and pipeline operations
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    /// Create a parse error with context
    pub fn parse_error<S: Into<String>>(message: S) -> Self {
        DataError::Parse {
            message: message.into(),
        }
    }

    /// Create a validation error with field context
    pub fn validation_error<S: Into<String>>(field: S, message: S) -> Self {
        DataError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a training error
    pub fn training<S: Into<String>>(message: S) -> Self {
        DataError::Training {
            message: message.into(),
        }
    }

    /// Create an inference error
    pub fn inference<S: Into<String>>(message: S) -> Self {
        DataError::Inference {
            message: message.into(),
        }
    }
}
