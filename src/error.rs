//! Error types for the room classifier trainer

use thiserror::Error;

/// Result type alias for trainer operations
pub type Result<T> = std::result::Result<T, LocatorError>;

/// Main error type for the trainer
#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("CSV missing '{0}' column")]
    MissingColumn(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Split error: {0}")]
    SplitError(String),

    #[error("Unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for LocatorError {
    fn from(err: polars::error::PolarsError) -> Self {
        match err {
            polars::error::PolarsError::ColumnNotFound(name) => {
                LocatorError::FeatureNotFound(name.to_string())
            }
            other => LocatorError::DataError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for LocatorError {
    fn from(err: serde_json::Error) -> Self {
        LocatorError::SerializationError(err.to_string())
    }
}

impl From<bincode::Error> for LocatorError {
    fn from(err: bincode::Error) -> Self {
        LocatorError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for LocatorError {
    fn from(err: ndarray::ShapeError) -> Self {
        LocatorError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
