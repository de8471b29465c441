//! Error types for the frame importance trainer

use thiserror::Error;

/// Result type alias for trainer operations
pub type Result<T> = std::result::Result<T, FrameImportanceError>;

/// Main error type for the trainer
#[derive(Error, Debug)]
pub enum FrameImportanceError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
}

impl FrameImportanceError {
    /// Shorthand for an [`FrameImportanceError::InvalidParameter`]
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        FrameImportanceError::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<polars::error::PolarsError> for FrameImportanceError {
    fn from(err: polars::error::PolarsError) -> Self {
        match err {
            polars::error::PolarsError::ColumnNotFound(name) => {
                FrameImportanceError::ColumnNotFound(name.to_string())
            }
            other => FrameImportanceError::DataError(other.to_string()),
        }
    }
}

impl From<bincode::Error> for FrameImportanceError {
    fn from(err: bincode::Error) -> Self {
        FrameImportanceError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for FrameImportanceError {
    fn from(err: serde_json::Error) -> Self {
        FrameImportanceError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for FrameImportanceError {
    fn from(err: ndarray::ShapeError) -> Self {
        FrameImportanceError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
