//! Frame Importance - trains the frame importance regression model
//!
//! Annotated video frames are described by six visual features and a
//! human-assigned importance score. This crate fits a random forest that
//! predicts the score from the features and reports which features drive it.
//!
//! # Modules
//!
//! - [`data`] - CSV loading, sample data generation, train/test split
//! - [`training`] - Decision trees, random forest, metrics, training engine
//! - [`export`] - Model artifact serialization
//! - [`cli`] - Command-line interface
//! - [`utils`] - Worker pools and timing

// Core error handling
pub mod error;

// Data and models
pub mod data;
pub mod training;

// Persistence
pub mod export;

// Services
pub mod cli;

// Utilities
pub mod utils;

pub use error::{FrameImportanceError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{FrameImportanceError, Result};

    // Data
    pub use crate::data::{
        create_sample_data, train_test_split, DataLoader, DataSource, Dataset, SampleGenerator,
        FEATURE_COLUMNS, TARGET_COLUMN,
    };

    // Training
    pub use crate::training::{
        FeatureImportance, ForestConfig, MaxFeatures, RandomForest, RegressionMetrics,
        TrainEngine, TrainingConfig, TrainingReport,
    };

    // Export
    pub use crate::export::{load_model, save_model, ModelArtifact, ModelMetadata, SerializationFormat};

    // Utilities
    pub use crate::utils::{ParallelConfig, Timer};
}
