//! Training configuration

use crate::error::{FrameImportanceError, Result};
use crate::utils::ParallelConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Seed shared by the sample generator, the splitter and the forest
pub const DEFAULT_SEED: u64 = 42;

/// Default location of the annotated frame CSV
pub const DEFAULT_DATA_PATH: &str = "training-data/frames.csv";

/// Default location of the serialized model
pub const DEFAULT_OUTPUT_PATH: &str = "models/frame-importance-model.pkl";

/// Default held-out fraction
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Strategy for the number of candidate features examined at each split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// Square root of n_features
    Sqrt,
    /// Log2 of n_features
    Log2,
    /// Fraction of n_features
    Fraction(f64),
    /// Fixed number
    Fixed(usize),
    /// All features
    All,
}

impl MaxFeatures {
    /// Resolve the strategy against a concrete feature count
    pub fn resolve(&self, n_features: usize) -> usize {
        match *self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().ceil() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().ceil() as usize,
            MaxFeatures::Fraction(f) => (n_features as f64 * f).ceil() as usize,
            MaxFeatures::Fixed(n) => n,
            MaxFeatures::All => n_features,
        }
        .clamp(1, n_features.max(1))
    }
}

/// Random forest hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum depth per tree (None = grow until pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in each leaf
    pub min_samples_leaf: usize,
    /// Candidate features per split
    pub max_features: MaxFeatures,
    /// Draw a bootstrap sample for every tree
    pub bootstrap: bool,
    /// Base seed; tree `i` uses `random_state + i`
    pub random_state: u64,
    /// Worker pool used while fitting
    pub n_jobs: ParallelConfig,
}

impl Default for ForestConfig {
    /// The fixed configuration the frame importance model is trained with
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: Some(10),
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: MaxFeatures::All,
            bootstrap: true,
            random_state: DEFAULT_SEED,
            n_jobs: ParallelConfig::new(),
        }
    }
}

impl ForestConfig {
    /// Set number of trees
    pub fn with_n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n;
        self
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set minimum samples to split
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples;
        self
    }

    /// Set minimum samples in leaf
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples;
        self
    }

    /// Set max features strategy
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Enable or disable bootstrap sampling
    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Set random state
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Restrict fitting to `n` workers
    pub fn with_n_jobs(mut self, n: usize) -> Self {
        self.n_jobs = ParallelConfig::new().with_threads(n);
        self
    }

    /// Check hyperparameters before fitting
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(FrameImportanceError::invalid_parameter(
                "n_estimators",
                self.n_estimators,
                "must be at least 1",
            ));
        }
        if self.max_depth == Some(0) {
            return Err(FrameImportanceError::invalid_parameter(
                "max_depth",
                0,
                "must be at least 1",
            ));
        }
        if self.min_samples_split < 2 {
            return Err(FrameImportanceError::invalid_parameter(
                "min_samples_split",
                self.min_samples_split,
                "must be at least 2",
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(FrameImportanceError::invalid_parameter(
                "min_samples_leaf",
                self.min_samples_leaf,
                "must be at least 1",
            ));
        }
        if let MaxFeatures::Fraction(f) = self.max_features {
            if !(f > 0.0 && f <= 1.0) {
                return Err(FrameImportanceError::invalid_parameter(
                    "max_features",
                    f,
                    "fraction must lie in (0, 1]",
                ));
            }
        }
        if self.n_jobs.n_threads == Some(0) {
            return Err(FrameImportanceError::invalid_parameter(
                "n_jobs",
                0,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Configuration of one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Annotated frame CSV
    pub data_path: PathBuf,
    /// Where the fitted model is written
    pub output_path: PathBuf,
    /// Held-out fraction
    pub test_size: f64,
    /// Seed of the train/test shuffle
    pub split_seed: u64,
    /// Seed of the sample generator used when the CSV is missing
    pub sample_seed: u64,
    /// Forest hyperparameters
    pub forest: ForestConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            test_size: DEFAULT_TEST_SIZE,
            split_seed: DEFAULT_SEED,
            sample_seed: DEFAULT_SEED,
            forest: ForestConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// Create a configuration for the given input and output paths
    pub fn new(data_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            output_path: output_path.into(),
            ..Default::default()
        }
    }

    /// Set the held-out fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Set the split seed
    pub fn with_split_seed(mut self, seed: u64) -> Self {
        self.split_seed = seed;
        self
    }

    /// Set the sample generator seed
    pub fn with_sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = seed;
        self
    }

    /// Replace the forest hyperparameters
    pub fn with_forest(mut self, forest: ForestConfig) -> Self {
        self.forest = forest;
        self
    }

    /// Check the run configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(FrameImportanceError::invalid_parameter(
                "test_size",
                self.test_size,
                "must lie in (0, 1)",
            ));
        }
        self.forest.validate()
    }
}
