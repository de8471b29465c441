//! Model training
//!
//! Regression trees, the random forest built from them, the metrics used
//! to score a fit, and the engine tying them together.

mod config;
mod engine;
mod metrics;
pub mod decision_tree;
pub mod random_forest;

pub use config::{
    ForestConfig, MaxFeatures, TrainingConfig, DEFAULT_DATA_PATH, DEFAULT_OUTPUT_PATH,
    DEFAULT_SEED, DEFAULT_TEST_SIZE,
};
pub use decision_tree::{DecisionTree, TreeNode};
pub use engine::{rank_importances, FeatureImportance, TrainEngine, TrainingReport};
pub use metrics::RegressionMetrics;
pub use random_forest::RandomForest;
