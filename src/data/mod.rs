//! Frame data acquisition
//!
//! - [`loader`] - CSV loading with the synthetic fallback
//! - [`synthetic`] - deterministic sample frames
//! - [`split`] - seeded train/test partition

mod dataset;
pub mod loader;
pub mod split;
pub mod synthetic;

pub use dataset::{DataSource, Dataset, FEATURE_COLUMNS, TARGET_COLUMN};
pub use loader::{DataLoader, LoadedData};
pub use split::{split_indices, test_count, train_test_split, TrainTestIndices};
pub use synthetic::{create_sample_data, SampleGenerator, SAMPLE_SEED, SAMPLE_SIZE};
