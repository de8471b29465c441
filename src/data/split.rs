//! Seeded train/test partition

use super::dataset::Dataset;
use crate::error::{FrameImportanceError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Row indices of one train/test partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestIndices {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Number of held-out rows for `test_size` of `n_samples`
pub fn test_count(n_samples: usize, test_size: f64) -> usize {
    (test_size * n_samples as f64).round() as usize
}

/// Shuffle `0..n_samples` with a seeded generator and cut off the first
/// `round(test_size * n_samples)` indices as the test set.
pub fn split_indices(n_samples: usize, test_size: f64, seed: u64) -> Result<TrainTestIndices> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(FrameImportanceError::invalid_parameter(
            "test_size",
            test_size,
            "must lie in (0, 1)",
        ));
    }

    let n_test = test_count(n_samples, test_size);
    if n_test == 0 || n_test >= n_samples {
        return Err(FrameImportanceError::invalid_parameter(
            "test_size",
            test_size,
            format!(
                "leaves {} of {} samples for testing; both subsets must be non-empty",
                n_test, n_samples
            ),
        ));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train_indices = indices.split_off(n_test);
    debug!(n_train = train_indices.len(), n_test, seed, "split dataset");

    Ok(TrainTestIndices {
        train_indices,
        test_indices: indices,
    })
}

/// Partition a dataset into `(train, test)`
pub fn train_test_split(dataset: &Dataset, test_size: f64, seed: u64) -> Result<(Dataset, Dataset)> {
    let split = split_indices(dataset.n_samples(), test_size, seed)?;
    Ok((
        dataset.select(&split.train_indices),
        dataset.select(&split.test_indices),
    ))
}
