//! Training data loading

use super::dataset::{DataSource, Dataset};
use super::synthetic::SampleGenerator;
use crate::error::{FrameImportanceError, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// A dataset together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub source: DataSource,
}

/// Loads annotated frames, substituting sample data when the file is missing
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    sample_generator: SampleGenerator,
}

impl DataLoader {
    /// Create a new data loader with the default sample generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the generator used for the fallback
    pub fn with_sample_generator(mut self, generator: SampleGenerator) -> Self {
        self.sample_generator = generator;
        self
    }

    /// Load a headered CSV file
    pub fn load_csv(&self, path: &Path) -> Result<DataFrame> {
        let file = File::open(path)?;

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(1000))
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| {
                FrameImportanceError::DataError(format!("failed to parse {}: {}", path.display(), e))
            })
    }

    /// Load the training data at `path`.
    ///
    /// A missing file is not an error: the sample set is generated instead
    /// and the returned source says so. Every other failure propagates.
    pub fn load_training_data(&self, path: &Path) -> Result<LoadedData> {
        match self.load_csv(path) {
            Ok(df) => {
                let dataset = Dataset::from_dataframe(&df)?;
                info!(
                    path = %path.display(),
                    rows = dataset.n_samples(),
                    columns = df.width(),
                    "loaded training data"
                );
                Ok(LoadedData {
                    dataset,
                    source: DataSource::File(path.to_path_buf()),
                })
            }
            Err(FrameImportanceError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "training data not found, generating sample data");
                let df = self.sample_generator.generate()?;
                Ok(LoadedData {
                    dataset: Dataset::from_dataframe(&df)?,
                    source: DataSource::Synthetic {
                        seed: self.sample_generator.seed(),
                    },
                })
            }
            Err(e) => Err(e),
        }
    }
}
