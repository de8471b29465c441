//! Model artifact serialization
//!
//! The artifact bundles the fitted forest with the metadata needed to use
//! it downstream: feature order, hyperparameters and the scores it reached.

use crate::data::DataSource;
use crate::error::{FrameImportanceError, Result};
use crate::training::{ForestConfig, RandomForest, RegressionMetrics, TrainingReport};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SerializationFormat {
    /// Binary format using bincode
    #[default]
    Binary,
    /// JSON format (portable, human-readable)
    Json,
}

impl SerializationFormat {
    /// `.json` selects JSON; every other extension, including `.pkl`, is binary
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SerializationFormat::Json,
            _ => SerializationFormat::Binary,
        }
    }
}

/// Model metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name
    pub name: String,
    /// Version of the crate that produced the artifact
    pub version: String,
    /// Training timestamp (RFC 3339)
    pub trained_at: String,
    /// Feature names, in the column order the model expects
    pub feature_names: Vec<String>,
    /// Target name
    pub target_name: String,
    /// Model type
    pub model_type: String,
    /// Hyperparameters
    pub hyperparameters: ForestConfig,
    /// Scores on the training subset
    pub train_metrics: Option<RegressionMetrics>,
    /// Scores on the held-out subset
    pub test_metrics: Option<RegressionMetrics>,
    /// Where the training data came from
    pub data_source: Option<DataSource>,
}

impl ModelMetadata {
    /// Metadata for a freshly fitted forest
    pub fn new(name: impl Into<String>, model: &RandomForest, feature_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            trained_at: chrono::Utc::now().to_rfc3339(),
            feature_names,
            target_name: crate::data::TARGET_COLUMN.to_string(),
            model_type: "RandomForestRegressor".to_string(),
            hyperparameters: model.config().clone(),
            train_metrics: None,
            test_metrics: None,
            data_source: None,
        }
    }

    /// Attach the scores of a training run
    pub fn with_report(mut self, report: &TrainingReport) -> Self {
        self.train_metrics = Some(report.train_metrics);
        self.test_metrics = Some(report.test_metrics);
        self
    }

    /// Record where the training data came from
    pub fn with_data_source(mut self, source: DataSource) -> Self {
        self.data_source = Some(source);
        self
    }
}

/// Persisted model: header, metadata and the forest itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Magic bytes for format detection
    pub magic: [u8; 4],
    /// Format version
    pub format_version: u32,
    /// Model metadata
    pub metadata: ModelMetadata,
    /// Fitted forest
    pub model: RandomForest,
}

impl ModelArtifact {
    /// Magic bytes of frame importance model files
    pub const MAGIC: [u8; 4] = *b"FIMP";
    /// Current format version
    pub const VERSION: u32 = 1;

    /// Wrap a fitted forest
    pub fn new(metadata: ModelMetadata, model: RandomForest) -> Result<Self> {
        if !model.is_fitted() {
            return Err(FrameImportanceError::ModelNotFitted);
        }
        Ok(Self {
            magic: Self::MAGIC,
            format_version: Self::VERSION,
            metadata,
            model,
        })
    }

    fn check_header(&self) -> Result<()> {
        if self.magic != Self::MAGIC {
            return Err(FrameImportanceError::InvalidArtifact(format!(
                "unexpected magic bytes {:?}",
                self.magic
            )));
        }
        if self.format_version != Self::VERSION {
            return Err(FrameImportanceError::InvalidArtifact(format!(
                "unsupported format version {} (expected {})",
                self.format_version,
                Self::VERSION
            )));
        }
        Ok(())
    }
}

/// Write `artifact` to `path`, creating missing parent directories.
///
/// Returns the number of bytes written. The file is written in place.
pub fn save_model(artifact: &ModelArtifact, path: &Path) -> Result<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let format = SerializationFormat::from_path(path);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match format {
        SerializationFormat::Binary => bincode::serialize_into(&mut writer, artifact)?,
        SerializationFormat::Json => serde_json::to_writer_pretty(&mut writer, artifact)?,
    }
    writer.flush()?;

    let bytes = fs::metadata(path)?.len();
    info!(path = %path.display(), bytes, ?format, "saved model");
    Ok(bytes)
}

/// Read an artifact written by [`save_model`]
pub fn load_model(path: &Path) -> Result<ModelArtifact> {
    let format = SerializationFormat::from_path(path);
    let mut reader = BufReader::new(File::open(path)?);

    let artifact: ModelArtifact = match format {
        SerializationFormat::Binary => {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            if !bytes.starts_with(&ModelArtifact::MAGIC) {
                return Err(FrameImportanceError::InvalidArtifact(format!(
                    "{} is not a frame importance model",
                    path.display()
                )));
            }
            bincode::deserialize(&bytes)?
        }
        SerializationFormat::Json => serde_json::from_reader(reader)?,
    };

    artifact.check_header()?;
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FEATURE_COLUMNS;
    use ndarray::{Array1, Array2};

    fn fitted_artifact() -> (ModelArtifact, Array2<f64>) {
        let x = Array2::from_shape_fn((40, 6), |(r, c)| ((r * 3 + c * 7) % 13) as f64 / 13.0);
        let y = Array1::from_shape_fn(40, |r| x[[r, 0]] * 0.7 + x[[r, 2]] * 0.3);

        let mut model = RandomForest::new(ForestConfig::default().with_n_estimators(5));
        model.fit(&x, &y).unwrap();

        let names = FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect();
        let metadata = ModelMetadata::new("frame-importance", &model, names)
            .with_data_source(DataSource::Synthetic { seed: 42 });
        (ModelArtifact::new(metadata, model).unwrap(), x)
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SerializationFormat::from_path(Path::new("m.pkl")), SerializationFormat::Binary);
        assert_eq!(SerializationFormat::from_path(Path::new("m.JSON")), SerializationFormat::Json);
        assert_eq!(SerializationFormat::from_path(Path::new("model")), SerializationFormat::Binary);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_loads_back() {
        let (artifact, x) = fitted_artifact();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("models").join("model.pkl");

        let bytes = save_model(&artifact, &path).unwrap();
        assert!(bytes > 0);
        assert!(path.exists());

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.metadata, artifact.metadata);
        assert_eq!(loaded.model.predict(&x).unwrap(), artifact.model.predict(&x).unwrap());
    }

    #[test]
    fn test_json_artifact() {
        let (artifact, x) = fitted_artifact();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        save_model(&artifact, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("RandomForestRegressor"));

        let loaded = load_model(&path).unwrap();
        let before = artifact.model.predict(&x).unwrap();
        let after = loaded.model.predict(&x).unwrap();
        for (a, b) in before.iter().zip(after.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rejects_foreign_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.pkl");
        std::fs::write(&path, b"not a model").unwrap();

        assert!(matches!(load_model(&path), Err(FrameImportanceError::InvalidArtifact(_))));
    }

    #[test]
    fn test_unfitted_model_rejected() {
        let model = RandomForest::default();
        let metadata = ModelMetadata::new("m", &model, Vec::new());
        assert!(ModelArtifact::new(metadata, model).is_err());
    }
}
