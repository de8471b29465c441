//! In-memory training dataset

use crate::error::{FrameImportanceError, Result};
use ndarray::{Array1, Array2, Axis};
use polars::prelude::*;
use std::fmt;
use std::path::PathBuf;

/// Visual features the model is trained on, in column order
pub const FEATURE_COLUMNS: [&str; 6] = [
    "VisualComplexity",
    "ColorVariance",
    "EdgeDensity",
    "Brightness",
    "Contrast",
    "AspectRatio",
];

/// Regression target
pub const TARGET_COLUMN: &str = "ImportanceScore";

/// Where a dataset came from
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DataSource {
    /// Read from a CSV file
    File(PathBuf),
    /// Generated because the CSV was missing
    Synthetic { seed: u64 },
}

impl DataSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataSource::Synthetic { .. })
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "file {}", path.display()),
            DataSource::Synthetic { seed } => write!(f, "synthetic (seed {})", seed),
        }
    }
}

/// Feature matrix, target vector and feature names
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// One row per frame, one column per feature
    pub features: Array2<f64>,
    /// Importance score per frame
    pub target: Array1<f64>,
    /// Column names of `features`
    pub feature_names: Vec<String>,
}

impl Dataset {
    /// Assemble a dataset, checking that the parts agree in shape
    pub fn new(features: Array2<f64>, target: Array1<f64>, feature_names: Vec<String>) -> Result<Self> {
        if features.nrows() != target.len() {
            return Err(FrameImportanceError::ShapeError {
                expected: format!("{} targets", features.nrows()),
                actual: format!("{} targets", target.len()),
            });
        }
        if features.ncols() != feature_names.len() {
            return Err(FrameImportanceError::ShapeError {
                expected: format!("{} feature names", features.ncols()),
                actual: format!("{} feature names", feature_names.len()),
            });
        }
        Ok(Self {
            features,
            target,
            feature_names,
        })
    }

    /// Extract the frame features and importance score from a DataFrame.
    ///
    /// Columns beyond [`FEATURE_COLUMNS`] and [`TARGET_COLUMN`] are ignored.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        if df.height() == 0 {
            return Err(FrameImportanceError::EmptyDataset(
                "training data has no rows".to_string(),
            ));
        }

        let feature_names: Vec<String> = FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect();
        let features = columns_to_array2(df, &feature_names)?;
        let target = Array1::from_vec(column_to_vec(df, TARGET_COLUMN)?);

        Self::new(features, target, feature_names)
    }

    /// Number of samples
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    /// Rows at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select(Axis(0), indices),
            target: self.target.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }
}

/// Read one column as `f64`, rejecting missing or non-numeric cells
fn column_to_vec(df: &DataFrame, col_name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(col_name)
        .map_err(|_| FrameImportanceError::ColumnNotFound(col_name.to_string()))?;
    let column_f64 = column.cast(&DataType::Float64)?;

    let nulls = column_f64.null_count();
    if nulls > 0 {
        return Err(FrameImportanceError::DataError(format!(
            "column {} has {} missing or non-numeric values",
            col_name, nulls
        )));
    }

    Ok(column_f64
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Extract named columns from a DataFrame into a row-major Array2<f64>.
fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<Array2<f64>> {
    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|name| column_to_vec(df, name))
        .collect::<Result<_>>()?;

    Ok(Array2::from_shape_fn((df.height(), col_names.len()), |(r, c)| col_data[c][r]))
}
