//! Regression metrics

use crate::error::{FrameImportanceError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Error and variance metrics for one evaluation subset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// Coefficient of determination
    pub r2: f64,
    /// Explained variance score
    pub explained_variance: f64,
    /// Number of evaluated samples
    pub n_samples: usize,
}

impl RegressionMetrics {
    /// Compute regression metrics
    ///
    /// A constant `y_true` has no variance to explain: R² and explained
    /// variance are then 1.0 for a perfect fit and 0.0 otherwise.
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(FrameImportanceError::ShapeError {
                expected: format!("{} predictions", y_true.len()),
                actual: format!("{} predictions", y_pred.len()),
            });
        }
        if y_true.is_empty() {
            return Err(FrameImportanceError::EmptyDataset(
                "cannot score an empty subset".to_string(),
            ));
        }

        let n = y_true.len() as f64;
        let errors: Array1<f64> = y_true - y_pred;

        let mse = errors.mapv(|e| e * e).sum() / n;
        let mae = errors.mapv(f64::abs).sum() / n;

        let y_mean = y_true.sum() / n;
        let ss_tot: f64 = y_true.iter().map(|y| (y - y_mean).powi(2)).sum();
        let ss_res = mse * n;

        let error_mean = errors.sum() / n;
        let ss_err_centered: f64 = errors.iter().map(|e| (e - error_mean).powi(2)).sum();

        let score = |residual: f64| {
            if ss_tot > 0.0 {
                1.0 - residual / ss_tot
            } else if residual == 0.0 {
                1.0
            } else {
                0.0
            }
        };

        Ok(Self {
            mse,
            rmse: mse.sqrt(),
            mae,
            r2: score(ss_res),
            explained_variance: score(ss_err_centered),
            n_samples: y_true.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_regression_metrics() {
        let y_true = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y_pred = array![1.1, 2.0, 2.9, 4.1, 5.0];

        let metrics = RegressionMetrics::compute(&y_true, &y_pred).unwrap();

        assert!((metrics.mse - 0.006).abs() < 1e-12);
        assert!((metrics.rmse - 0.006f64.sqrt()).abs() < 1e-12);
        assert!((metrics.mae - 0.06).abs() < 1e-12);
        assert!(metrics.r2 > 0.99);
        assert_eq!(metrics.n_samples, 5);
    }

    #[test]
    fn test_explained_variance_ignores_bias() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![2.0, 3.0, 4.0, 5.0];

        let metrics = RegressionMetrics::compute(&y_true, &y_pred).unwrap();

        assert!((metrics.explained_variance - 1.0).abs() < 1e-12);
        assert!(metrics.r2 < 1.0);
    }

    #[test]
    fn test_constant_target() {
        let y_true = array![0.5, 0.5, 0.5];
        let perfect = RegressionMetrics::compute(&y_true, &array![0.5, 0.5, 0.5]).unwrap();
        let off = RegressionMetrics::compute(&y_true, &array![0.4, 0.5, 0.6]).unwrap();

        assert_eq!(perfect.r2, 1.0);
        assert_eq!(off.r2, 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(RegressionMetrics::compute(&array![1.0, 2.0], &array![1.0]).is_err());
        let empty = Array1::<f64>::zeros(0);
        assert!(RegressionMetrics::compute(&empty, &empty).is_err());
    }
}
