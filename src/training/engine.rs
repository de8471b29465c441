//! Training engine: fit, evaluate, rank importances

use super::config::ForestConfig;
use super::metrics::RegressionMetrics;
use super::random_forest::RandomForest;
use crate::data::Dataset;
use crate::error::{FrameImportanceError, Result};
use crate::utils::Timer;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Importance of one named feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub name: String,
    pub importance: f64,
}

/// Everything the trainer reports about one fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Metrics on the subset the forest was fitted on
    pub train_metrics: RegressionMetrics,
    /// Metrics on the held-out subset
    pub test_metrics: RegressionMetrics,
    /// Importances, most important first
    pub feature_importances: Vec<FeatureImportance>,
    /// Number of trees in the fitted forest
    pub n_trees: usize,
    /// Wall-clock fit time
    pub training_time_secs: f64,
}

/// Pair names with importances and sort descending.
///
/// Ties keep column order.
pub fn rank_importances(names: &[String], importances: &Array1<f64>) -> Vec<FeatureImportance> {
    let mut ranked: Vec<FeatureImportance> = names
        .iter()
        .zip(importances.iter())
        .map(|(name, &importance)| FeatureImportance {
            name: name.clone(),
            importance,
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked
}

/// Main training engine
#[derive(Debug, Clone)]
pub struct TrainEngine {
    config: ForestConfig,
    feature_names: Vec<String>,
    model: Option<RandomForest>,
    report: Option<TrainingReport>,
}

impl TrainEngine {
    /// Create a new training engine
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            feature_names: Vec::new(),
            model: None,
            report: None,
        }
    }

    /// Fit a forest on `train` and score it on both subsets
    pub fn fit(&mut self, train: &Dataset, test: &Dataset) -> Result<&TrainingReport> {
        if train.feature_names != test.feature_names {
            return Err(FrameImportanceError::ShapeError {
                expected: format!("test features {:?}", train.feature_names),
                actual: format!("test features {:?}", test.feature_names),
            });
        }

        let timer = Timer::start("random forest fit");
        let mut model = RandomForest::new(self.config.clone());
        model.fit(&train.features, &train.target)?;
        let training_time_secs = timer.elapsed_secs();
        timer.stop();

        let train_pred = model.predict(&train.features)?;
        let test_pred = model.predict(&test.features)?;
        let train_metrics = RegressionMetrics::compute(&train.target, &train_pred)?;
        let test_metrics = RegressionMetrics::compute(&test.target, &test_pred)?;

        let importances = model
            .feature_importances()
            .ok_or(FrameImportanceError::ModelNotFitted)?;
        let feature_importances = rank_importances(&train.feature_names, importances);

        info!(
            train_mse = train_metrics.mse,
            test_mse = test_metrics.mse,
            train_r2 = train_metrics.r2,
            test_r2 = test_metrics.r2,
            "evaluated random forest"
        );

        self.feature_names = train.feature_names.clone();
        self.report = Some(TrainingReport {
            train_metrics,
            test_metrics,
            feature_importances,
            n_trees: model.n_trees(),
            training_time_secs,
        });
        self.model = Some(model);

        self.report.as_ref().ok_or(FrameImportanceError::ModelNotFitted)
    }

    /// Predict importance scores for a feature matrix
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.model
            .as_ref()
            .ok_or(FrameImportanceError::ModelNotFitted)?
            .predict(x)
    }

    /// Report of the last fit
    pub fn report(&self) -> Option<&TrainingReport> {
        self.report.as_ref()
    }

    /// Fitted forest
    pub fn model(&self) -> Option<&RandomForest> {
        self.model.as_ref()
    }

    /// Take the fitted forest out of the engine
    pub fn into_model(self) -> Option<RandomForest> {
        self.model
    }

    /// Feature names seen during fit
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
