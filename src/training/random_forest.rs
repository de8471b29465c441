//! Random forest regressor

use super::config::ForestConfig;
use super::decision_tree::DecisionTree;
use crate::error::{FrameImportanceError, Result};
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Random forest model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    /// Individual trees
    trees: Vec<DecisionTree>,
    /// Hyperparameters the forest was (or will be) fitted with
    config: ForestConfig,
    /// Feature importances
    feature_importances: Option<Array1<f64>>,
    /// Number of features
    n_features: usize,
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl RandomForest {
    /// Create an unfitted forest
    pub fn new(config: ForestConfig) -> Self {
        Self {
            trees: Vec::new(),
            config,
            feature_importances: None,
            n_features: 0,
        }
    }

    /// Hyperparameters
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Fit the forest to training data
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        self.config.validate()?;

        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(FrameImportanceError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 || n_features == 0 {
            return Err(FrameImportanceError::EmptyDataset(format!(
                "cannot fit a forest on {} samples × {} features",
                n_samples, n_features
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(FrameImportanceError::TrainingError(
                "input contains NaN or infinite values".to_string(),
            ));
        }

        self.n_features = n_features;
        let max_features = self.config.max_features.resolve(n_features);
        let config = &self.config;

        debug!(
            n_estimators = config.n_estimators,
            n_samples,
            n_features,
            max_features,
            workers = config.n_jobs.num_threads(),
            "fitting random forest"
        );

        let trees: Vec<DecisionTree> = config.n_jobs.install(|| {
            (0..config.n_estimators)
                .into_par_iter()
                .map(|tree_idx| {
                    let seed = config.random_state.wrapping_add(tree_idx as u64);
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);

                    let mut tree = DecisionTree::new()
                        .with_min_samples_split(config.min_samples_split)
                        .with_min_samples_leaf(config.min_samples_leaf)
                        .with_max_features(max_features)
                        .with_random_state(seed);
                    if let Some(d) = config.max_depth {
                        tree = tree.with_max_depth(d);
                    }

                    if config.bootstrap {
                        let sample_indices: Vec<usize> =
                            (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
                        let x_boot = x.select(Axis(0), &sample_indices);
                        let y_boot = y.select(Axis(0), &sample_indices);
                        tree.fit_with_rng(&x_boot, &y_boot, &mut rng)?;
                    } else {
                        tree.fit_with_rng(x, y, &mut rng)?;
                    }

                    Ok(tree)
                })
                .collect::<Result<Vec<DecisionTree>>>()
        })??;

        self.trees = trees;
        self.compute_feature_importances();

        debug!(
            mean_depth = self.trees.iter().map(|t| t.get_depth()).sum::<usize>() as f64
                / self.trees.len() as f64,
            "random forest fitted"
        );

        Ok(self)
    }

    fn compute_feature_importances(&mut self) {
        if self.trees.is_empty() {
            return;
        }

        let mut total_importances = vec![0.0; self.n_features];

        for tree in &self.trees {
            if let Some(imp) = tree.feature_importances() {
                for (total, &val) in total_importances.iter_mut().zip(imp.iter()) {
                    *total += val;
                }
            }
        }

        let n_trees = self.trees.len() as f64;
        for imp in &mut total_importances {
            *imp /= n_trees;
        }

        let total: f64 = total_importances.iter().sum();
        if total > 0.0 {
            for imp in &mut total_importances {
                *imp /= total;
            }
        }

        self.feature_importances = Some(Array1::from_vec(total_importances));
    }

    /// Mean prediction across trees
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(FrameImportanceError::ModelNotFitted);
        }

        let all_predictions: Vec<Array1<f64>> = self
            .trees
            .par_iter()
            .map(|tree| tree.predict(x))
            .collect::<Result<_>>()?;

        let mut sum = Array1::<f64>::zeros(x.nrows());
        for preds in &all_predictions {
            sum += preds;
        }

        Ok(sum / all_predictions.len() as f64)
    }

    /// Get feature importances
    pub fn feature_importances(&self) -> Option<&Array1<f64>> {
        self.feature_importances.as_ref()
    }

    /// Get number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Get number of features seen during fit
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Is the forest fitted
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}
