//! Regression tree (CART, squared-error criterion)

use crate::error::{FrameImportanceError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Impurity at or below which a node counts as pure
const PURITY_EPS: f64 = f64::EPSILON;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node with prediction value
    Leaf {
        value: f64,
        n_samples: usize,
    },
    /// Internal node with split
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        n_samples: usize,
        impurity: f64,
    },
}

/// Running sums over a set of targets.
///
/// Sums are taken over `v - shift`. The variance does not depend on the
/// shift, and with the shift near the mean the squares stay small even
/// for targets with a large common offset.
#[derive(Debug, Clone, Copy, Default)]
struct NodeStats {
    shift: f64,
    count: usize,
    sum: f64,
    sq_sum: f64,
}

impl NodeStats {
    fn with_shift(shift: f64) -> Self {
        Self {
            shift,
            ..Self::default()
        }
    }

    fn from_indices(y: &Array1<f64>, indices: &[usize]) -> Self {
        let shift = if indices.is_empty() {
            0.0
        } else {
            indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
        };
        indices.iter().fold(Self::with_shift(shift), |mut acc, &i| {
            acc.push(y[i]);
            acc
        })
    }

    fn push(&mut self, v: f64) {
        let d = v - self.shift;
        self.count += 1;
        self.sum += d;
        self.sq_sum += d * d;
    }

    /// Stats of the samples in `self` but not in `other` (same shift)
    fn minus(&self, other: &Self) -> Self {
        Self {
            shift: self.shift,
            count: self.count - other.count,
            sum: self.sum - other.sum,
            sq_sum: self.sq_sum - other.sq_sum,
        }
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.shift + self.sum / self.count as f64
        }
    }

    /// Var = E[D²] - E[D]², D = v - shift
    fn impurity(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        (self.sq_sum / n - (self.sum / n).powi(2)).max(0.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature_idx: usize,
    threshold: f64,
    gain: f64,
}

/// Regression tree model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Tree root
    root: Option<TreeNode>,
    /// Maximum depth
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Candidate features per split (None = all)
    pub max_features: Option<usize>,
    /// Seed for candidate feature sampling
    pub random_state: u64,
    /// Number of features
    n_features: usize,
    /// Feature importances
    feature_importances: Option<Array1<f64>>,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    /// Create a new regression tree
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            random_state: 0,
            n_features: 0,
            feature_importances: None,
        }
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
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

    /// Set number of candidate features per split
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Set random state
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Fit the tree to training data
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.random_state);
        self.fit_with_rng(x, y, &mut rng)
    }

    /// Fit using a caller-owned generator for feature sampling
    pub(crate) fn fit_with_rng(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        rng: &mut ChaCha8Rng,
    ) -> Result<&mut Self> {
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
                "cannot fit a tree on {} samples × {} features",
                n_samples, n_features
            )));
        }

        self.n_features = n_features;

        let mut importances = vec![0.0; n_features];
        let indices: Vec<usize> = (0..n_samples).collect();
        self.root = Some(self.build_tree(x, y, &indices, 0, &mut importances, rng));

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for imp in &mut importances {
                *imp /= total;
            }
        }
        self.feature_importances = Some(Array1::from_vec(importances));

        Ok(self)
    }

    fn build_tree(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        depth: usize,
        importances: &mut [f64],
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let stats = NodeStats::from_indices(y, indices);
        let n_samples = stats.count;
        let impurity = stats.impurity();

        let should_stop = n_samples < self.min_samples_split
            || n_samples < 2 * self.min_samples_leaf
            || self.max_depth.map_or(false, |d| depth >= d)
            || impurity <= PURITY_EPS;

        let leaf = TreeNode::Leaf {
            value: stats.mean(),
            n_samples,
        };
        if should_stop {
            return leaf;
        }

        let Some(best) = self.find_best_split(x, y, indices, &stats, rng) else {
            return leaf;
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| x[[i, best.feature_idx]] <= best.threshold);

        importances[best.feature_idx] += n_samples as f64 * best.gain;

        let left = Box::new(self.build_tree(x, y, &left_indices, depth + 1, importances, rng));
        let right = Box::new(self.build_tree(x, y, &right_indices, depth + 1, importances, rng));

        TreeNode::Split {
            feature_idx: best.feature_idx,
            threshold: best.threshold,
            left,
            right,
            n_samples,
            impurity,
        }
    }

    fn candidate_features(&self, n_features: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
        match self.max_features {
            Some(k) if k < n_features => {
                let mut picked = index::sample(rng, n_features, k.max(1)).into_vec();
                picked.sort_unstable();
                picked
            }
            _ => (0..n_features).collect(),
        }
    }

    /// Sort-and-sweep search over every candidate feature.
    fn find_best_split(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        parent: &NodeStats,
        rng: &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let n = parent.count as f64;
        let parent_impurity = parent.impurity();
        let mut best: Option<BestSplit> = None;
        let mut column: Vec<(f64, f64)> = Vec::with_capacity(indices.len());

        for feature_idx in self.candidate_features(x.ncols(), rng) {
            column.clear();
            column.extend(indices.iter().map(|&i| (x[[i, feature_idx]], y[i])));
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = NodeStats::with_shift(parent.shift);
            for pos in 0..column.len() - 1 {
                let (value, target) = column[pos];
                left.push(target);

                let next_value = column[pos + 1].0;
                if value == next_value {
                    continue;
                }

                let right = parent.minus(&left);
                if left.count < self.min_samples_leaf || right.count < self.min_samples_leaf {
                    continue;
                }

                let weighted = (left.count as f64 * left.impurity()
                    + right.count as f64 * right.impurity())
                    / n;
                let gain = parent_impurity - weighted;

                if gain > 0.0 && best.map_or(true, |b| gain > b.gain) {
                    let mut threshold = value + (next_value - value) / 2.0;
                    if threshold >= next_value {
                        threshold = value;
                    }
                    best = Some(BestSplit {
                        feature_idx,
                        threshold,
                        gain,
                    });
                }
            }
        }

        best
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let root = self.root.as_ref().ok_or(FrameImportanceError::ModelNotFitted)?;

        if x.ncols() != self.n_features {
            return Err(FrameImportanceError::ShapeError {
                expected: format!("{} features", self.n_features),
                actual: format!("{} features", x.ncols()),
            });
        }

        Ok(x.outer_iter().map(|row| Self::predict_sample(root, &row)).collect())
    }

    fn predict_sample(root: &TreeNode, sample: &ArrayView1<f64>) -> f64 {
        let mut node = root;
        loop {
            match node {
                TreeNode::Leaf { value, .. } => return *value,
                TreeNode::Split { feature_idx, threshold, left, right, .. } => {
                    node = if sample[*feature_idx] <= *threshold { &**left } else { &**right };
                }
            }
        }
    }

    /// Get feature importances
    pub fn feature_importances(&self) -> Option<&Array1<f64>> {
        self.feature_importances.as_ref()
    }

    /// Get tree depth (a lone leaf has depth 0)
    pub fn get_depth(&self) -> usize {
        match &self.root {
            None => 0,
            Some(node) => Self::node_depth(node),
        }
    }

    fn node_depth(node: &TreeNode) -> usize {
        match node {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => {
                1 + Self::node_depth(left).max(Self::node_depth(right))
            }
        }
    }

    /// Get number of leaves
    pub fn get_n_leaves(&self) -> usize {
        match &self.root {
            None => 0,
            Some(node) => Self::count_leaves(node),
        }
    }

    fn count_leaves(node: &TreeNode) -> usize {
        match node {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => {
                Self::count_leaves(left) + Self::count_leaves(right)
            }
        }
    }
}
