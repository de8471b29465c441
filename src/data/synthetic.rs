//! Sample frame data used when no annotated CSV is available

use super::dataset::{FEATURE_COLUMNS, TARGET_COLUMN};
use crate::error::{FrameImportanceError, Result};
use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Rows generated by default
pub const SAMPLE_SIZE: usize = 1000;

/// Seed of the default sample set
pub const SAMPLE_SEED: u64 = 42;

/// 16:9
pub const ASPECT_RATIO_16_9: f64 = 1.778;

/// Score bonus for frames flagged as key frames
pub const KEY_FRAME_BONUS: f64 = 0.15;

/// Standard deviation of the score noise
pub const NOISE_STD: f64 = 0.05;

/// Weights of the linear score model, in [`FEATURE_COLUMNS`] order.
///
/// Brightness enters as its distance from 0.5; aspect ratio does not
/// contribute.
const SCORE_WEIGHTS: [f64; 6] = [0.30, 0.15, 0.25, 0.10, 0.20, 0.0];

/// Deterministic generator of annotated frames
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    n_samples: usize,
    seed: u64,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleGenerator {
    /// Generator for the default 1000-row sample set
    pub fn new() -> Self {
        Self {
            n_samples: SAMPLE_SIZE,
            seed: SAMPLE_SEED,
        }
    }

    /// Set number of rows
    pub fn with_n_samples(mut self, n: usize) -> Self {
        self.n_samples = n;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Importance score of one frame before noise and clipping
    pub fn base_score(features: &[f64; 6], is_key_frame: bool) -> f64 {
        let [visual_complexity, color_variance, edge_density, brightness, contrast, aspect_ratio] =
            *features;
        let adjusted = [
            visual_complexity,
            color_variance,
            edge_density,
            (brightness - 0.5).abs(),
            contrast,
            aspect_ratio,
        ];
        let linear: f64 = adjusted.iter().zip(SCORE_WEIGHTS.iter()).map(|(v, w)| v * w).sum();
        if is_key_frame {
            linear + KEY_FRAME_BONUS
        } else {
            linear
        }
    }

    /// Generate the sample frames.
    ///
    /// Columns are drawn one after another from a single seeded generator,
    /// so the output is bit-identical for a given seed and size.
    pub fn generate(&self) -> Result<DataFrame> {
        let n = self.n_samples;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let frame_index: Vec<i64> = (0..n as i64).collect();
        let timestamp: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..300.0)).collect();
        let is_key_frame: Vec<bool> = (0..n).map(|_| rng.gen_bool(0.5)).collect();
        let visual_complexity: Vec<f64> = (0..n).map(|_| rng.gen_range(0.3..0.9)).collect();
        let color_variance: Vec<f64> = (0..n).map(|_| rng.gen_range(0.2..0.8)).collect();
        let edge_density: Vec<f64> = (0..n).map(|_| rng.gen_range(0.1..0.9)).collect();
        let brightness: Vec<f64> = (0..n).map(|_| rng.gen_range(0.2..0.9)).collect();
        let contrast: Vec<f64> = (0..n).map(|_| rng.gen_range(0.3..0.8)).collect();
        let aspect_ratio: Vec<f64> = vec![ASPECT_RATIO_16_9; n];

        let noise = Normal::new(0.0, NOISE_STD)
            .map_err(|e| FrameImportanceError::DataError(e.to_string()))?;

        let importance: Vec<f64> = (0..n)
            .map(|i| {
                let features = [
                    visual_complexity[i],
                    color_variance[i],
                    edge_density[i],
                    brightness[i],
                    contrast[i],
                    aspect_ratio[i],
                ];
                let score = Self::base_score(&features, is_key_frame[i]) + noise.sample(&mut rng);
                score.clamp(0.0, 1.0)
            })
            .collect();

        let columns = vec![
            Column::new("FrameIndex".into(), frame_index),
            Column::new("Timestamp".into(), timestamp),
            Column::new("IsKeyFrame".into(), is_key_frame),
            Column::new(FEATURE_COLUMNS[0].into(), visual_complexity),
            Column::new(FEATURE_COLUMNS[1].into(), color_variance),
            Column::new(FEATURE_COLUMNS[2].into(), edge_density),
            Column::new(FEATURE_COLUMNS[3].into(), brightness),
            Column::new(FEATURE_COLUMNS[4].into(), contrast),
            Column::new(FEATURE_COLUMNS[5].into(), aspect_ratio),
            Column::new(TARGET_COLUMN.into(), importance),
        ];

        Ok(DataFrame::new(columns)?)
    }
}

/// The default 1000-row sample set
pub fn create_sample_data() -> Result<DataFrame> {
    SampleGenerator::new().generate()
}
