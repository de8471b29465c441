//! Frame importance trainer CLI
//!
//! One command, no subcommands: load → split → fit → report → save.

use anyhow::Context;
use clap::Parser;
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::data::{train_test_split, DataLoader, DataSource, SampleGenerator};
use crate::export::{save_model, ModelArtifact, ModelMetadata};
use crate::training::{
    TrainEngine, TrainingConfig, TrainingReport, DEFAULT_DATA_PATH, DEFAULT_OUTPUT_PATH,
    DEFAULT_TEST_SIZE,
};
use crate::utils::Timer;

// ─── Styling helpers ───────────────────────────────────────────────────────────

const RULE_WIDTH: usize = 60;
const NAME_WIDTH: usize = 20;

fn muted(s: &str) -> ColoredString { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString    { s.truecolor(100, 210, 120) }
fn warn(s: &str) -> ColoredString  { s.truecolor(230, 180, 80) }

fn rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn banner(out: &mut impl Write, title: &str, style: fn(&str) -> ColoredString) -> io::Result<()> {
    rule(out)?;
    writeln!(out, "{}", style(title).bold())?;
    rule(out)
}

fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title.white().bold())
}

fn metric_line(out: &mut impl Write, label: &str, value: f64) -> io::Result<()> {
    writeln!(out, "  {} {}", muted(label), format!("{:.4}", value).white().bold())
}

/// `['a', 'b']`
fn name_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug, Clone)]
#[command(name = "train-frame-importance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train frame importance prediction model")]
#[command(long_about = None)]
pub struct Cli {
    /// Path to training data CSV file
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Path to save trained model
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: PathBuf,

    /// Proportion of data to use for testing
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
    pub test_size: f64,
}

impl Cli {
    /// Training configuration for the parsed flags
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig::new(self.data_path.clone(), self.output_path.clone()).with_test_size(self.test_size)
    }
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub source: DataSource,
    pub n_samples: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub report: TrainingReport,
    pub bytes_written: u64,
}

// ─── Report ────────────────────────────────────────────────────────────────────

/// Write the metrics and ranked importances of a fit
pub fn print_report(out: &mut impl Write, report: &TrainingReport) -> io::Result<()> {
    section(out, "Training Results:")?;
    metric_line(out, "Train MSE:", report.train_metrics.mse)?;
    metric_line(out, "Test MSE: ", report.test_metrics.mse)?;
    metric_line(out, "Train R²: ", report.train_metrics.r2)?;
    metric_line(out, "Test R²:  ", report.test_metrics.r2)?;

    section(out, "Feature Importances:")?;
    for feature in &report.feature_importances {
        writeln!(
            out,
            "  {:<width$}: {:.4}",
            feature.name,
            feature.importance,
            width = NAME_WIDTH
        )?;
    }
    Ok(())
}

// ─── Command ───────────────────────────────────────────────────────────────────

/// Run the whole training pipeline, reporting on stdout
pub fn cmd_train(config: &TrainingConfig) -> anyhow::Result<TrainingOutcome> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_training(config, &mut out)
}

/// Run the whole training pipeline described by `config`, writing the
/// report to `out`
pub fn run_training(config: &TrainingConfig, out: &mut impl Write) -> anyhow::Result<TrainingOutcome> {
    config.validate()?;
    let run_timer = Timer::start("training run");

    banner(out, "Frame Importance Model Training", |s| s.white())?;

    writeln!(out, "Loading training data from {}...", config.data_path.display())?;
    let loader = DataLoader::new()
        .with_sample_generator(SampleGenerator::new().with_seed(config.sample_seed));
    let loaded = loader
        .load_training_data(&config.data_path)
        .with_context(|| format!("failed to load training data from {}", config.data_path.display()))?;

    if loaded.source.is_synthetic() {
        writeln!(
            out,
            "{}",
            warn(&format!("Error: Training data file not found: {}", config.data_path.display()))
        )?;
        writeln!(out, "Creating sample training data...")?;
    }

    let dataset = loaded.dataset;
    writeln!(out, "Dataset size: {} samples", dataset.n_samples())?;
    writeln!(out, "Features: {}", name_list(&dataset.feature_names))?;

    let (train, test) = train_test_split(&dataset, config.test_size, config.split_seed)
        .context("failed to split training data")?;
    writeln!(out, "Training set: {} samples", train.n_samples())?;
    writeln!(out, "Test set: {} samples", test.n_samples())?;

    writeln!(out, "Training Random Forest model...")?;
    let mut engine = TrainEngine::new(config.forest.clone());
    let report = engine
        .fit(&train, &test)
        .context("failed to train random forest")?
        .clone();
    print_report(out, &report)?;

    let model = engine
        .into_model()
        .context("training finished without a fitted model")?;
    let metadata = ModelMetadata::new("frame-importance", &model, dataset.feature_names.clone())
        .with_report(&report)
        .with_data_source(loaded.source.clone());
    let artifact = ModelArtifact::new(metadata, model)?;
    let bytes_written = save_model(&artifact, &config.output_path)
        .with_context(|| format!("failed to save model to {}", config.output_path.display()))?;

    writeln!(out)?;
    writeln!(out, "Model saved to: {}", config.output_path.display())?;

    writeln!(out)?;
    banner(out, "Training complete!", ok)?;
    out.flush()?;
    run_timer.stop();

    Ok(TrainingOutcome {
        source: loaded.source,
        n_samples: dataset.n_samples(),
        n_train: train.n_samples(),
        n_test: test.n_samples(),
        report,
        bytes_written,
    })
}
