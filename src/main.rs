//! Frame Importance - training entry point
//!
//! Loads annotated frames (or generates sample data), fits the random forest
//! and writes the model artifact.

use clap::Parser;
use frame_importance::cli::{cmd_train, Cli};

fn main() -> anyhow::Result<()> {
    // Logs on stderr, report on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frame_importance=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cmd_train(&cli.training_config())?;

    Ok(())
}
