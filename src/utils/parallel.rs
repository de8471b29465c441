//! Worker pool configuration

use crate::error::{FrameImportanceError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for parallel processing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Number of workers (None = use all available)
    pub n_threads: Option<usize>,
}

impl ParallelConfig {
    /// Use every available worker
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of workers
    pub fn with_threads(mut self, n: usize) -> Self {
        self.n_threads = Some(n);
        self
    }

    /// Get the number of workers that will run the job
    pub fn num_threads(&self) -> usize {
        self.n_threads.unwrap_or_else(rayon::current_num_threads)
    }

    /// Run `op` on the configured pool.
    ///
    /// With no explicit worker count the global rayon pool is used; otherwise
    /// a dedicated pool of the requested size is built for the duration of
    /// the call.
    pub fn install<R, F>(&self, op: F) -> Result<R>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match self.n_threads {
            None => Ok(op()),
            Some(0) => Err(FrameImportanceError::invalid_parameter(
                "n_jobs",
                0,
                "must be at least 1",
            )),
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| FrameImportanceError::TrainingError(e.to_string()))?;
                Ok(pool.install(op))
            }
        }
    }
}
