//! Task execution substrate for per-document work.
//!
//! The pipeline never reaches for a global thread pool; it is handed
//! an [`Executor`] that maps a pure function over a batch of inputs
//! and returns the outputs in input order.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::core::error::{IndexError, Result};

/// Maps a function over a batch of items
pub trait Executor: Send + Sync {
    /// Apply `f` to every item; outputs keep the input order
    fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync;

    /// Degree of parallelism
    fn workers(&self) -> usize;
}

/// Runs every task on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        items.into_iter().map(f).collect()
    }

    fn workers(&self) -> usize {
        1
    }
}

/// Runs tasks on a dedicated rayon thread pool
pub struct RayonExecutor {
    pool: ThreadPool,
    workers: usize,
}

impl RayonExecutor {
    /// Build a pool with a fixed number of worker threads
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(IndexError::Config(
                "Worker count must be non-zero".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("indicator-worker-{i}"))
            .build()
            .map_err(|e| IndexError::Config(format!("Failed to build worker pool: {e}")))?;

        tracing::debug!("Started worker pool with {} threads", workers);
        Ok(Self { pool, workers })
    }
}

impl Executor for RayonExecutor {
    fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        self.pool
            .install(|| items.into_par_iter().map(f).collect())
    }

    fn workers(&self) -> usize {
        self.workers
    }
}

impl std::fmt::Debug for RayonExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RayonExecutor")
            .field("workers", &self.workers)
            .finish()
    }
}
