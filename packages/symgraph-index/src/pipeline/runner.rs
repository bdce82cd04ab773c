//! Pool construction and progress accounting for one indexing run

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::errors::{IndexError, Result};
use crate::shared::ports::ProgressReporter;

/// Build the rayon pool every stage of the run executes in
pub fn build_pool(workers: usize) -> Result<rayon::ThreadPool> {
    debug!(workers, "building stage pool");
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("symgraph-worker-{}", index))
        .build()
        .map_err(|error| IndexError::config(error.to_string()))
}

/// Forwards to an inner reporter while keeping a total unit count
pub struct CountingProgress {
    inner: Arc<dyn ProgressReporter>,
    units: AtomicU64,
}

impl CountingProgress {
    pub fn new(inner: Arc<dyn ProgressReporter>) -> Self {
        Self {
            inner,
            units: AtomicU64::new(0),
        }
    }

    /// Units completed across all stages so far
    pub fn units(&self) -> u64 {
        self.units.load(Ordering::Relaxed)
    }
}

impl ProgressReporter for CountingProgress {
    fn started(&self, name: &str) {
        self.inner.started(name);
    }

    fn advanced(&self, count: u64) {
        self.units.fetch_add(count, Ordering::Relaxed);
        self.inner.advanced(count);
    }

    fn finished(&self, name: &str) {
        self.inner.finished(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ports::NullProgress;

    #[test]
    fn test_counting_progress_accumulates() {
        let progress = CountingProgress::new(Arc::new(NullProgress));
        progress.started("stage");
        progress.advanced(3);
        progress.advanced(2);
        progress.finished("stage");
        assert_eq!(progress.units(), 5);
    }

    #[test]
    fn test_pool_respects_worker_count() {
        let pool = build_pool(2).unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }
}
