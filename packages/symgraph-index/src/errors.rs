//! Error types for symgraph-index
//!
//! Provides unified error handling across the crate. Per-unit-of-work
//! failures are aggregated rather than first-error-only: an indexing run
//! schedules every unit to completion and then fails if any unit failed.

use parking_lot::Mutex;
use thiserror::Error;

/// Main error type for indexing operations
#[derive(Debug, Error)]
pub enum IndexError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source model provider could not resolve a package (fatal)
    #[error("front end failure: {0}")]
    FrontEnd(String),

    /// Graph sink rejected an element or failed to flush
    #[error("sink error: {0}")]
    Sink(String),

    /// Correlation error (inconsistent semantic model that cannot be dropped)
    #[error("correlation error: {0}")]
    Correlation(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Multiple unit-of-work failures from one run
    #[error("{} indexing failure(s): {}", .0.len(), format_aggregate(.0))]
    Aggregate(Vec<IndexError>),
}

impl IndexError {
    /// Create a front-end failure
    pub fn front_end(msg: impl Into<String>) -> Self {
        IndexError::FrontEnd(msg.into())
    }

    /// Create a sink error
    pub fn sink(msg: impl Into<String>) -> Self {
        IndexError::Sink(msg.into())
    }

    /// Create a correlation error
    pub fn correlation(msg: impl Into<String>) -> Self {
        IndexError::Correlation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        IndexError::Config(msg.into())
    }
}

fn format_aggregate(errors: &[IndexError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for indexing operations
pub type Result<T> = std::result::Result<T, IndexError>;

/// Collects failures from parallel units of work.
///
/// Recording never blocks scheduling: remaining units still run to
/// completion, and the run as a whole fails if anything was recorded.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Mutex<Vec<IndexError>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one unit-of-work failure
    pub fn record(&self, error: IndexError) {
        self.errors.lock().push(error);
    }

    /// Number of recorded failures
    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    /// Consume the collector: Ok(()) when clean, the aggregate error otherwise
    pub fn into_result(self) -> Result<()> {
        let errors = self.errors.into_inner();
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.into_iter().next().unwrap()),
            _ => Err(IndexError::Aggregate(errors)),
        }
    }
}
