//! Indexing run configuration
//!
//! Builder-style knobs for one indexing run. Defaults match the common
//! case: worker count from available cores, dropped-symbol warnings off.

/// Configuration for one indexing run
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Project name recorded in the project's package-information node
    pub project_name: String,

    /// Project version recorded in the project's package-information node
    pub project_version: String,

    /// Moniker scheme attached to export/import monikers
    pub moniker_scheme: String,

    /// Worker pool size; None means derive from available cores
    pub workers: Option<usize>,

    /// Emit a warning when a malformed declaration is dropped
    pub warn_dropped_symbols: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            project_version: "0.0.0".to_string(),
            moniker_scheme: "symgraph".to_string(),
            workers: None,
            warn_dropped_symbols: false,
        }
    }
}

impl IndexConfig {
    pub fn new(project_name: impl Into<String>, project_version: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            project_version: project_version.into(),
            ..Self::default()
        }
    }

    /// Override the worker pool size
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }

    /// Enable/disable warnings for dropped malformed declarations
    pub fn with_dropped_symbol_warnings(mut self, enabled: bool) -> Self {
        self.warn_dropped_symbols = enabled;
        self
    }

    /// Override the moniker scheme
    pub fn with_moniker_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.moniker_scheme = scheme.into();
        self
    }

    /// Effective worker count for this run
    ///
    /// An explicit override wins; otherwise sized from detected hardware
    /// parallelism.
    pub fn effective_workers(&self) -> usize {
        self.workers
            .unwrap_or_else(crate::shared::utils::default_workers)
            .max(1)
    }
}
