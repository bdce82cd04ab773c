//! Top-level indexing pipeline
//!
//! Wires a source-model provider, dependency metadata, and a graph sink
//! into one correlation run. The run executes inside a dedicated rayon
//! pool; each engine stage drains fully before the next starts.

use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::IndexConfig;
use crate::errors::{IndexError, Result};
use crate::features::correlate::{CorrelationEngine, IndexStats};
use crate::features::emit::Emitter;
use crate::pipeline::runner::{build_pool, CountingProgress};
use crate::shared::ports::{
    DependencyMetadataProvider, GraphSink, NullProgress, ProgressReporter, SourceModelProvider,
};
use crate::shared::utils::stage_workers;

pub struct Indexer {
    provider: Arc<dyn SourceModelProvider>,
    dependencies: Arc<dyn DependencyMetadataProvider>,
    sink: Arc<dyn GraphSink>,
    progress: Arc<dyn ProgressReporter>,
    config: IndexConfig,
}

impl Indexer {
    pub fn new(
        provider: Arc<dyn SourceModelProvider>,
        dependencies: Arc<dyn DependencyMetadataProvider>,
        sink: Arc<dyn GraphSink>,
        config: IndexConfig,
    ) -> Self {
        Self {
            provider,
            dependencies,
            sink,
            progress: Arc::new(NullProgress),
            config,
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Run the full pipeline over the project rooted at `root`
    ///
    /// All-or-nothing: any unit failure fails the run after its stage
    /// drains, and every collected error is surfaced in the aggregate.
    pub fn run(&self, root: &str) -> Result<IndexStats> {
        if self.config.project_name.is_empty() {
            return Err(IndexError::config("project name must not be empty"));
        }

        let started = Instant::now();
        let mut project = self.provider.load(root)?;
        let files: usize = project
            .packages
            .iter()
            .map(|package| package.files.len())
            .sum();
        let packages = project.packages.len() as u64;
        info!(
            root,
            packages,
            files,
            "loaded project model"
        );

        let workers = stage_workers(self.config.effective_workers(), files);
        let pool = build_pool(workers)?;

        let progress = Arc::new(CountingProgress::new(self.progress.clone()));
        let emitter = Arc::new(Emitter::new(self.sink.clone()));
        let engine = CorrelationEngine::new(
            emitter,
            self.config.clone(),
            self.dependencies.clone(),
            progress.clone(),
        );

        let stats = pool.install(|| -> Result<IndexStats> {
            engine.emit_documents(&project)?;
            engine.normalize_imports(&mut project)?;
            let proximity = engine.preload(&project)?;
            engine.index_definitions(&project, &proximity)?;
            engine.index_references(&project)?;
            engine.link()?;
            engine.build_implementations(&project)?;
            engine.emit_contains()?;
            engine.flush()?;
            Ok(engine.stats(packages))
        })?;

        info!(
            elements = stats.elements,
            definitions = stats.definitions,
            references = stats.references,
            external_references = stats.external_references,
            implementations = stats.implementations,
            dropped = stats.dropped_symbols,
            units = progress.units(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "indexing run complete"
        );
        Ok(stats)
    }
}
