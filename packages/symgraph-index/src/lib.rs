/*
 * Symgraph Index - Cross-Reference Graph Indexer
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (symbols, spans, graph elements) and ports
 * - features/    : Vertical slices (emit → registry → preload → correlate)
 * - pipeline/    : Run orchestration
 *
 * Concurrency model:
 * - Rayon work-stealing inside each stage
 * - Stage barriers between passes; registries are append-during-one-stage,
 *   read-after-barrier
 * - One atomic id counter; ids unique and monotonic across all workers
 */

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models, ports and utilities
pub mod shared;

/// Feature modules (correlation pipeline stages)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::IndexConfig;
pub use errors::{IndexError, Result};
pub use features::correlate::{IndexState, IndexStats};
pub use pipeline::Indexer;
pub use shared::models::{Element, Payload, Span, SymbolInfo, SymbolKind};
pub use shared::ports::{
    DependencyMetadataProvider, GraphSink, MapDependencyProvider, MemorySink, NullProgress,
    ProgressReporter, SourceModelProvider,
};
