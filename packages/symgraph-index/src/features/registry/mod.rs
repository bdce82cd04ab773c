//! Concurrent, idempotent registries
//!
//! Ranges shard locks by filename, definitions by symbol kind, documents
//! by path. Every registry is append-during-one-stage, read-after-barrier.

pub mod definition_registry;
pub mod document_registry;
pub mod range_registry;

pub use definition_registry::{DefinitionIndex, DefinitionInfo, DefinitionRegistry};
pub use document_registry::{DocumentInfo, DocumentRegistry};
pub use range_registry::RangeRegistry;
