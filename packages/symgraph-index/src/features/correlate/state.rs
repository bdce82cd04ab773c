//! Indexing run state machine
//!
//! Each stage is a full barrier: no package starts stage N+1 until every
//! package finished stage N, because later stages read registries that are
//! only complete once the prior stage ran everywhere. Transitions are
//! strictly forward; a skipped stage is a bug, not an optimization.

use crate::errors::{IndexError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexState {
    Loaded,
    DocumentsEmitted,
    ImportsNormalized,
    Preloaded,
    DefinitionsIndexed,
    ReferencesIndexed,
    Linked,
    Flushed,
}

impl IndexState {
    pub fn name(&self) -> &'static str {
        match self {
            IndexState::Loaded => "loaded",
            IndexState::DocumentsEmitted => "documents-emitted",
            IndexState::ImportsNormalized => "imports-normalized",
            IndexState::Preloaded => "preloaded",
            IndexState::DefinitionsIndexed => "definitions-indexed",
            IndexState::ReferencesIndexed => "references-indexed",
            IndexState::Linked => "linked",
            IndexState::Flushed => "flushed",
        }
    }

    fn successor(&self) -> Option<IndexState> {
        match self {
            IndexState::Loaded => Some(IndexState::DocumentsEmitted),
            IndexState::DocumentsEmitted => Some(IndexState::ImportsNormalized),
            IndexState::ImportsNormalized => Some(IndexState::Preloaded),
            IndexState::Preloaded => Some(IndexState::DefinitionsIndexed),
            IndexState::DefinitionsIndexed => Some(IndexState::ReferencesIndexed),
            IndexState::ReferencesIndexed => Some(IndexState::Linked),
            IndexState::Linked => Some(IndexState::Flushed),
            IndexState::Flushed => None,
        }
    }

    /// Advance to `next`, which must be the immediate successor
    pub fn advance_to(&mut self, next: IndexState) -> Result<()> {
        match self.successor() {
            Some(expected) if expected == next => {
                *self = next;
                Ok(())
            }
            _ => Err(IndexError::correlation(format!(
                "invalid state transition {} -> {}",
                self.name(),
                next.name()
            ))),
        }
    }
}
