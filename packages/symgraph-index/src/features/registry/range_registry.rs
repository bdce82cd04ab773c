//! Range registry
//!
//! Per-file idempotent mapping from byte offset to range vertex id. The
//! lock table is sharded by filename and created lazily, so unrelated
//! files never contend. Lookup is optimistic-read-then-locked-write: the
//! possibly expensive span computation runs with no lock held, and only
//! the re-check-and-insert (plus the cheap vertex emission that must win
//! or lose atomically with it) happens under the per-file write lock.
//! That keeps the invariant: the sink receives exactly one range record
//! per (file, offset).

use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::features::emit::Emitter;
use crate::shared::models::{NodeId, Span};

type FileRanges = Arc<RwLock<FxHashMap<usize, NodeId>>>;

#[derive(Default)]
pub struct RangeRegistry {
    files: DashMap<String, FileRanges>,
}

impl RangeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn file_ranges(&self, file: &str) -> FileRanges {
        if let Some(existing) = self.files.get(file) {
            return Arc::clone(&existing);
        }
        Arc::clone(
            &self
                .files
                .entry(file.to_string())
                .or_insert_with(Default::default),
        )
    }

    /// Idempotently claim the (file, offset) slot
    ///
    /// The first caller emits the range vertex and wins the id; every other
    /// caller (concurrent or later) gets the cached id with `is_new ==
    /// false`. `render` computes the span outside any lock and may be
    /// expensive; it must not touch this registry.
    pub fn ensure_range<F>(
        &self,
        emitter: &Emitter,
        file: &str,
        offset: usize,
        render: F,
    ) -> Result<(NodeId, bool)>
    where
        F: FnOnce() -> Span,
    {
        let ranges = self.file_ranges(file);

        if let Some(&id) = ranges.read().get(&offset) {
            return Ok((id, false));
        }

        let span = render();

        let mut ranges = ranges.write();
        if let Some(&id) = ranges.get(&offset) {
            // Lost the race; the winner already emitted.
            return Ok((id, false));
        }
        let id = emitter.emit_range(span)?;
        ranges.insert(offset, id);
        Ok((id, true))
    }

    /// Cached id for an already-claimed slot
    pub fn lookup(&self, file: &str, offset: usize) -> Option<NodeId> {
        self.files
            .get(file)
            .and_then(|ranges| ranges.read().get(&offset).copied())
    }

    /// Total claimed ranges across all files
    pub fn len(&self) -> usize {
        self.files.iter().map(|entry| entry.value().read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
