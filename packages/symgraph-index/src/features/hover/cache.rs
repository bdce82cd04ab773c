//! Keyed result caches
//!
//! Memoizes expensive, frequently repeated payloads (formatted hovers,
//! package metadata) by symbol identity. At-most-once insertion per key
//! under concurrent callers: fast read-locked lookup, compute with no lock
//! held, write-locked re-check-and-insert. Entries are immutable once in.
//! The empty key means "never cache": unrelated local symbols that happen
//! to share a name must not collide on a payload.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::shared::models::NodeId;

#[derive(Default)]
pub struct KeyedIdCache {
    inner: RwLock<FxHashMap<String, NodeId>>,
}

impl KeyedIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached id for `key`, computing on miss
    ///
    /// `compute` may be arbitrarily expensive (signature formatting,
    /// markdown rendering) and runs with no lock held; a raced duplicate
    /// computation loses to the first inserted id. An empty key bypasses
    /// the cache and always recomputes.
    pub fn get_or_create<F>(&self, key: &str, compute: F) -> Result<NodeId>
    where
        F: FnOnce() -> Result<NodeId>,
    {
        if key.is_empty() {
            return compute();
        }

        if let Some(&id) = self.inner.read().get(key) {
            return Ok(id);
        }

        let id = compute()?;

        let mut inner = self.inner.write();
        match inner.get(key) {
            Some(&existing) => Ok(existing),
            None => {
                inner.insert(key.to_string(), id);
                Ok(id)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
