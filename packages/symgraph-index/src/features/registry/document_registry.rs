//! Document registry
//!
//! One `DocumentInfo` per in-project source file, created when documents
//! are emitted and append-only until the containment pass reads it.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::shared::models::NodeId;

/// Per-document accumulation for the final contains edge
#[derive(Debug)]
pub struct DocumentInfo {
    pub id: NodeId,
    pub path: String,
    definition_ranges: Mutex<Vec<NodeId>>,
    reference_ranges: Mutex<Vec<NodeId>>,
}

impl DocumentInfo {
    pub fn new(id: NodeId, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            definition_ranges: Mutex::new(Vec::new()),
            reference_ranges: Mutex::new(Vec::new()),
        }
    }

    pub fn add_definition_range(&self, range_id: NodeId) {
        self.definition_ranges.lock().push(range_id);
    }

    pub fn add_reference_range(&self, range_id: NodeId) {
        self.reference_ranges.lock().push(range_id);
    }

    /// Union of definition and reference ranges, deduplicated and sorted
    ///
    /// A range claimed as both definition and reference (self-reference)
    /// must appear once in the contains edge.
    pub fn contained_ranges(&self) -> Vec<NodeId> {
        let mut ranges: Vec<NodeId> = self
            .definition_ranges
            .lock()
            .iter()
            .chain(self.reference_ranges.lock().iter())
            .copied()
            .collect();
        ranges.sort_unstable();
        ranges.dedup();
        ranges
    }
}

#[derive(Default)]
pub struct DocumentRegistry {
    inner: DashMap<String, Arc<DocumentInfo>>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document on first encounter; existing entries win
    pub fn insert(&self, path: &str, id: NodeId) -> Arc<DocumentInfo> {
        Arc::clone(
            &self
                .inner
                .entry(path.to_string())
                .or_insert_with(|| Arc::new(DocumentInfo::new(id, path))),
        )
    }

    pub fn get(&self, path: &str) -> Option<Arc<DocumentInfo>> {
        self.inner.get(path).map(|entry| Arc::clone(&entry))
    }

    /// All documents, ordered by path for deterministic containment output
    pub fn all(&self) -> Vec<Arc<DocumentInfo>> {
        let mut documents: Vec<Arc<DocumentInfo>> =
            self.inner.iter().map(|entry| Arc::clone(&entry)).collect();
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        documents
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let registry = DocumentRegistry::new();
        let first = registry.insert("a.go", 1);
        let second = registry.insert("a.go", 99);
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_contained_ranges_deduplicated() {
        let doc = DocumentInfo::new(1, "a.go");
        doc.add_definition_range(5);
        doc.add_reference_range(5);
        doc.add_reference_range(3);
        assert_eq!(doc.contained_ranges(), vec![3, 5]);
    }

    #[test]
    fn test_all_sorted_by_path() {
        let registry = DocumentRegistry::new();
        registry.insert("b.go", 2);
        registry.insert("a.go", 1);
        let documents = registry.all();
        let paths: Vec<&str> = documents.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["a.go", "b.go"]);
    }
}
