//! Ancestor doc ring
//!
//! Fixed-capacity ring of doc texts carried down the proximity walk. A
//! descendant's doc replaces its ancestor's only when the descendant
//! actually has text, so `nearest` always answers "the most specific
//! non-empty doc on the path from the root to here". The fixed capacity
//! bounds the per-frame copy cost on deep trees.

pub const DOC_RING_CAPACITY: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct DocRing {
    slots: [Option<String>; DOC_RING_CAPACITY],
    head: usize,
}

impl DocRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a more specific doc text; empty text never displaces anything
    pub fn push(&mut self, doc: &str) {
        if doc.is_empty() {
            return;
        }
        self.slots[self.head] = Some(doc.to_string());
        self.head = (self.head + 1) % DOC_RING_CAPACITY;
    }

    /// Most specific doc recorded so far
    pub fn nearest(&self) -> Option<&str> {
        let last = (self.head + DOC_RING_CAPACITY - 1) % DOC_RING_CAPACITY;
        self.slots[last].as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring() {
        assert!(DocRing::new().nearest().is_none());
    }

    #[test]
    fn test_descendant_wins() {
        let mut ring = DocRing::new();
        ring.push("package docs");
        ring.push("func docs");
        assert_eq!(ring.nearest(), Some("func docs"));
    }

    #[test]
    fn test_empty_doc_keeps_ancestor() {
        let mut ring = DocRing::new();
        ring.push("decl group docs");
        ring.push("");
        assert_eq!(ring.nearest(), Some("decl group docs"));
    }

    #[test]
    fn test_wraps_past_capacity() {
        let mut ring = DocRing::new();
        for doc in ["a", "b", "c", "d", "e"] {
            ring.push(doc);
        }
        assert_eq!(ring.nearest(), Some("e"));
    }
}
