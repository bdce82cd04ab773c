//! Id-assigning emitter over the graph sink
//!
//! All node ids in the run come from this single atomic counter, so ids
//! are unique and monotonically increasing across every worker. The
//! emitter never holds a lock of its own; the sink synchronizes itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::errors::Result;
use crate::shared::models::{
    Edge, Element, HoverContent, ItemProperty, MonikerKind, NodeId, Span, Vertex,
};
use crate::shared::ports::GraphSink;

pub struct Emitter {
    sink: Arc<dyn GraphSink>,
    next_id: AtomicU64,
    emitted: AtomicU64,
}

impl Emitter {
    pub fn new(sink: Arc<dyn GraphSink>) -> Self {
        Self {
            sink,
            next_id: AtomicU64::new(1),
            emitted: AtomicU64::new(0),
        }
    }

    /// Elements emitted so far
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    fn emit_vertex(&self, vertex: Vertex) -> Result<NodeId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.sink.emit(&Element::vertex(id, vertex))?;
        self.emitted.fetch_add(1, Ordering::Relaxed);
        Ok(id)
    }

    fn emit_edge(&self, edge: Edge) -> Result<NodeId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.sink.emit(&Element::edge(id, edge))?;
        self.emitted.fetch_add(1, Ordering::Relaxed);
        Ok(id)
    }

    pub fn emit_project(&self, name: &str) -> Result<NodeId> {
        self.emit_vertex(Vertex::Project {
            name: name.to_string(),
        })
    }

    pub fn emit_document(&self, path: &str) -> Result<NodeId> {
        self.emit_vertex(Vertex::Document {
            path: path.to_string(),
        })
    }

    pub fn emit_range(&self, span: Span) -> Result<NodeId> {
        self.emit_vertex(Vertex::Range { span })
    }

    pub fn emit_result_set(&self) -> Result<NodeId> {
        self.emit_vertex(Vertex::ResultSet)
    }

    pub fn emit_definition_result(&self) -> Result<NodeId> {
        self.emit_vertex(Vertex::DefinitionResult)
    }

    pub fn emit_reference_result(&self) -> Result<NodeId> {
        self.emit_vertex(Vertex::ReferenceResult)
    }

    pub fn emit_implementation_result(&self) -> Result<NodeId> {
        self.emit_vertex(Vertex::ImplementationResult)
    }

    pub fn emit_hover_result(&self, content: HoverContent) -> Result<NodeId> {
        self.emit_vertex(Vertex::HoverResult { content })
    }

    pub fn emit_moniker(
        &self,
        kind: MonikerKind,
        scheme: &str,
        identifier: &str,
    ) -> Result<NodeId> {
        self.emit_vertex(Vertex::Moniker {
            kind,
            scheme: scheme.to_string(),
            identifier: identifier.to_string(),
        })
    }

    pub fn emit_package_information(&self, name: &str, version: &str) -> Result<NodeId> {
        self.emit_vertex(Vertex::PackageInformation {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    pub fn emit_next(&self, out_v: NodeId, in_v: NodeId) -> Result<NodeId> {
        self.emit_edge(Edge::Next { out_v, in_v })
    }

    pub fn emit_definition_edge(&self, out_v: NodeId, in_v: NodeId) -> Result<NodeId> {
        self.emit_edge(Edge::Definition { out_v, in_v })
    }

    pub fn emit_references_edge(&self, out_v: NodeId, in_v: NodeId) -> Result<NodeId> {
        self.emit_edge(Edge::References { out_v, in_v })
    }

    pub fn emit_hover_edge(&self, out_v: NodeId, in_v: NodeId) -> Result<NodeId> {
        self.emit_edge(Edge::Hover { out_v, in_v })
    }

    pub fn emit_implementation_edge(&self, out_v: NodeId, in_v: NodeId) -> Result<NodeId> {
        self.emit_edge(Edge::Implementation { out_v, in_v })
    }

    pub fn emit_moniker_edge(&self, out_v: NodeId, in_v: NodeId) -> Result<NodeId> {
        self.emit_edge(Edge::Moniker { out_v, in_v })
    }

    pub fn emit_package_information_edge(&self, out_v: NodeId, in_v: NodeId) -> Result<NodeId> {
        self.emit_edge(Edge::PackageInformation { out_v, in_v })
    }

    pub fn emit_item(
        &self,
        out_v: NodeId,
        in_vs: Vec<NodeId>,
        document: NodeId,
        property: Option<ItemProperty>,
    ) -> Result<NodeId> {
        self.emit_edge(Edge::Item {
            out_v,
            in_vs,
            document,
            property,
        })
    }

    pub fn emit_contains(&self, out_v: NodeId, in_vs: Vec<NodeId>) -> Result<NodeId> {
        self.emit_edge(Edge::Contains { out_v, in_vs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ports::MemorySink;

    #[test]
    fn test_ids_monotonic() {
        let sink = Arc::new(MemorySink::new());
        let emitter = Emitter::new(sink.clone());

        let a = emitter.emit_result_set().unwrap();
        let b = emitter.emit_result_set().unwrap();
        let c = emitter.emit_next(a, b).unwrap();

        assert!(a < b && b < c);
        assert_eq!(emitter.emitted(), 3);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let sink = Arc::new(MemorySink::new());
        let emitter = Arc::new(Emitter::new(sink.clone()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let emitter = Arc::clone(&emitter);
                std::thread::spawn(move || {
                    let mut ids = Vec::new();
                    for _ in 0..50 {
                        ids.push(emitter.emit_result_set().unwrap());
                    }
                    ids
                })
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 200);
    }
}
