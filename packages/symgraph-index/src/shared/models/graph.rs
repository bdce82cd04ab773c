//! Typed graph records streamed to the sink
//!
//! The core assigns opaque, monotonically increasing u64 ids at emission
//! time; they carry no meaning across runs. The sink chooses the wire
//! encoding; serde derives keep the records encodable without the core
//! knowing or caring how.

use serde::Serialize;

use super::span::Span;

/// Node identifier, process-local and never persisted across runs
pub type NodeId = u64;

/// Hover payload: signature plus optional detail and docs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverContent {
    /// One-line type signature
    pub signature: String,

    /// Expanded signature detail (full struct/interface body)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Raw documentation comment text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// Moniker direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonikerKind {
    Export,
    Import,
    /// Cross-index implementation link to a symbol in another package
    Implementation,
}

/// Which side of a reference result an item edge feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemProperty {
    Definitions,
    References,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "label", rename_all = "camelCase")]
pub enum Vertex {
    Project {
        name: String,
    },
    Document {
        path: String,
    },
    Range {
        span: Span,
    },
    ResultSet,
    DefinitionResult,
    ReferenceResult,
    ImplementationResult,
    HoverResult {
        content: HoverContent,
    },
    Moniker {
        kind: MonikerKind,
        scheme: String,
        identifier: String,
    },
    PackageInformation {
        name: String,
        version: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "label", rename_all = "camelCase")]
pub enum Edge {
    /// range -> result set, or result set -> result set
    Next { out_v: NodeId, in_v: NodeId },
    /// result set -> definition result
    Definition { out_v: NodeId, in_v: NodeId },
    /// result set -> reference result
    References { out_v: NodeId, in_v: NodeId },
    /// result set -> hover result
    Hover { out_v: NodeId, in_v: NodeId },
    /// result set -> implementation result
    Implementation { out_v: NodeId, in_v: NodeId },
    /// result set -> moniker
    Moniker { out_v: NodeId, in_v: NodeId },
    /// moniker -> package information
    PackageInformation { out_v: NodeId, in_v: NodeId },
    /// result node -> member ranges, grouped by owning document
    Item {
        out_v: NodeId,
        in_vs: Vec<NodeId>,
        document: NodeId,
        #[serde(skip_serializing_if = "Option::is_none")]
        property: Option<ItemProperty>,
    },
    /// project -> documents, or document -> ranges
    Contains { out_v: NodeId, in_vs: Vec<NodeId> },
}

/// One streamed record: an id plus its payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Payload {
    Vertex(Vertex),
    Edge(Edge),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: NodeId,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Element {
    pub fn vertex(id: NodeId, vertex: Vertex) -> Self {
        Self {
            id,
            payload: Payload::Vertex(vertex),
        }
    }

    pub fn edge(id: NodeId, edge: Edge) -> Self {
        Self {
            id,
            payload: Payload::Edge(edge),
        }
    }

    /// True when the payload is a range vertex (used by idempotence tests)
    pub fn is_range(&self) -> bool {
        matches!(self.payload, Payload::Vertex(Vertex::Range { .. }))
    }
}
