//! Shared data model
//!
//! Source positions, symbols as the front end resolves them, the minimal
//! AST surface the proximity cache walks, and the typed graph records
//! streamed to the sink.

pub mod ast;
pub mod graph;
pub mod span;
pub mod symbol;
pub mod types;

pub use ast::{AstFile, AstNode, AstNodeKind};
pub use graph::{
    Edge, Element, HoverContent, ItemProperty, MonikerKind, NodeId, Payload, Vertex,
};
pub use span::{FilePos, Span};
pub use symbol::{CorrelationKey, ExternalSymbol, SymbolInfo, SymbolKind, UseSite, UseTarget};
pub use types::{MethodSig, TypeRecord};
