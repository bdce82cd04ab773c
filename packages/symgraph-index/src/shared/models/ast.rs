//! Minimal AST surface handed over by the front end
//!
//! The correlation engine never parses source; the front end supplies one
//! tree per file with just enough structure for the proximity cache:
//! which nodes can carry a doc comment, which nodes introduce a name into
//! the enclosing-type path, and the byte interval of every node.

/// Node kind, reduced to what the proximity walk distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstNodeKind {
    /// Whole-file node; may carry file-level docs
    File,
    /// A declaration group (const/var/type block); doc-capable
    Decl,
    /// Function or method declaration; doc-capable
    Func,
    /// Named type declaration; doc-capable, extends the name path
    TypeSpec,
    /// Struct/interface field; doc-capable, extends the name path
    Field,
    /// Single const/var spec inside a Decl; doc-capable
    Spec,
    /// Anything else (bodies, expressions, identifiers)
    Other,
}

impl AstNodeKind {
    /// Can this node carry an attached doc comment?
    pub fn doc_capable(&self) -> bool {
        !matches!(self, AstNodeKind::Other)
    }

    /// Does this node extend the enclosing-name path for its descendants?
    pub fn extends_path(&self) -> bool {
        matches!(self, AstNodeKind::TypeSpec | AstNodeKind::Field)
    }
}

/// One node of the front end's tree
#[derive(Debug, Clone)]
pub struct AstNode {
    pub kind: AstNodeKind,

    /// Byte offset of the node's first token; declaration positions in the
    /// symbol model point at these offsets
    pub start: usize,

    /// Byte offset one past the node's last token
    pub end: usize,

    /// Name introduced by this node (type name, field name), when any
    pub name: Option<String>,

    /// Doc comment text attached to this node, when non-empty
    pub doc: Option<String>,

    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(kind: AstNodeKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            name: None,
            doc: None,
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        let doc = doc.into();
        if !doc.is_empty() {
            self.doc = Some(doc);
        }
        self
    }

    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }
}

/// One file's tree
#[derive(Debug, Clone)]
pub struct AstFile {
    pub path: String,
    pub root: AstNode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_capability() {
        assert!(AstNodeKind::Func.doc_capable());
        assert!(AstNodeKind::Field.doc_capable());
        assert!(!AstNodeKind::Other.doc_capable());
    }

    #[test]
    fn test_path_extension() {
        assert!(AstNodeKind::TypeSpec.extends_path());
        assert!(AstNodeKind::Field.extends_path());
        assert!(!AstNodeKind::Func.extends_path());
    }

    #[test]
    fn test_empty_doc_dropped() {
        let node = AstNode::new(AstNodeKind::Func, 0, 10).with_doc("");
        assert!(node.doc.is_none());
    }
}
