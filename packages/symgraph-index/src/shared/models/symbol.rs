//! Symbol model
//!
//! Declarations and use sites as resolved by the external front end.
//! Later passes never compare symbols by identity; a symbol's
//! `CorrelationKey` is what joins a reference back to its definition.

use serde::{Deserialize, Serialize};

use super::span::Span;

/// Declaration kind, as classified by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Const,
    Func,
    Label,
    /// The local name bound by an import statement
    PkgName,
    TypeName,
    Var,
    Field,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Const => "const",
            SymbolKind::Func => "func",
            SymbolKind::Label => "label",
            SymbolKind::PkgName => "pkgname",
            SymbolKind::TypeName => "typename",
            SymbolKind::Var => "var",
            SymbolKind::Field => "field",
        }
    }
}

/// The key a symbol is registered and looked up under
///
/// Shape depends on kind: declaration position for consts, labels, imports,
/// vars and fields; fully qualified name for funcs; canonical type string
/// for named types. Two front-end objects with equal keys are "the same"
/// symbol to the correlation engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CorrelationKey {
    Position { file: String, offset: usize },
    QualifiedName(String),
    TypeString(String),
}

/// One declared symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    pub kind: SymbolKind,

    /// File the declaration lives in
    pub file: String,

    /// Byte offset of the declared identifier
    pub offset: usize,

    /// Line/column interval of the declared identifier
    pub span: Span,

    pub exported: bool,

    /// Import path of the owning package
    pub package_path: String,

    /// Receiver type text for methods (e.g. "*Router" or "mux.Router")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,

    /// Canonical type string, present for named types only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_string: Option<String>,

    /// Fully qualified name, present for funcs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,

    /// One-line rendered signature from the front end's renderer
    pub signature: String,

    /// Optional expanded signature detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SymbolInfo {
    /// Correlation key for this declaration
    ///
    /// Funcs correlate by qualified name and named types by canonical type
    /// string so that uses across files and build configurations reach the
    /// same registry entry; everything else correlates by position.
    pub fn correlation_key(&self) -> CorrelationKey {
        match self.kind {
            SymbolKind::Func => CorrelationKey::QualifiedName(
                self.qualified_name
                    .clone()
                    .unwrap_or_else(|| format!("{}.{}", self.package_path, self.name)),
            ),
            SymbolKind::TypeName => match &self.type_string {
                Some(ts) => CorrelationKey::TypeString(ts.clone()),
                None => CorrelationKey::Position {
                    file: self.file.clone(),
                    offset: self.offset,
                },
            },
            _ => CorrelationKey::Position {
                file: self.file.clone(),
                offset: self.offset,
            },
        }
    }
}

/// A symbol declared outside the indexed project, reached via a reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalSymbol {
    pub name: String,
    pub kind: SymbolKind,

    /// Import path of the owning (out-of-project) package
    pub package_path: String,

    /// Pre-computed qualified path (receiver.method, field path), when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_path: Option<String>,

    /// One-line rendered signature
    pub signature: String,

    /// Raw documentation text from the owning package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,

    /// True when the use is a bare package reference (import name usage)
    pub is_package_reference: bool,
}

/// What a use site resolved to
#[derive(Debug, Clone)]
pub enum UseTarget {
    /// Resolved to a declaration inside the indexed project
    Local(CorrelationKey),
    /// Resolved to a declaration outside the indexed project
    External(ExternalSymbol),
    /// The front end could not resolve this use; skipped, not an error
    Unresolved,
}

/// One resolved identifier use
#[derive(Debug, Clone)]
pub struct UseSite {
    pub file: String,
    pub offset: usize,
    pub span: Span,
    pub target: UseTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(kind: SymbolKind) -> SymbolInfo {
        SymbolInfo {
            name: "x".to_string(),
            kind,
            file: "a.go".to_string(),
            offset: 10,
            span: Span::zero(),
            exported: false,
            package_path: "example.com/p".to_string(),
            receiver: None,
            type_string: None,
            qualified_name: None,
            signature: "var x int".to_string(),
            detail: None,
        }
    }

    #[test]
    fn test_var_correlates_by_position() {
        let key = symbol(SymbolKind::Var).correlation_key();
        assert_eq!(
            key,
            CorrelationKey::Position {
                file: "a.go".to_string(),
                offset: 10
            }
        );
    }

    #[test]
    fn test_func_correlates_by_qualified_name() {
        let mut sym = symbol(SymbolKind::Func);
        sym.qualified_name = Some("example.com/p.x".to_string());
        assert_eq!(
            sym.correlation_key(),
            CorrelationKey::QualifiedName("example.com/p.x".to_string())
        );
    }

    #[test]
    fn test_func_falls_back_to_package_qualified_name() {
        let sym = symbol(SymbolKind::Func);
        assert_eq!(
            sym.correlation_key(),
            CorrelationKey::QualifiedName("example.com/p.x".to_string())
        );
    }

    #[test]
    fn test_type_correlates_by_type_string() {
        let mut sym = symbol(SymbolKind::TypeName);
        sym.type_string = Some("example.com/p.Router".to_string());
        assert_eq!(
            sym.correlation_key(),
            CorrelationKey::TypeString("example.com/p.Router".to_string())
        );
    }
}
