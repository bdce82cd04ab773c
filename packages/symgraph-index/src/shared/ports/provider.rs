//! Source model provider port
//!
//! The external front end parses source, resolves symbols and types, and
//! hands over one `ProjectModel` per run. The engine consumes it read-only.

use crate::errors::Result;
use crate::shared::models::{AstFile, Span, SymbolInfo, TypeRecord, UseSite};

/// One import statement, before normalization into a pseudo-definition
#[derive(Debug, Clone)]
pub struct ImportStatement {
    /// Local name the import binds (explicit alias or the package's name)
    pub local_name: String,

    /// Imported package's import path
    pub package_path: String,

    /// Byte offset of the bound name
    pub offset: usize,

    pub span: Span,
}

/// One in-project source file
#[derive(Debug, Clone)]
pub struct FileModel {
    pub path: String,
    pub declarations: Vec<SymbolInfo>,
    pub imports: Vec<ImportStatement>,
    pub uses: Vec<UseSite>,
    pub ast: AstFile,
}

/// One in-project package
#[derive(Debug, Clone)]
pub struct PackageModel {
    /// Import path
    pub path: String,

    /// Short package name
    pub name: String,

    pub files: Vec<FileModel>,

    /// Named concrete types declared in this package
    pub types: Vec<TypeRecord>,

    /// Interfaces declared in this package
    pub interfaces: Vec<TypeRecord>,
}

/// The whole resolved project
#[derive(Debug, Clone, Default)]
pub struct ProjectModel {
    pub root: String,
    pub packages: Vec<PackageModel>,

    /// Named types from dependency packages (solver pre-filters to exported)
    pub dependency_types: Vec<TypeRecord>,

    /// Interfaces from dependency packages
    pub dependency_interfaces: Vec<TypeRecord>,
}

/// External front end: parses and resolves, then hands over the model
///
/// A failure here is fatal to the run; there is no partial-model recovery.
pub trait SourceModelProvider: Send + Sync {
    fn load(&self, root: &str) -> Result<ProjectModel>;
}
