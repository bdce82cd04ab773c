//! Named types and interfaces as seen by the implementation solver
//!
//! The front end hands over flat records; the solver never inspects real
//! type objects. Canonicalization reduces a method to a signature string
//! usable as a hash-map key for structural matching.

use serde::{Deserialize, Serialize};

use super::symbol::CorrelationKey;

/// One method of a named type or interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    pub exported: bool,

    /// Owning package, used to scope unexported method keys
    pub package_path: String,

    /// Parameter type strings, in order
    pub params: Vec<String>,

    /// Result type strings, in order
    pub results: Vec<String>,
}

impl MethodSig {
    /// Reduce to a signature key: name, parameter types, result types,
    /// package-prefixed when unexported so same-named unexported methods in
    /// different packages never match each other.
    pub fn canonical(&self) -> String {
        let base = format!(
            "{}({})({})",
            self.name,
            self.params.join(","),
            self.results.join(",")
        );
        if self.exported {
            base
        } else {
            format!("{}:{}", self.package_path, base)
        }
    }
}

/// One named type (concrete or interface) offered to the solver
#[derive(Debug, Clone)]
pub struct TypeRecord {
    pub name: String,
    pub package_path: String,
    pub exported: bool,

    /// Aliases share their target's method set; skipped as implementers
    pub is_alias: bool,

    pub methods: Vec<MethodSig>,

    /// Registry key of the declaration, present for in-project records only
    pub key: Option<CorrelationKey>,
}

impl TypeRecord {
    /// Moniker-style identifier for cross-package implementation links
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.package_path, self.name)
    }
}
