//! Qualified-name paths for moniker identifiers
//!
//! Empty for a bare package reference; `Receiver.Method` for methods with
//! pointer and package qualifiers stripped from the receiver; the
//! preloader's dot-joined enclosing path for fields; the symbol's own name
//! otherwise.

use crate::features::preload::ProximityCache;
use crate::shared::models::{SymbolInfo, SymbolKind};

/// Strip `*` and any package qualifier from a receiver type text
///
/// "*mux.Router" and "mux.Router" both reduce to "Router".
pub fn strip_receiver(receiver: &str) -> &str {
    let receiver = receiver.trim_start_matches('*');
    match receiver.rfind('.') {
        Some(cut) => &receiver[cut + 1..],
        None => receiver,
    }
}

/// Qualified path of a declared symbol for its moniker identifier
pub fn qualified_path(symbol: &SymbolInfo, proximity: &ProximityCache) -> String {
    match symbol.kind {
        SymbolKind::PkgName => String::new(),
        SymbolKind::Func => match &symbol.receiver {
            Some(receiver) => format!("{}.{}", strip_receiver(receiver), symbol.name),
            None => symbol.name.clone(),
        },
        SymbolKind::Field => match proximity.name_path(&symbol.file, symbol.offset) {
            Some(path) => path.join("."),
            None => symbol.name.clone(),
        },
        _ => symbol.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Span;

    fn symbol(kind: SymbolKind, name: &str) -> SymbolInfo {
        SymbolInfo {
            name: name.to_string(),
            kind,
            file: "a.go".to_string(),
            offset: 0,
            span: Span::zero(),
            exported: true,
            package_path: "example.com/p".to_string(),
            receiver: None,
            type_string: None,
            qualified_name: None,
            signature: String::new(),
            detail: None,
        }
    }

    #[test]
    fn test_strip_receiver() {
        assert_eq!(strip_receiver("*mux.Router"), "Router");
        assert_eq!(strip_receiver("mux.Router"), "Router");
        assert_eq!(strip_receiver("*Router"), "Router");
        assert_eq!(strip_receiver("Router"), "Router");
    }

    #[test]
    fn test_package_reference_path_empty() {
        let proximity = ProximityCache::default();
        assert_eq!(
            qualified_path(&symbol(SymbolKind::PkgName, "fmt"), &proximity),
            ""
        );
    }

    #[test]
    fn test_method_path() {
        let proximity = ProximityCache::default();
        let mut sym = symbol(SymbolKind::Func, "ServeHTTP");
        sym.receiver = Some("*mux.Router".to_string());
        assert_eq!(qualified_path(&sym, &proximity), "Router.ServeHTTP");
    }

    #[test]
    fn test_plain_symbol_path_is_name() {
        let proximity = ProximityCache::default();
        assert_eq!(
            qualified_path(&symbol(SymbolKind::Var, "count"), &proximity),
            "count"
        );
    }

    #[test]
    fn test_field_without_preload_falls_back_to_name() {
        let proximity = ProximityCache::default();
        assert_eq!(
            qualified_path(&symbol(SymbolKind::Field, "Inner"), &proximity),
            "Inner"
        );
    }
}
