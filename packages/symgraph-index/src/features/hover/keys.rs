//! Hover cache key construction
//!
//! A symbol owned by package P caches under `P + "::" + declOffset`; a
//! bare imported-package reference caches under the package path alone so
//! every "package fmt" hover in the project shares one payload. Symbols
//! with no owning package get the empty key, which the cache treats as
//! "never cache".

/// Cache key for a symbol declared in a known package
pub fn symbol_key(package_path: &str, decl_offset: usize) -> String {
    if package_path.is_empty() {
        return String::new();
    }
    format!("{}::{}", package_path, decl_offset)
}

/// Cache key for a bare package reference
pub fn package_key(package_path: &str) -> String {
    package_path.to_string()
}
