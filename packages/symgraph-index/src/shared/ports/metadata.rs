//! Dependency metadata port
//!
//! Maps declared dependency package paths to (name, version). Only the
//! moniker generator's longest-prefix match consults this; a missing entry
//! suppresses import-moniker emission and nothing else.

use std::collections::HashMap;

/// Name and version of one declared dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMeta {
    pub name: String,
    pub version: String,
}

pub trait DependencyMetadataProvider: Send + Sync {
    /// Exact-path lookup; prefix walking is the caller's job
    fn lookup(&self, package_path: &str) -> Option<PackageMeta>;
}

/// Plain map-backed provider
#[derive(Debug, Clone, Default)]
pub struct MapDependencyProvider {
    dependencies: HashMap<String, PackageMeta>,
}

impl MapDependencyProvider {
    pub fn new(dependencies: HashMap<String, PackageMeta>) -> Self {
        Self { dependencies }
    }

    pub fn insert(
        &mut self,
        path: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) {
        self.dependencies.insert(
            path.into(),
            PackageMeta {
                name: name.into(),
                version: version.into(),
            },
        );
    }
}

impl DependencyMetadataProvider for MapDependencyProvider {
    fn lookup(&self, package_path: &str) -> Option<PackageMeta> {
        self.dependencies.get(package_path).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_provider_lookup() {
        let mut provider = MapDependencyProvider::default();
        provider.insert("github.com/gorilla/mux", "mux", "v1.8.0");

        let meta = provider.lookup("github.com/gorilla/mux").unwrap();
        assert_eq!(meta.name, "mux");
        assert_eq!(meta.version, "v1.8.0");
        assert!(provider.lookup("github.com/gorilla").is_none());
    }
}
