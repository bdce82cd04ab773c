//! Moniker generation
//!
//! Stable, cross-index symbol identifiers for exported and imported
//! symbols. Export monikers bind to the project's own package-information
//! node; import monikers resolve the owning dependency by longest-prefix
//! match over the declared dependency map. Package-information and
//! import-moniker nodes are memoized through the same keyed cache the
//! hover path uses, since both are read-mostly after warm-up.

use crate::errors::Result;
use crate::features::emit::Emitter;
use crate::features::hover::KeyedIdCache;
use crate::shared::models::{MonikerKind, NodeId};
use crate::shared::ports::{DependencyMetadataProvider, PackageMeta};

pub struct MonikerGenerator {
    scheme: String,
    project_name: String,
    project_version: String,
    package_info: KeyedIdCache,
    monikers: KeyedIdCache,
}

impl MonikerGenerator {
    pub fn new(
        scheme: impl Into<String>,
        project_name: impl Into<String>,
        project_version: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            project_name: project_name.into(),
            project_version: project_version.into(),
            package_info: KeyedIdCache::new(),
            monikers: KeyedIdCache::new(),
        }
    }

    /// `packagePath + ":" + qualifiedPath`; a bare package reference has an
    /// empty qualified path and identifies as the path alone
    pub fn identifier(package_path: &str, qualified_path: &str) -> String {
        if qualified_path.is_empty() {
            package_path.to_string()
        } else {
            format!("{}:{}", package_path, qualified_path)
        }
    }

    fn package_information(
        &self,
        emitter: &Emitter,
        name: &str,
        version: &str,
    ) -> Result<NodeId> {
        let key = format!("{}:{}", name, version);
        self.package_info
            .get_or_create(&key, || emitter.emit_package_information(name, version))
    }

    /// Attach an export moniker to `result_set_id`
    pub fn export_moniker(
        &self,
        emitter: &Emitter,
        result_set_id: NodeId,
        package_path: &str,
        qualified_path: &str,
    ) -> Result<NodeId> {
        let identifier = Self::identifier(package_path, qualified_path);
        let package_info_id =
            self.package_information(emitter, &self.project_name, &self.project_version)?;

        let moniker_id = emitter.emit_moniker(MonikerKind::Export, &self.scheme, &identifier)?;
        emitter.emit_package_information_edge(moniker_id, package_info_id)?;
        emitter.emit_moniker_edge(result_set_id, moniker_id)?;
        Ok(moniker_id)
    }

    /// Attach an import moniker, resolving the owning dependency by
    /// longest-prefix match; `None` when no declared dependency owns the
    /// path (the reference stays indexed, just without a cross-index id)
    pub fn import_moniker(
        &self,
        emitter: &Emitter,
        dependencies: &dyn DependencyMetadataProvider,
        result_set_id: NodeId,
        package_path: &str,
        qualified_path: &str,
    ) -> Result<Option<NodeId>> {
        self.dependency_moniker(
            emitter,
            dependencies,
            result_set_id,
            package_path,
            qualified_path,
            MonikerKind::Import,
        )
    }

    /// Implementation moniker for a remote counterpart of a local type or
    /// interface; resolution and memoization identical to imports
    pub fn implementation_moniker(
        &self,
        emitter: &Emitter,
        dependencies: &dyn DependencyMetadataProvider,
        result_set_id: NodeId,
        package_path: &str,
        qualified_path: &str,
    ) -> Result<Option<NodeId>> {
        self.dependency_moniker(
            emitter,
            dependencies,
            result_set_id,
            package_path,
            qualified_path,
            MonikerKind::Implementation,
        )
    }

    fn dependency_moniker(
        &self,
        emitter: &Emitter,
        dependencies: &dyn DependencyMetadataProvider,
        result_set_id: NodeId,
        package_path: &str,
        qualified_path: &str,
        kind: MonikerKind,
    ) -> Result<Option<NodeId>> {
        let meta = match resolve_dependency(dependencies, package_path) {
            Some(meta) => meta,
            None => return Ok(None),
        };

        let package_info_id = self.package_information(emitter, &meta.name, &meta.version)?;
        let identifier = Self::identifier(package_path, qualified_path);

        // One moniker vertex per (identifier, package-information) pair.
        let cache_key = format!("{:?}\u{0}{}\u{0}{}", kind, identifier, package_info_id);
        let moniker_id = self.monikers.get_or_create(&cache_key, || {
            let id = emitter.emit_moniker(kind, &self.scheme, &identifier)?;
            emitter.emit_package_information_edge(id, package_info_id)?;
            Ok(id)
        })?;

        emitter.emit_moniker_edge(result_set_id, moniker_id)?;
        Ok(Some(moniker_id))
    }
}

/// Longest-prefix match of `package_path` against the dependency map
///
/// Tries the full path, then each shorter prefix down to the first
/// segment; the first hit wins, so `a/b/c` beats `a/b` for `a/b/c/d`.
pub fn resolve_dependency(
    dependencies: &dyn DependencyMetadataProvider,
    package_path: &str,
) -> Option<PackageMeta> {
    let mut prefix = package_path;
    loop {
        if let Some(meta) = dependencies.lookup(prefix) {
            return Some(meta);
        }
        match prefix.rfind('/') {
            Some(cut) => prefix = &prefix[..cut],
            None => return None,
        }
    }
}
