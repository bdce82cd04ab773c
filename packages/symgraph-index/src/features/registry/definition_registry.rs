//! Definition registries
//!
//! One registry per symbol kind, each behind its own lock, since the
//! contention pattern differs by kind (funcs are hammered by the
//! references pass, labels barely at all). Lookups during the references
//! stage happen after the definitions barrier, so misses are authoritative:
//! a missing key means the symbol is external, never "not yet inserted".

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::shared::models::{CorrelationKey, NodeId, SymbolKind};

/// Everything the link pass needs about one local definition
#[derive(Debug)]
pub struct DefinitionInfo {
    /// Document the declaration lives in
    pub document_id: NodeId,

    /// Range vertex of the declared identifier
    pub range_id: NodeId,

    /// Hub result set every resolving range points at
    pub result_set_id: NodeId,

    pub definition_result_id: NodeId,

    /// referencing document id -> reference range ids, grown under the lock
    /// by the references pass, read by the link pass after the barrier
    references: Mutex<FxHashMap<NodeId, Vec<NodeId>>>,
}

impl DefinitionInfo {
    pub fn new(
        document_id: NodeId,
        range_id: NodeId,
        result_set_id: NodeId,
        definition_result_id: NodeId,
    ) -> Self {
        Self {
            document_id,
            range_id,
            result_set_id,
            definition_result_id,
            references: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn add_reference(&self, document_id: NodeId, range_id: NodeId) {
        self.references
            .lock()
            .entry(document_id)
            .or_default()
            .push(range_id);
    }

    /// Reference ranges grouped by document, document order deterministic
    pub fn reference_groups(&self) -> Vec<(NodeId, Vec<NodeId>)> {
        let mut groups: Vec<(NodeId, Vec<NodeId>)> = self
            .references
            .lock()
            .iter()
            .map(|(doc, ranges)| (*doc, ranges.clone()))
            .collect();
        groups.sort_by_key(|(doc, _)| *doc);
        groups
    }

    pub fn reference_count(&self) -> usize {
        self.references.lock().values().map(Vec::len).sum()
    }
}

/// Correlation-key → definition map for one symbol kind
#[derive(Default)]
pub struct DefinitionRegistry {
    inner: RwLock<FxHashMap<CorrelationKey, Arc<DefinitionInfo>>>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh definition; `None` when the key is already taken
    ///
    /// An occupied key is a malformed/self-conflicting declaration from the
    /// front end; the caller drops the newcomer.
    pub fn insert_new(
        &self,
        key: CorrelationKey,
        info: DefinitionInfo,
    ) -> Option<Arc<DefinitionInfo>> {
        let mut inner = self.inner.write();
        if inner.contains_key(&key) {
            return None;
        }
        let info = Arc::new(info);
        inner.insert(key, Arc::clone(&info));
        Some(info)
    }

    pub fn lookup(&self, key: &CorrelationKey) -> Option<Arc<DefinitionInfo>> {
        self.inner.read().get(key).map(Arc::clone)
    }

    pub fn all(&self) -> Vec<Arc<DefinitionInfo>> {
        self.inner.read().values().map(Arc::clone).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// All definition registries, partitioned by symbol kind
#[derive(Default)]
pub struct DefinitionIndex {
    consts: DefinitionRegistry,
    funcs: DefinitionRegistry,
    labels: DefinitionRegistry,
    imports: DefinitionRegistry,
    types: DefinitionRegistry,
    vars: DefinitionRegistry,
}

impl DefinitionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry owning the given kind
    ///
    /// Vars and fields share a registry: both correlate by position and
    /// field references resolve through the same path.
    pub fn registry_for(&self, kind: SymbolKind) -> &DefinitionRegistry {
        match kind {
            SymbolKind::Const => &self.consts,
            SymbolKind::Func => &self.funcs,
            SymbolKind::Label => &self.labels,
            SymbolKind::PkgName => &self.imports,
            SymbolKind::TypeName => &self.types,
            SymbolKind::Var | SymbolKind::Field => &self.vars,
        }
    }

    /// Key-only lookup across kinds
    ///
    /// The key shape narrows the candidates: qualified names live only in
    /// the func registry, type strings only in the type registry, and
    /// positions in the rest.
    pub fn lookup(&self, key: &CorrelationKey) -> Option<Arc<DefinitionInfo>> {
        match key {
            CorrelationKey::QualifiedName(_) => self.funcs.lookup(key),
            CorrelationKey::TypeString(_) => self.types.lookup(key),
            CorrelationKey::Position { .. } => self
                .vars
                .lookup(key)
                .or_else(|| self.consts.lookup(key))
                .or_else(|| self.imports.lookup(key))
                .or_else(|| self.labels.lookup(key))
                .or_else(|| self.types.lookup(key)),
        }
    }

    /// Every registered definition, for the link pass
    pub fn all(&self) -> Vec<Arc<DefinitionInfo>> {
        let mut all = Vec::new();
        for registry in [
            &self.consts,
            &self.funcs,
            &self.labels,
            &self.imports,
            &self.types,
            &self.vars,
        ] {
            all.extend(registry.all());
        }
        all
    }

    pub fn len(&self) -> usize {
        self.consts.len()
            + self.funcs.len()
            + self.labels.len()
            + self.imports.len()
            + self.types.len()
            + self.vars.len()
    }
}
