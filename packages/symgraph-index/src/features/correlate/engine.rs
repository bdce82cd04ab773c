//! Symbol correlation engine
//!
//! The three-pass pipeline over a resolved project model: index
//! definitions, index references (attaching to local definitions or
//! synthesizing stubs for external ones), then link finalized reference
//! sets back to definitions. Stages run their units in parallel inside
//! the caller's rayon pool; the par_iter join is the stage barrier.

use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use super::state::IndexState;
use crate::config::IndexConfig;
use crate::errors::{ErrorCollector, IndexError, Result};
use crate::features::emit::Emitter;
use crate::features::hover::{self, KeyedIdCache};
use crate::features::implementation::{self, ImplementationRelation};
use crate::features::moniker::{qualified_path, MonikerGenerator};
use crate::features::preload::{PreloadRequest, ProximityCache};
use crate::features::registry::{
    DefinitionIndex, DefinitionInfo, DocumentRegistry, RangeRegistry,
};
use crate::shared::models::{
    ExternalSymbol, HoverContent, ItemProperty, NodeId, SymbolInfo, SymbolKind, TypeRecord,
    UseSite, UseTarget,
};
use crate::shared::ports::{
    DependencyMetadataProvider, FileModel, ImportStatement, ProgressReporter, ProjectModel,
};
use crate::shared::utils::PositionSet;

/// Counters surfaced to the caller after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub packages: u64,
    pub documents: u64,
    pub definitions: u64,
    pub references: u64,
    pub external_references: u64,
    pub implementations: u64,
    pub dropped_symbols: u64,
    pub elements: u64,
}

pub struct CorrelationEngine {
    emitter: Arc<Emitter>,
    config: IndexConfig,
    dependencies: Arc<dyn DependencyMetadataProvider>,
    progress: Arc<dyn ProgressReporter>,

    state: parking_lot::Mutex<IndexState>,
    project_id: AtomicU64,

    ranges: RangeRegistry,
    documents: DocumentRegistry,
    definitions: DefinitionIndex,
    hovers: KeyedIdCache,
    monikers: MonikerGenerator,

    definitions_count: AtomicU64,
    references_count: AtomicU64,
    external_references_count: AtomicU64,
    implementations_count: AtomicU64,
    dropped_count: AtomicU64,
}

impl CorrelationEngine {
    pub fn new(
        emitter: Arc<Emitter>,
        config: IndexConfig,
        dependencies: Arc<dyn DependencyMetadataProvider>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        let monikers = MonikerGenerator::new(
            config.moniker_scheme.clone(),
            config.project_name.clone(),
            config.project_version.clone(),
        );
        Self {
            emitter,
            config,
            dependencies,
            progress,
            state: parking_lot::Mutex::new(IndexState::Loaded),
            project_id: AtomicU64::new(0),
            ranges: RangeRegistry::new(),
            documents: DocumentRegistry::new(),
            definitions: DefinitionIndex::new(),
            hovers: KeyedIdCache::new(),
            monikers,
            definitions_count: AtomicU64::new(0),
            references_count: AtomicU64::new(0),
            external_references_count: AtomicU64::new(0),
            implementations_count: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
        }
    }

    fn advance(&self, next: IndexState) -> Result<()> {
        self.state.lock().advance_to(next)
    }

    pub fn state(&self) -> IndexState {
        *self.state.lock()
    }

    pub fn stats(&self, packages: u64) -> IndexStats {
        IndexStats {
            packages,
            documents: self.documents.len() as u64,
            definitions: self.definitions_count.load(Ordering::Relaxed),
            references: self.references_count.load(Ordering::Relaxed),
            external_references: self.external_references_count.load(Ordering::Relaxed),
            implementations: self.implementations_count.load(Ordering::Relaxed),
            dropped_symbols: self.dropped_count.load(Ordering::Relaxed),
            elements: self.emitter.emitted(),
        }
    }

    /// Emit the project vertex and one document vertex per file
    pub fn emit_documents(&self, project: &ProjectModel) -> Result<()> {
        self.progress.started("documents");
        let project_id = self.emitter.emit_project(&self.config.project_name)?;
        self.project_id.store(project_id, Ordering::Relaxed);

        for package in &project.packages {
            for file in &package.files {
                let id = self.emitter.emit_document(&file.path)?;
                self.documents.insert(&file.path, id);
                self.progress.advanced(1);
            }
        }
        self.progress.finished("documents");
        self.advance(IndexState::DocumentsEmitted)
    }

    /// Synthesize a pseudo-definition per import statement so later passes
    /// treat imports uniformly with other declarations
    pub fn normalize_imports(&self, project: &mut ProjectModel) -> Result<()> {
        self.progress.started("imports");
        for package in &mut project.packages {
            let package_path = package.path.clone();
            for file in &mut package.files {
                let synthesized: Vec<SymbolInfo> = file
                    .imports
                    .iter()
                    .map(|import| import_pseudo_definition(import, &file.path, &package_path))
                    .collect();
                file.declarations.extend(synthesized);
                self.progress.advanced(1);
            }
        }
        self.progress.finished("imports");
        self.advance(IndexState::ImportsNormalized)
    }

    /// One bounded tree walk per file; results frozen before return
    pub fn preload(&self, project: &ProjectModel) -> Result<Arc<ProximityCache>> {
        self.progress.started("preload");
        let requests: Vec<PreloadRequest<'_>> = project
            .packages
            .iter()
            .flat_map(|package| package.files.iter())
            .map(|file| PreloadRequest {
                ast: &file.ast,
                hover_positions: hover_positions(file),
                path_positions: path_positions(file),
            })
            .collect();

        let cache = Arc::new(ProximityCache::build(requests));
        self.progress.advanced(cache.len() as u64);
        self.progress.finished("preload");
        self.advance(IndexState::Preloaded)?;
        Ok(cache)
    }

    /// Pass one: claim range slots and register definitions
    pub fn index_definitions(
        &self,
        project: &ProjectModel,
        proximity: &ProximityCache,
    ) -> Result<()> {
        self.progress.started("definitions");
        let errors = ErrorCollector::new();
        project
            .packages
            .par_iter()
            .flat_map(|package| package.files.par_iter())
            .for_each(|file| {
                for symbol in &file.declarations {
                    if let Err(error) = self.index_definition(file, symbol, proximity) {
                        errors.record(error);
                    }
                }
                self.progress.advanced(1);
            });
        self.progress.finished("definitions");
        errors.into_result()?;
        self.advance(IndexState::DefinitionsIndexed)
    }

    fn index_definition(
        &self,
        file: &FileModel,
        symbol: &SymbolInfo,
        proximity: &ProximityCache,
    ) -> Result<()> {
        let key = symbol.correlation_key();
        let registry = self.definitions.registry_for(symbol.kind);
        if let Some(existing) = registry.lookup(&key) {
            if self.ranges.lookup(&file.path, symbol.offset) == Some(existing.range_id) {
                // The same declaration re-encountered under another build
                // configuration. Idempotent skip.
                return Ok(());
            }
            // Same key at another position: a malformed, self-conflicting
            // declaration from upstream tooling. Drop it.
            self.drop_symbol(symbol);
            return Ok(());
        }

        let span = symbol.span;
        let (range_id, is_new) =
            self.ranges
                .ensure_range(&self.emitter, &file.path, symbol.offset, || span)?;
        if !is_new {
            // Already claimed: the same declaration seen under another
            // build configuration. Idempotent skip.
            return Ok(());
        }

        let document = self
            .documents
            .get(&file.path)
            .ok_or_else(|| IndexError::correlation(format!("unknown document {}", file.path)))?;
        document.add_definition_range(range_id);

        let result_set_id = self.emitter.emit_result_set()?;
        self.emitter.emit_next(range_id, result_set_id)?;

        let definition_result_id = self.emitter.emit_definition_result()?;
        self.emitter
            .emit_definition_edge(result_set_id, definition_result_id)?;
        self.emitter
            .emit_item(definition_result_id, vec![range_id], document.id, None)?;

        let hover_key = hover::symbol_key(&symbol.package_path, symbol.offset);
        let content = HoverContent {
            signature: symbol.signature.clone(),
            detail: symbol.detail.clone(),
            docs: proximity
                .nearest_doc(&file.path, symbol.offset)
                .map(str::to_string),
        };
        let hover_id = self
            .hovers
            .get_or_create(&hover_key, || self.emitter.emit_hover_result(content))?;
        self.emitter.emit_hover_edge(result_set_id, hover_id)?;

        if symbol.exported {
            let path = qualified_path(symbol, proximity);
            self.monikers.export_moniker(
                &self.emitter,
                result_set_id,
                &symbol.package_path,
                &path,
            )?;
        }

        let info = DefinitionInfo::new(document.id, range_id, result_set_id, definition_result_id);
        if registry.insert_new(key, info).is_none() {
            self.drop_symbol(symbol);
            return Ok(());
        }
        self.definitions_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn drop_symbol(&self, symbol: &SymbolInfo) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
        if self.config.warn_dropped_symbols {
            warn!(
                name = symbol.name.as_str(),
                file = symbol.file.as_str(),
                offset = symbol.offset,
                "dropping self-conflicting declaration"
            );
        } else {
            debug!(
                name = symbol.name.as_str(),
                file = symbol.file.as_str(),
                "dropping self-conflicting declaration"
            );
        }
    }

    /// Pass two: attach references to local definitions or synthesize
    /// external stubs
    pub fn index_references(&self, project: &ProjectModel) -> Result<()> {
        self.progress.started("references");
        let errors = ErrorCollector::new();
        project
            .packages
            .par_iter()
            .flat_map(|package| package.files.par_iter())
            .for_each(|file| {
                for use_site in &file.uses {
                    if let Err(error) = self.index_reference(file, use_site) {
                        errors.record(error);
                    }
                }
                self.progress.advanced(1);
            });
        self.progress.finished("references");
        errors.into_result()?;
        self.advance(IndexState::ReferencesIndexed)
    }

    fn index_reference(&self, file: &FileModel, use_site: &UseSite) -> Result<()> {
        match &use_site.target {
            UseTarget::Unresolved => Ok(()),
            UseTarget::Local(key) => match self.definitions.lookup(key) {
                Some(definition) => self.local_reference(file, use_site, &definition),
                // The target was dropped as malformed; skip its references
                // the same way.
                None => Ok(()),
            },
            UseTarget::External(external) => self.external_reference(file, use_site, external),
        }
    }

    fn local_reference(
        &self,
        file: &FileModel,
        use_site: &UseSite,
        definition: &DefinitionInfo,
    ) -> Result<()> {
        let span = use_site.span;
        let (range_id, _) =
            self.ranges
                .ensure_range(&self.emitter, &file.path, use_site.offset, || span)?;
        if range_id == definition.range_id {
            // The declaring identifier itself; already wired to the
            // result set by the definitions pass.
            return Ok(());
        }

        let document = self
            .documents
            .get(&file.path)
            .ok_or_else(|| IndexError::correlation(format!("unknown document {}", file.path)))?;

        self.emitter.emit_next(range_id, definition.result_set_id)?;
        document.add_reference_range(range_id);
        definition.add_reference(document.id, range_id);
        self.references_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn external_reference(
        &self,
        file: &FileModel,
        use_site: &UseSite,
        external: &ExternalSymbol,
    ) -> Result<()> {
        let span = use_site.span;
        let (range_id, _) =
            self.ranges
                .ensure_range(&self.emitter, &file.path, use_site.offset, || span)?;

        let document = self
            .documents
            .get(&file.path)
            .ok_or_else(|| IndexError::correlation(format!("unknown document {}", file.path)))?;
        document.add_reference_range(range_id);

        let result_set_id = self.emitter.emit_result_set()?;
        self.emitter.emit_next(range_id, result_set_id)?;

        let reference_result_id = self.emitter.emit_reference_result()?;
        self.emitter
            .emit_references_edge(result_set_id, reference_result_id)?;
        self.emitter.emit_item(
            reference_result_id,
            vec![range_id],
            document.id,
            Some(ItemProperty::References),
        )?;

        // Hover resolved from the external symbol's owning package; every
        // reference to "package fmt" anywhere shares one payload.
        let path = external
            .qualified_path
            .clone()
            .unwrap_or_else(|| external.name.clone());
        let hover_key = if external.is_package_reference {
            hover::package_key(&external.package_path)
        } else {
            MonikerGenerator::identifier(&external.package_path, &path)
        };
        let content = HoverContent {
            signature: external.signature.clone(),
            detail: None,
            docs: external.docs.clone(),
        };
        let hover_id = self
            .hovers
            .get_or_create(&hover_key, || self.emitter.emit_hover_result(content))?;
        self.emitter.emit_hover_edge(result_set_id, hover_id)?;

        let moniker_path = if external.is_package_reference {
            ""
        } else {
            path.as_str()
        };
        self.monikers.import_moniker(
            &self.emitter,
            self.dependencies.as_ref(),
            result_set_id,
            &external.package_path,
            moniker_path,
        )?;

        self.external_references_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Pass three: emit one reference result per definition, covering the
    /// declaration range and every accumulated reference range, grouped by
    /// owning document
    pub fn link(&self) -> Result<()> {
        self.progress.started("link");
        let errors = ErrorCollector::new();
        let definitions = self.definitions.all();
        definitions.par_iter().for_each(|definition| {
            if let Err(error) = self.link_definition(definition) {
                errors.record(error);
            }
            self.progress.advanced(1);
        });
        self.progress.finished("link");
        errors.into_result()?;
        self.advance(IndexState::Linked)
    }

    fn link_definition(&self, definition: &DefinitionInfo) -> Result<()> {
        let reference_result_id = self.emitter.emit_reference_result()?;
        self.emitter
            .emit_references_edge(definition.result_set_id, reference_result_id)?;
        self.emitter.emit_item(
            reference_result_id,
            vec![definition.range_id],
            definition.document_id,
            Some(ItemProperty::Definitions),
        )?;
        for (document_id, ranges) in definition.reference_groups() {
            self.emitter.emit_item(
                reference_result_id,
                ranges,
                document_id,
                Some(ItemProperty::References),
            )?;
        }
        Ok(())
    }

    /// Implements-relation over local pairs and across dependency
    /// boundaries; remote sets pre-filtered to exported records
    pub fn build_implementations(&self, project: &ProjectModel) -> Result<()> {
        self.progress.started("implementations");

        let local_types: Vec<&TypeRecord> = project
            .packages
            .iter()
            .flat_map(|package| package.types.iter())
            .collect();
        let local_interfaces: Vec<&TypeRecord> = project
            .packages
            .iter()
            .flat_map(|package| package.interfaces.iter())
            .collect();
        let remote_types: Vec<&TypeRecord> = project
            .dependency_types
            .iter()
            .filter(|record| record.exported)
            .collect();
        let remote_interfaces: Vec<&TypeRecord> = project
            .dependency_interfaces
            .iter()
            .filter(|record| record.exported)
            .collect();

        let owned = |records: &[&TypeRecord]| -> Vec<TypeRecord> {
            records.iter().map(|r| (*r).clone()).collect()
        };
        let local_type_records = owned(&local_types);
        let local_interface_records = owned(&local_interfaces);
        let remote_type_records = owned(&remote_types);
        let remote_interface_records = owned(&remote_interfaces);

        let local = implementation::solve(&local_type_records, &local_interface_records);
        self.emit_local_implementations(&local, &local_type_records, &local_interface_records)?;
        self.progress.advanced(1);

        let outbound = implementation::solve(&local_type_records, &remote_interface_records);
        for edge in &outbound.edges {
            let record = &local_type_records[edge.type_index];
            let remote = &remote_interface_records[edge.interface_index];
            self.remote_implementation(record, remote)?;
        }
        self.progress.advanced(1);

        let inbound = implementation::solve(&remote_type_records, &local_interface_records);
        for edge in &inbound.edges {
            let record = &local_interface_records[edge.interface_index];
            let remote = &remote_type_records[edge.type_index];
            self.remote_implementation(record, remote)?;
        }
        self.progress.advanced(1);

        self.progress.finished("implementations");
        Ok(())
    }

    fn emit_local_implementations(
        &self,
        relation: &ImplementationRelation,
        types: &[TypeRecord],
        interfaces: &[TypeRecord],
    ) -> Result<()> {
        // Forward direction: the interface's result set lists the
        // definition ranges of its implementers.
        for (interface_index, interface) in interfaces.iter().enumerate() {
            let implementers = relation.types_for_interface(interface_index);
            if implementers.is_empty() {
                continue;
            }
            let targets: Vec<&TypeRecord> =
                implementers.iter().map(|&index| &types[index]).collect();
            self.implementation_result(interface, &targets)?;
        }

        // Reversed direction, read off the same edge list.
        for (type_index, record) in types.iter().enumerate() {
            let satisfied = relation.interfaces_for_type(type_index);
            if satisfied.is_empty() {
                continue;
            }
            let targets: Vec<&TypeRecord> =
                satisfied.iter().map(|&index| &interfaces[index]).collect();
            self.implementation_result(record, &targets)?;
        }
        Ok(())
    }

    /// Attach an implementation result for `source` listing the definition
    /// ranges of `targets`, grouped by document
    fn implementation_result(&self, source: &TypeRecord, targets: &[&TypeRecord]) -> Result<()> {
        let source_info = match source.key.as_ref().and_then(|key| self.definitions.lookup(key)) {
            Some(info) => info,
            // Source dropped as malformed; nothing to attach to.
            None => return Ok(()),
        };

        let mut groups: Vec<(NodeId, Vec<NodeId>)> = Vec::new();
        for target in targets {
            let info = match target.key.as_ref().and_then(|key| self.definitions.lookup(key)) {
                Some(info) => info,
                None => continue,
            };
            match groups.iter_mut().find(|(doc, _)| *doc == info.document_id) {
                Some((_, ranges)) => ranges.push(info.range_id),
                None => groups.push((info.document_id, vec![info.range_id])),
            }
        }
        if groups.is_empty() {
            return Ok(());
        }

        let implementation_result_id = self.emitter.emit_implementation_result()?;
        self.emitter
            .emit_implementation_edge(source_info.result_set_id, implementation_result_id)?;
        for (document_id, ranges) in groups {
            self.emitter
                .emit_item(implementation_result_id, ranges, document_id, None)?;
        }
        self.implementations_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Cross-boundary link: an implementation moniker on the local side
    /// identifying the remote counterpart
    fn remote_implementation(&self, local: &TypeRecord, remote: &TypeRecord) -> Result<()> {
        let info = match local.key.as_ref().and_then(|key| self.definitions.lookup(key)) {
            Some(info) => info,
            None => return Ok(()),
        };
        let emitted = self.monikers.implementation_moniker(
            &self.emitter,
            self.dependencies.as_ref(),
            info.result_set_id,
            &remote.package_path,
            &remote.name,
        )?;
        if emitted.is_some() {
            self.implementations_count.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Containment: one edge per document, one for the whole project
    pub fn emit_contains(&self) -> Result<()> {
        self.progress.started("contains");
        let documents = self.documents.all();
        for document in &documents {
            let ranges = document.contained_ranges();
            if !ranges.is_empty() {
                self.emitter.emit_contains(document.id, ranges)?;
            }
            self.progress.advanced(1);
        }

        let project_id = self.project_id.load(Ordering::Relaxed);
        let document_ids: Vec<NodeId> = documents.iter().map(|document| document.id).collect();
        if !document_ids.is_empty() {
            self.emitter.emit_contains(project_id, document_ids)?;
        }
        self.progress.finished("contains");
        Ok(())
    }

    /// Final flush through the sink
    pub fn flush(&self) -> Result<()> {
        self.emitter.flush()?;
        self.advance(IndexState::Flushed)
    }
}

fn import_pseudo_definition(
    import: &ImportStatement,
    file: &str,
    package_path: &str,
) -> SymbolInfo {
    SymbolInfo {
        name: import.local_name.clone(),
        kind: SymbolKind::PkgName,
        file: file.to_string(),
        offset: import.offset,
        span: import.span,
        exported: false,
        package_path: package_path.to_string(),
        receiver: None,
        type_string: None,
        qualified_name: None,
        signature: format!("import {:?}", import.package_path),
        detail: None,
    }
}

/// Hover-eligible declaration positions for one file
fn hover_positions(file: &FileModel) -> PositionSet {
    PositionSet::new(
        file.declarations
            .iter()
            .filter(|symbol| {
                matches!(
                    symbol.kind,
                    SymbolKind::Const
                        | SymbolKind::Func
                        | SymbolKind::Label
                        | SymbolKind::TypeName
                        | SymbolKind::Var
                )
            })
            .map(|symbol| symbol.offset)
            .collect(),
    )
}

/// Path-eligible (field) positions for one file
fn path_positions(file: &FileModel) -> PositionSet {
    PositionSet::new(
        file.declarations
            .iter()
            .filter(|symbol| symbol.kind == SymbolKind::Field)
            .map(|symbol| symbol.offset)
            .collect(),
    )
}
