//! AST-proximity cache
//!
//! One bounded recursive walk per file pre-associates, for a restricted
//! set of interesting positions, the nearest enclosing doc comment and the
//! dot-joined enclosing-name path. Without this, every symbol would
//! re-walk the tree during the definitions pass, which goes quadratic on
//! large files. Built once per run in parallel, then shared read-only:
//! no lock is taken on the lookup path.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::ring::DocRing;
use crate::shared::models::{AstFile, AstNode};
use crate::shared::utils::{PositionProbe, PositionSet};

/// What to preload for one file
pub struct PreloadRequest<'a> {
    pub ast: &'a AstFile,

    /// Positions of const/func/label/type/var declarations (hover-eligible)
    pub hover_positions: PositionSet,

    /// Positions of struct/interface fields (path-eligible)
    pub path_positions: PositionSet,
}

/// Per-file walk results, read-only after construction
#[derive(Debug, Default)]
pub struct FileProximity {
    hovers: FxHashMap<usize, String>,
    paths: FxHashMap<usize, Vec<String>>,
}

impl FileProximity {
    pub fn nearest_doc(&self, offset: usize) -> Option<&str> {
        self.hovers.get(&offset).map(String::as_str)
    }

    pub fn name_path(&self, offset: usize) -> Option<&[String]> {
        self.paths.get(&offset).map(Vec::as_slice)
    }
}

/// Whole-project proximity cache
#[derive(Debug, Default)]
pub struct ProximityCache {
    files: FxHashMap<String, FileProximity>,
}

impl ProximityCache {
    /// Walk every requested file, in parallel, and freeze the results
    pub fn build(requests: Vec<PreloadRequest<'_>>) -> Self {
        let files = requests
            .into_par_iter()
            .map(|request| {
                let proximity = preload_file(&request);
                (request.ast.path.clone(), proximity)
            })
            .collect();
        Self { files }
    }

    /// Nearest enclosing doc for a hover-eligible declaration position
    pub fn nearest_doc(&self, file: &str, offset: usize) -> Option<&str> {
        self.files.get(file)?.nearest_doc(offset)
    }

    /// Enclosing-name path (type, nested fields, the field itself) for a
    /// path-eligible position
    pub fn name_path(&self, file: &str, offset: usize) -> Option<&[String]> {
        self.files.get(file)?.name_path(offset)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn preload_file(request: &PreloadRequest<'_>) -> FileProximity {
    let mut out = FileProximity::default();
    let mut ring = DocRing::new();
    let mut path = Vec::new();
    let mut hover_probe = request.hover_positions.probe();
    let mut path_probe = request.path_positions.probe();
    walk(
        &request.ast.root,
        &mut ring,
        &mut path,
        &mut hover_probe,
        &mut path_probe,
        &mut out,
    );
    out
}

fn walk(
    node: &AstNode,
    ring: &mut DocRing,
    path: &mut Vec<String>,
    hover_probe: &mut PositionProbe<'_>,
    path_probe: &mut PositionProbe<'_>,
    out: &mut FileProximity,
) {
    // Ring entries can be overwritten past capacity, so restoration on the
    // way back up is a snapshot, not a pop.
    let saved_ring = match (node.kind.doc_capable(), &node.doc) {
        (true, Some(doc)) => {
            let saved = ring.clone();
            ring.push(doc);
            Some(saved)
        }
        _ => None,
    };

    let pushed_path = if node.kind.extends_path() {
        match &node.name {
            Some(name) => {
                path.push(name.clone());
                true
            }
            None => false,
        }
    } else {
        false
    };

    if hover_probe.contains(node.start) {
        if let Some(doc) = ring.nearest() {
            out.hovers.insert(node.start, doc.to_string());
        }
    }
    if path_probe.contains(node.start) && !path.is_empty() {
        out.paths.insert(node.start, path.clone());
    }

    for child in &node.children {
        walk(child, ring, path, hover_probe, path_probe, out);
    }

    if pushed_path {
        path.pop();
    }
    if let Some(saved) = saved_ring {
        *ring = saved;
    }
}
