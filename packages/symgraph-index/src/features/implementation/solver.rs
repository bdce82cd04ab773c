//! Structural interface-satisfaction solver
//!
//! Bipartite relation between concrete types and the interfaces their
//! method sets structurally satisfy. Per interface method, a precomputed
//! methodKey -> bitset of defining type indices; intersecting the bitsets
//! of all the interface's methods leaves exactly the implementers. The
//! inverse relation is read off the same edge list, never recomputed.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::bitset::BitSet;
use crate::shared::models::TypeRecord;

/// Directed concrete-type -> interface edge, by index into the solver input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImplementationEdge {
    pub type_index: usize,
    pub interface_index: usize,
}

/// The solved relation over one (types, interfaces) pairing
#[derive(Debug, Default)]
pub struct ImplementationRelation {
    pub edges: Vec<ImplementationEdge>,
}

impl ImplementationRelation {
    /// Implementing type indices per interface
    pub fn types_for_interface(&self, interface_index: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|edge| edge.interface_index == interface_index)
            .map(|edge| edge.type_index)
            .collect()
    }

    /// Satisfied interface indices per type (the reversed relation)
    pub fn interfaces_for_type(&self, type_index: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|edge| edge.type_index == type_index)
            .map(|edge| edge.interface_index)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }
}

/// Solve the relation for one pairing of concrete types and interfaces
///
/// Aliases never implement (their method set is their target's, which is
/// already a candidate; reporting both would duplicate every edge).
/// Empty interfaces never participate.
pub fn solve(types: &[TypeRecord], interfaces: &[TypeRecord]) -> ImplementationRelation {
    // methodKey -> bitset of concrete types defining that method.
    let mut method_index: FxHashMap<String, BitSet> = FxHashMap::default();
    // Per type: method name -> canonical key, for re-verification.
    let mut type_methods: Vec<FxHashMap<&str, String>> = Vec::with_capacity(types.len());

    for (type_index, record) in types.iter().enumerate() {
        let mut by_name = FxHashMap::default();
        if !record.is_alias {
            for method in &record.methods {
                let key = method.canonical();
                method_index
                    .entry(key.clone())
                    .or_insert_with(|| BitSet::new(types.len()))
                    .insert(type_index);
                by_name.insert(method.name.as_str(), key);
            }
        }
        type_methods.push(by_name);
    }

    let mut edges: Vec<ImplementationEdge> = interfaces
        .par_iter()
        .enumerate()
        .flat_map_iter(|(interface_index, interface)| {
            candidates(interface, types.len(), &method_index)
                .into_iter()
                .flat_map(|survivors| survivors.ones().collect::<Vec<_>>())
                .filter(|&type_index| {
                    !types[type_index].is_alias
                        && verifies(interface, &type_methods[type_index])
                })
                .map(move |type_index| ImplementationEdge {
                    type_index,
                    interface_index,
                })
                .collect::<Vec<_>>()
        })
        .collect();

    edges.sort_by_key(|edge| (edge.interface_index, edge.type_index));
    ImplementationRelation { edges }
}

/// Intersect the bitsets of every method of `interface`
fn candidates(
    interface: &TypeRecord,
    type_count: usize,
    method_index: &FxHashMap<String, BitSet>,
) -> Option<BitSet> {
    if interface.methods.is_empty() || type_count == 0 {
        return None;
    }

    let mut survivors: Option<BitSet> = None;
    for method in &interface.methods {
        let defined_by = method_index.get(&method.canonical())?;
        match survivors.as_mut() {
            None => survivors = Some(defined_by.clone()),
            Some(set) => set.intersect_with(defined_by),
        }
        if survivors.as_ref().is_some_and(BitSet::is_empty) {
            return None;
        }
    }
    survivors
}

/// Re-verify a bitset survivor method-by-method against the type's set
fn verifies(interface: &TypeRecord, methods_by_name: &FxHashMap<&str, String>) -> bool {
    interface.methods.iter().all(|method| {
        methods_by_name.get(method.name.as_str()) == Some(&method.canonical())
    })
}
