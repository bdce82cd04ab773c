//! End-to-end pipeline test over an in-memory two-file project
//!
//! One package, one exported function with call sites in both files, one
//! imported-package reference, and one interface/implementer pair. Runs
//! the full indexer against a memory sink and checks the emitted graph.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use symgraph_index::shared::models::{
    AstFile, AstNode, AstNodeKind, CorrelationKey, Edge, Element, ExternalSymbol, HoverContent,
    ItemProperty, MethodSig, MonikerKind, NodeId, Payload, Span, SymbolInfo, SymbolKind,
    TypeRecord, UseSite, UseTarget, Vertex,
};
use symgraph_index::shared::ports::{
    FileModel, ImportStatement, MapDependencyProvider, MemorySink, PackageModel, ProjectModel,
    SourceModelProvider,
};
use symgraph_index::{IndexConfig, Indexer, Result};

const PKG: &str = "example.com/app";

struct FixtureProvider;

impl SourceModelProvider for FixtureProvider {
    fn load(&self, root: &str) -> Result<ProjectModel> {
        Ok(ProjectModel {
            root: root.to_string(),
            packages: vec![app_package()],
            dependency_types: Vec::new(),
            dependency_interfaces: Vec::new(),
        })
    }
}

fn span(line: u32, start_col: u32, end_col: u32) -> Span {
    Span::new(line, start_col, line, end_col)
}

fn decl(name: &str, kind: SymbolKind, file: &str, offset: usize, sp: Span) -> SymbolInfo {
    SymbolInfo {
        name: name.to_string(),
        kind,
        file: file.to_string(),
        offset,
        span: sp,
        exported: name.chars().next().is_some_and(|c| c.is_uppercase()),
        package_path: PKG.to_string(),
        receiver: None,
        type_string: None,
        qualified_name: None,
        signature: format!("{} {}", kind.as_str(), name),
        detail: None,
    }
}

fn call_site(file: &str, offset: usize, sp: Span) -> UseSite {
    UseSite {
        file: file.to_string(),
        offset,
        span: sp,
        target: UseTarget::Local(CorrelationKey::QualifiedName(format!("{}.F", PKG))),
    }
}

fn close_method() -> MethodSig {
    MethodSig {
        name: "Close".to_string(),
        exported: true,
        package_path: PKG.to_string(),
        params: Vec::new(),
        results: vec!["error".to_string()],
    }
}

fn type_record(name: &str, key: &str) -> TypeRecord {
    TypeRecord {
        name: name.to_string(),
        package_path: PKG.to_string(),
        exported: true,
        is_alias: false,
        methods: vec![close_method()],
        key: Some(CorrelationKey::TypeString(key.to_string())),
    }
}

fn app_package() -> PackageModel {
    let mut func = decl("F", SymbolKind::Func, "a.go", 20, span(3, 6, 7));
    func.qualified_name = Some(format!("{}.F", PKG));

    let mut closer = decl("Closer", SymbolKind::TypeName, "a.go", 200, span(10, 6, 12));
    closer.type_string = Some(format!("{}.Closer", PKG));

    let mut file_type = decl("File", SymbolKind::TypeName, "a.go", 250, span(14, 6, 10));
    file_type.type_string = Some(format!("{}.File", PKG));

    let a_ast = AstFile {
        path: "a.go".to_string(),
        root: AstNode::new(AstNodeKind::File, 0, 400).with_children(vec![
            AstNode::new(AstNodeKind::Func, 20, 100).with_doc("F frobnicates."),
            AstNode::new(AstNodeKind::TypeSpec, 200, 230).with_name("Closer"),
            AstNode::new(AstNodeKind::TypeSpec, 250, 300).with_name("File"),
        ]),
    };

    let a = FileModel {
        path: "a.go".to_string(),
        declarations: vec![func, closer, file_type],
        imports: vec![ImportStatement {
            local_name: "fmt".to_string(),
            package_path: "fmt".to_string(),
            offset: 5,
            span: span(1, 8, 11),
        }],
        uses: vec![
            call_site("a.go", 150, span(7, 2, 3)),
            UseSite {
                file: "a.go".to_string(),
                offset: 160,
                span: span(8, 2, 5),
                target: UseTarget::External(ExternalSymbol {
                    name: "fmt".to_string(),
                    kind: SymbolKind::PkgName,
                    package_path: "fmt".to_string(),
                    qualified_path: None,
                    signature: "package fmt".to_string(),
                    docs: Some("Package fmt implements formatted I/O.".to_string()),
                    is_package_reference: true,
                }),
            },
        ],
        ast: a_ast,
    };

    let b = FileModel {
        path: "b.go".to_string(),
        declarations: Vec::new(),
        imports: Vec::new(),
        uses: vec![
            call_site("b.go", 30, span(2, 2, 3)),
            call_site("b.go", 60, span(4, 2, 3)),
        ],
        ast: AstFile {
            path: "b.go".to_string(),
            root: AstNode::new(AstNodeKind::File, 0, 200),
        },
    };

    PackageModel {
        path: PKG.to_string(),
        name: "app".to_string(),
        files: vec![a, b],
        types: vec![type_record("File", &format!("{}.File", PKG))],
        interfaces: vec![type_record("Closer", &format!("{}.Closer", PKG))],
    }
}

struct Graph {
    elements: Vec<Element>,
}

impl Graph {
    fn vertices(&self) -> impl Iterator<Item = (NodeId, &Vertex)> {
        self.elements.iter().filter_map(|e| match &e.payload {
            Payload::Vertex(vertex) => Some((e.id, vertex)),
            Payload::Edge(_) => None,
        })
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.elements.iter().filter_map(|e| match &e.payload {
            Payload::Vertex(_) => None,
            Payload::Edge(edge) => Some(edge),
        })
    }

    fn range_id(&self, sp: Span) -> NodeId {
        self.vertices()
            .find_map(|(id, v)| match v {
                Vertex::Range { span } if *span == sp => Some(id),
                _ => None,
            })
            .expect("range vertex")
    }

    fn document_id(&self, wanted: &str) -> NodeId {
        self.vertices()
            .find_map(|(id, v)| match v {
                Vertex::Document { path } if path == wanted => Some(id),
                _ => None,
            })
            .expect("document vertex")
    }

    fn next_target(&self, range: NodeId) -> NodeId {
        self.edges()
            .find_map(|edge| match edge {
                Edge::Next { out_v, in_v } if *out_v == range => Some(*in_v),
                _ => None,
            })
            .expect("next edge")
    }

    fn reference_result_of(&self, result_set: NodeId) -> NodeId {
        self.edges()
            .find_map(|edge| match edge {
                Edge::References { out_v, in_v } if *out_v == result_set => Some(*in_v),
                _ => None,
            })
            .expect("references edge")
    }

    fn items_of(&self, result: NodeId) -> Vec<(Vec<NodeId>, NodeId, Option<ItemProperty>)> {
        self.edges()
            .filter_map(|edge| match edge {
                Edge::Item {
                    out_v,
                    in_vs,
                    document,
                    property,
                } if *out_v == result => Some((in_vs.clone(), *document, *property)),
                _ => None,
            })
            .collect()
    }

    fn hover_of(&self, result_set: NodeId) -> &HoverContent {
        let hover_id = self
            .edges()
            .find_map(|edge| match edge {
                Edge::Hover { out_v, in_v } if *out_v == result_set => Some(*in_v),
                _ => None,
            })
            .expect("hover edge");
        self.vertices()
            .find_map(|(id, v)| match v {
                Vertex::HoverResult { content } if id == hover_id => Some(content),
                _ => None,
            })
            .expect("hover result")
    }

    fn count_vertices(&self, predicate: impl Fn(&Vertex) -> bool) -> usize {
        self.vertices().filter(|(_, v)| predicate(v)).count()
    }
}

fn run_fixture() -> (Graph, symgraph_index::IndexStats) {
    let mut deps = MapDependencyProvider::default();
    deps.insert("fmt", "fmt", "go1.22.0");

    let sink = Arc::new(MemorySink::new());
    let config = IndexConfig::new(PKG, "v0.1.0").with_workers(2);
    let indexer = Indexer::new(
        Arc::new(FixtureProvider),
        Arc::new(deps),
        sink.clone(),
        config,
    );

    let stats = indexer.run("/src/app").expect("run succeeds");
    let graph = Graph {
        elements: sink.elements(),
    };
    (graph, stats)
}

#[test]
fn test_run_stats() {
    let (_, stats) = run_fixture();
    assert_eq!(stats.packages, 1);
    assert_eq!(stats.documents, 2);
    // F, the fmt import binding, Closer, File.
    assert_eq!(stats.definitions, 4);
    assert_eq!(stats.references, 3);
    assert_eq!(stats.external_references, 1);
    // Closer -> File and the reversed direction.
    assert_eq!(stats.implementations, 2);
    assert_eq!(stats.dropped_symbols, 0);
}

#[test]
fn test_every_position_claims_one_range() {
    let (graph, _) = run_fixture();
    let ranges = graph.count_vertices(|v| matches!(v, Vertex::Range { .. }));
    // 4 declarations (import included) + 4 use sites.
    assert_eq!(ranges, 8);
}

#[test]
fn test_call_sites_share_the_definition_result_set() {
    let (graph, _) = run_fixture();
    let decl_set = graph.next_target(graph.range_id(span(3, 6, 7)));
    assert_eq!(graph.next_target(graph.range_id(span(7, 2, 3))), decl_set);
    assert_eq!(graph.next_target(graph.range_id(span(2, 2, 3))), decl_set);
    assert_eq!(graph.next_target(graph.range_id(span(4, 2, 3))), decl_set);
}

#[test]
fn test_reference_result_groups_by_document() {
    let (graph, _) = run_fixture();
    let decl_range = graph.range_id(span(3, 6, 7));
    let result_set = graph.next_target(decl_range);
    let reference_result = graph.reference_result_of(result_set);

    let doc_a = graph.document_id("a.go");
    let doc_b = graph.document_id("b.go");
    let mut items = graph.items_of(reference_result);
    items.sort_by_key(|(_, document, property)| (*property != Some(ItemProperty::Definitions), *document));

    assert_eq!(
        items,
        vec![
            (vec![decl_range], doc_a, Some(ItemProperty::Definitions)),
            (
                vec![graph.range_id(span(7, 2, 3))],
                doc_a,
                Some(ItemProperty::References)
            ),
            (
                vec![
                    graph.range_id(span(2, 2, 3)),
                    graph.range_id(span(4, 2, 3))
                ],
                doc_b,
                Some(ItemProperty::References)
            ),
        ]
    );
}

#[test]
fn test_definition_hover_carries_nearest_doc() {
    let (graph, _) = run_fixture();
    let result_set = graph.next_target(graph.range_id(span(3, 6, 7)));
    let hover = graph.hover_of(result_set);
    assert_eq!(hover.docs.as_deref(), Some("F frobnicates."));
    assert_eq!(hover.signature, "func F");
}

#[test]
fn test_exported_function_gets_export_moniker() {
    let (graph, _) = run_fixture();
    let identifier = format!("{}:F", PKG);
    let export = graph
        .vertices()
        .find_map(|(_, v)| match v {
            Vertex::Moniker {
                kind: MonikerKind::Export,
                identifier: id,
                ..
            } if *id == identifier => Some(()),
            _ => None,
        });
    assert!(export.is_some());
}

#[test]
fn test_external_package_reference_stub() {
    let (graph, _) = run_fixture();
    let result_set = graph.next_target(graph.range_id(span(8, 2, 5)));

    let hover = graph.hover_of(result_set);
    assert_eq!(hover.signature, "package fmt");
    assert_eq!(
        hover.docs.as_deref(),
        Some("Package fmt implements formatted I/O.")
    );

    // The stub has its own reference result containing only this range.
    let reference_result = graph.reference_result_of(result_set);
    let items = graph.items_of(reference_result);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].0, vec![graph.range_id(span(8, 2, 5))]);

    // Import moniker resolves the declared fmt dependency.
    let import = graph.vertices().find_map(|(_, v)| match v {
        Vertex::Moniker {
            kind: MonikerKind::Import,
            identifier,
            ..
        } if identifier == "fmt" => Some(()),
        _ => None,
    });
    assert!(import.is_some());

    let package_info = graph.vertices().any(|(_, v)| {
        matches!(
            v,
            Vertex::PackageInformation { name, version }
                if name == "fmt" && version == "go1.22.0"
        )
    });
    assert!(package_info);
}

#[test]
fn test_interface_implementation_links() {
    let (graph, _) = run_fixture();
    let interface_set = graph.next_target(graph.range_id(span(10, 6, 12)));
    let type_set = graph.next_target(graph.range_id(span(14, 6, 10)));

    let implementation_of = |result_set: NodeId| -> Vec<NodeId> {
        let result = graph
            .edges()
            .find_map(|edge| match edge {
                Edge::Implementation { out_v, in_v } if *out_v == result_set => Some(*in_v),
                _ => None,
            })
            .expect("implementation edge");
        graph
            .items_of(result)
            .into_iter()
            .flat_map(|(ranges, _, _)| ranges)
            .collect()
    };

    assert_eq!(
        implementation_of(interface_set),
        vec![graph.range_id(span(14, 6, 10))]
    );
    assert_eq!(
        implementation_of(type_set),
        vec![graph.range_id(span(10, 6, 12))]
    );
}

#[test]
fn test_containment_edges() {
    let (graph, _) = run_fixture();
    let doc_a = graph.document_id("a.go");
    let doc_b = graph.document_id("b.go");
    let project_id = graph
        .vertices()
        .find_map(|(id, v)| match v {
            Vertex::Project { .. } => Some(id),
            _ => None,
        })
        .expect("project vertex");

    let contains_of = |out: NodeId| -> Vec<NodeId> {
        graph
            .edges()
            .find_map(|edge| match edge {
                Edge::Contains { out_v, in_vs } if *out_v == out => Some(in_vs.clone()),
                _ => None,
            })
            .expect("contains edge")
    };

    let mut project_members = contains_of(project_id);
    project_members.sort_unstable();
    let mut expected = vec![doc_a, doc_b];
    expected.sort_unstable();
    assert_eq!(project_members, expected);

    // a.go: import, F, Closer, File declarations plus two reference sites.
    assert_eq!(contains_of(doc_a).len(), 6);
    assert_eq!(contains_of(doc_b).len(), 2);
}

#[test]
fn test_rerun_is_deterministic_in_shape() {
    let (first, first_stats) = run_fixture();
    let (second, second_stats) = run_fixture();
    assert_eq!(first_stats, second_stats);
    assert_eq!(first.elements.len(), second.elements.len());
}
