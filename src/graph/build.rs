use std::collections::HashMap;

use petgraph::stable_graph::NodeIndex;

use super::DepGraph;
use super::edge::EdgeKind;
use super::node::{ExportKind, FileNode, ModuleId};

/// Assemble the full graph from per-file index results: insert nodes in
/// discovery order, then wire import edges and heuristic call edges.
pub fn build_graph(files: Vec<FileNode>) -> DepGraph {
    let mut graph = DepGraph::new();
    for file in files {
        graph.add_file(file);
    }
    build_import_edges(&mut graph);
    build_call_edges(&mut graph);
    graph
}

/// One `Import` edge per resolved import whose target is itself an indexed
/// file. Imports resolving outside the indexed set produce no edge, so the graph
/// never holds a dangling endpoint. The drop is silent.
pub fn build_import_edges(graph: &mut DepGraph) {
    // Collect first — adding edges while iterating node weights would hold two
    // borrows of the graph.
    let mut pending: Vec<(NodeIndex, NodeIndex)> = Vec::new();
    for idx in graph.graph.node_indices() {
        for target in &graph.graph[idx].imports {
            if let Some(&target_idx) = graph.file_index.get(target) {
                pending.push((idx, target_idx));
            }
        }
    }
    for (source, target) in pending {
        graph.graph.add_edge(source, target, EdgeKind::Import);
    }
}

/// Heuristic call linking: index every exported function-kind name to its
/// exporting file, then connect call sites to exporters by name.
///
/// When two files export the same function name, the later-processed file wins
/// the index slot — an accepted ambiguity of name-only matching, which also
/// yields false positives across unrelated same-named exports and false
/// negatives across aliasing or re-export indirection. Self-references are
/// never emitted.
pub fn build_call_edges(graph: &mut DepGraph) {
    let mut exported_functions: HashMap<String, NodeIndex> = HashMap::new();
    for idx in graph.graph.node_indices() {
        for (name, kind) in &graph.graph[idx].exports {
            if *kind == ExportKind::Function {
                exported_functions.insert(name.clone(), idx);
            }
        }
    }

    let mut pending: Vec<(NodeIndex, NodeIndex, String)> = Vec::new();
    for idx in graph.graph.node_indices() {
        for call in &graph.graph[idx].calls {
            if let Some(&target_idx) = exported_functions.get(call) {
                if target_idx != idx {
                    pending.push((idx, target_idx, call.clone()));
                }
            }
        }
    }
    for (source, target, symbol) in pending {
        graph.graph.add_edge(source, target, EdgeKind::Call { symbol });
    }
}
