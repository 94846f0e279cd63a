pub mod build;
pub mod edge;
pub mod node;

use std::collections::HashMap;

use petgraph::Directed;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use edge::EdgeKind;
use node::{FileNode, ModuleId};

/// The assembled dependency graph: a directed petgraph `StableGraph` over file
/// nodes with an O(1) ModuleId lookup index.
///
/// Nodes and edges are only ever added, never removed, so iteration order is
/// discovery order throughout. Built once per run, read-only afterward.
#[derive(Debug)]
pub struct DepGraph {
    pub graph: StableGraph<FileNode, EdgeKind, Directed>,
    /// Maps module identities to node indices.
    pub file_index: HashMap<ModuleId, NodeIndex>,
}

impl DepGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            file_index: HashMap::new(),
        }
    }

    /// Add a file node. Re-adding an id returns the existing index and leaves
    /// the first node in place.
    pub fn add_file(&mut self, file: FileNode) -> NodeIndex {
        if let Some(&existing) = self.file_index.get(&file.id) {
            return existing;
        }
        let id = file.id.clone();
        let idx = self.graph.add_node(file);
        self.file_index.insert(id, idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn import_edge_count(&self) -> usize {
        self.graph
            .edge_references()
            .filter(|e| matches!(e.weight(), EdgeKind::Import))
            .count()
    }

    pub fn call_edge_count(&self) -> usize {
        self.graph
            .edge_references()
            .filter(|e| matches!(e.weight(), EdgeKind::Call { .. }))
            .count()
    }

    /// File nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Edges in insertion order as `(source id, target id, kind)`.
    pub fn edges(&self) -> impl Iterator<Item = (&ModuleId, &ModuleId, &EdgeKind)> {
        self.graph.edge_references().map(|e| {
            (
                &self.graph[e.source()].id,
                &self.graph[e.target()].id,
                e.weight(),
            )
        })
    }
}

impl Default for DepGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn id(s: &str) -> ModuleId {
        ModuleId::from_path(Path::new(s), Path::new(""))
    }

    #[test]
    fn test_add_duplicate_file_returns_same_index() {
        let mut graph = DepGraph::new();
        let a = graph.add_file(FileNode::new(id("src/app.ts")));
        let b = graph.add_file(FileNode::new(id("src/app.ts")));
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_nodes_iterate_in_discovery_order() {
        let mut graph = DepGraph::new();
        for name in ["c.ts", "a.ts", "b.ts"] {
            graph.add_file(FileNode::new(id(name)));
        }
        let order: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_edge_counts_by_kind() {
        let mut graph = DepGraph::new();
        let a = graph.add_file(FileNode::new(id("a.ts")));
        let b = graph.add_file(FileNode::new(id("b.ts")));
        graph.graph.add_edge(a, b, EdgeKind::Import);
        graph.graph.add_edge(b, a, EdgeKind::Call {
            symbol: "run".into(),
        });
        assert_eq!(graph.import_edge_count(), 1);
        assert_eq!(graph.call_edge_count(), 1);
        assert_eq!(graph.edge_count(), 2);
    }
}
