use std::collections::HashSet;

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::graph::DepGraph;
use crate::graph::edge::EdgeKind;
use crate::graph::node::ModuleId;

/// Find import cycles in the graph. Call edges are excluded from cycle
/// analysis — only the import-only subgraph is traversed.
///
/// Each cycle is an ordered sequence of ModuleIds; the closing edge back to the
/// first element is implicit. The search is a depth-first traversal from every
/// unvisited node over one shared mutable path stack plus an on-path set, so
/// the whole run is O(V+E). When a neighbor already on the current path is
/// reached, the path slice from that neighbor's first occurrence to the
/// current node is recorded and the branch stops — a node can participate in
/// further cycles that this pass does not report.
pub fn detect_cycles(graph: &DepGraph) -> Vec<Vec<ModuleId>> {
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut cycles: Vec<Vec<ModuleId>> = Vec::new();

    for start in graph.graph.node_indices() {
        if visited.contains(&start) {
            continue;
        }
        let mut path: Vec<NodeIndex> = Vec::new();
        let mut on_path: HashSet<NodeIndex> = HashSet::new();
        dfs(graph, start, &mut visited, &mut path, &mut on_path, &mut cycles);
    }

    cycles
}

/// Returns true when a cycle was recorded on this branch, which stops the
/// caller from exploring further siblings.
fn dfs(
    graph: &DepGraph,
    node: NodeIndex,
    visited: &mut HashSet<NodeIndex>,
    path: &mut Vec<NodeIndex>,
    on_path: &mut HashSet<NodeIndex>,
    cycles: &mut Vec<Vec<ModuleId>>,
) -> bool {
    visited.insert(node);
    on_path.insert(node);
    path.push(node);

    for edge in graph.graph.edges(node) {
        if !matches!(edge.weight(), EdgeKind::Import) {
            continue;
        }
        let neighbor = edge.target();

        if !visited.contains(&neighbor) {
            if dfs(graph, neighbor, visited, path, on_path, cycles) {
                return true;
            }
        } else if on_path.contains(&neighbor) {
            let first = path
                .iter()
                .position(|&n| n == neighbor)
                .expect("on-path node must be on the path stack");
            cycles.push(
                path[first..]
                    .iter()
                    .map(|&idx| graph.graph[idx].id.clone())
                    .collect(),
            );
            return true;
        }
    }

    path.pop();
    on_path.remove(&node);
    false
}
