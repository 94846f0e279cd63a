use std::fmt::Write;

use crate::graph::DepGraph;
use crate::graph::edge::EdgeKind;

/// Render the graph as Graphviz DOT. Import edges are solid black,
/// call edges dashed blue with the called symbol as the edge label.
pub fn to_dot(graph: &DepGraph) -> String {
    let mut dot = String::from("digraph DependencyGraph {\n");
    dot.push_str("  node [shape=box];\n");

    for node in graph.nodes() {
        let _ = writeln!(dot, "  \"{}\" [label=\"{}\"];", node.id.as_str(), node.id.base_name());
    }

    for (source, target, kind) in graph.edges() {
        let (style, color, label) = match kind {
            EdgeKind::Import => ("solid", "black", ""),
            EdgeKind::Call { symbol } => ("dashed", "blue", symbol.as_str()),
        };
        let _ = writeln!(
            dot,
            "  \"{}\" -> \"{}\" [style={style}, color={color}, label=\"{label}\"];",
            source.as_str(),
            target.as_str(),
        );
    }

    dot.push_str("}\n");
    dot
}
