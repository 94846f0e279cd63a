use serde::{Deserialize, Serialize};

use crate::graph::DepGraph;
use crate::graph::edge::EdgeKind;

/// Flat document shape for the `json` format. Nodes carry their export
/// names and call sites, edges carry a `label` only for call edges.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonGraph {
    pub nodes: Vec<JsonNode>,
    pub edges: Vec<JsonEdge>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonNode {
    pub id: String,
    pub label: String,
    pub exports: Vec<String>,
    pub calls: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

pub fn build_document(graph: &DepGraph) -> JsonGraph {
    let nodes = graph
        .nodes()
        .map(|node| JsonNode {
            id: node.id.as_str().to_owned(),
            label: node.id.base_name().to_owned(),
            exports: node.export_names().map(str::to_owned).collect(),
            calls: node.calls.clone(),
        })
        .collect();

    let edges = graph
        .edges()
        .map(|(source, target, kind)| JsonEdge {
            source: source.as_str().to_owned(),
            target: target.as_str().to_owned(),
            edge_type: kind.type_str().to_owned(),
            label: match kind {
                EdgeKind::Call { symbol } => Some(symbol.clone()),
                EdgeKind::Import => None,
            },
        })
        .collect();

    JsonGraph { nodes, edges }
}

pub fn to_json(graph: &DepGraph) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&build_document(graph))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::{ExportKind, FileNode, ModuleId};

    fn graph_with_import_and_call() -> DepGraph {
        let mut a = FileNode::new(ModuleId::new("src/a"));
        a.imports.push(ModuleId::new("src/b"));
        a.calls.push("helper".to_owned());
        let mut b = FileNode::new(ModuleId::new("src/b"));
        b.exports.push(("helper".to_owned(), ExportKind::Function));
        crate::graph::build::build_graph(vec![a, b])
    }

    #[test]
    fn test_json_document_shape() {
        let graph = graph_with_import_and_call();
        let doc = build_document(&graph);
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[0].id, "src/a");
        assert_eq!(doc.nodes[0].label, "a");
        assert_eq!(doc.nodes[1].exports, vec!["helper"]);
        assert_eq!(doc.edges.len(), 2);
    }

    #[test]
    fn test_call_edge_carries_label_import_does_not() {
        let graph = graph_with_import_and_call();
        let doc = build_document(&graph);
        let import = doc.edges.iter().find(|e| e.edge_type == "import").expect("import edge");
        let call = doc.edges.iter().find(|e| e.edge_type == "call").expect("call edge");
        assert_eq!(import.label, None);
        assert_eq!(call.label.as_deref(), Some("helper"));
    }

    #[test]
    fn test_import_edge_serializes_without_label_field() {
        let graph = graph_with_import_and_call();
        let text = to_json(&graph).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        let import = value["edges"]
            .as_array()
            .expect("edges array")
            .iter()
            .find(|e| e["type"] == "import")
            .expect("import edge");
        assert!(import.get("label").is_none());
    }

    #[test]
    fn test_round_trip_preserves_counts() {
        let graph = graph_with_import_and_call();
        let text = to_json(&graph).expect("serialize");
        let parsed: JsonGraph = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(parsed.nodes.len(), graph.node_count());
        assert_eq!(parsed.edges.len(), graph.edge_count());
    }
}
