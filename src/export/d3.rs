use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::graph::DepGraph;
use crate::graph::edge::EdgeKind;

/// Force-layout payload consumed by the HTML renderer and by external
/// d3 tooling. Group 1 marks modules with exports, group 2 leaves.
#[derive(Debug, Serialize, Deserialize)]
pub struct D3Graph {
    pub nodes: Vec<D3Node>,
    pub links: Vec<D3Link>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct D3Node {
    pub id: String,
    pub label: String,
    pub group: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct D3Link {
    pub source: String,
    pub target: String,
    pub value: u8,
    #[serde(rename = "type")]
    pub link_type: String,
}

pub fn build_payload(graph: &DepGraph) -> D3Graph {
    let nodes: Vec<D3Node> = graph
        .nodes()
        .map(|node| D3Node {
            id: node.id.as_str().to_owned(),
            label: node.id.base_name().to_owned(),
            group: if node.exports.is_empty() { 2 } else { 1 },
        })
        .collect();

    let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    // Links with an endpoint outside the node list would break the force
    // simulation, so they are dropped here.
    let links = graph
        .edges()
        .filter(|(source, target, _)| known.contains(source.as_str()) && known.contains(target.as_str()))
        .map(|(source, target, kind)| D3Link {
            source: source.as_str().to_owned(),
            target: target.as_str().to_owned(),
            value: match kind {
                EdgeKind::Import => 2,
                EdgeKind::Call { .. } => 1,
            },
            link_type: kind.type_str().to_owned(),
        })
        .collect();

    D3Graph { nodes, links }
}

pub fn to_d3(graph: &DepGraph) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&build_payload(graph))?)
}
