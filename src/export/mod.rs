pub mod d3;
pub mod dot;
pub mod html;
pub mod json;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::graph::DepGraph;

/// Output format for a serialized graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    D3,
    Dot,
    Html,
}

/// Render the graph in the requested format.
pub fn serialize_graph(graph: &DepGraph, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => json::to_json(graph),
        OutputFormat::D3 => d3::to_d3(graph),
        OutputFormat::Dot => Ok(dot::to_dot(graph)),
        OutputFormat::Html => html::to_html(graph),
    }
}
