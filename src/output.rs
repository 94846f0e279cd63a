use serde::Serialize;

use crate::graph::DepGraph;
use crate::graph::node::ModuleId;

/// Run counters reported after an analysis. Serializable so the summary
/// can also travel in machine-readable output.
#[derive(Debug, Default, Serialize)]
pub struct AnalyzeStats {
    pub file_count: usize,
    pub skipped: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub import_edges: usize,
    pub call_edges: usize,
    pub export_count: usize,
    pub call_count: usize,
    pub elapsed_secs: f64,
}

impl AnalyzeStats {
    pub fn from_graph(graph: &DepGraph) -> Self {
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            import_edges: graph.import_edge_count(),
            call_edges: graph.call_edge_count(),
            export_count: graph.nodes().map(|n| n.exports.len()).sum(),
            call_count: graph.nodes().map(|n| n.calls.len()).sum(),
            ..Self::default()
        }
    }
}

/// Human-readable run summary on stderr. Stdout stays reserved for the
/// serialized graph.
pub fn print_summary(stats: &AnalyzeStats, cycles: &[Vec<ModuleId>]) {
    eprintln!("Graph summary:");
    eprintln!(
        "  {} files analyzed ({} skipped) in {:.2}s",
        stats.file_count, stats.skipped, stats.elapsed_secs
    );
    eprintln!("  {} nodes", stats.node_count);
    eprintln!(
        "  {} edges ({} import, {} call)",
        stats.edge_count, stats.import_edges, stats.call_edges
    );
    eprintln!("  {} exports, {} call sites", stats.export_count, stats.call_count);

    if cycles.is_empty() {
        eprintln!("  no circular dependencies");
    } else {
        eprintln!("  {} circular dependencies:", cycles.len());
        for cycle in cycles {
            eprintln!("    {}", format_cycle(cycle));
        }
    }
}

/// `a -> b -> c -> a`, the closing hop made explicit.
pub fn format_cycle(cycle: &[ModuleId]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(|id| id.as_str()).collect();
    if let Some(first) = parts.first().copied() {
        parts.push(first);
    }
    parts.join(" -> ")
}
