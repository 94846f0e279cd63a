use std::fs;
use std::time::Instant;

use rayon::prelude::*;

use crate::config::AnalyzerConfig;
use crate::diagnostics::Diagnostic;
use crate::error::AnalyzeError;
use crate::graph::DepGraph;
use crate::graph::build::build_graph;
use crate::graph::node::ModuleId;
use crate::indexer;
use crate::output::AnalyzeStats;
use crate::resolver::ModuleResolver;
use crate::{cycles, walker};

/// Result of one analysis run: the graph, the circular dependencies found
/// in it, and everything worth telling the user about along the way.
#[derive(Debug)]
pub struct Analysis {
    pub graph: DepGraph,
    pub cycles: Vec<Vec<ModuleId>>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: AnalyzeStats,
}

/// Run the full pipeline: discover, parse and index in parallel, build the
/// graph, detect cycles.
///
/// Per-file failures (unreadable or unparseable files) become diagnostics and
/// the batch continues without them.
///
/// # Errors
/// `EmptyFileSet` when the pattern matches nothing. The caller reports it and
/// produces no output. An invalid glob pattern is a plain error.
pub fn analyze(config: &AnalyzerConfig) -> anyhow::Result<Analysis> {
    let started = Instant::now();

    let files = walker::discover_files(&config.pattern, &config.languages, &config.exclude)?;
    if files.is_empty() {
        return Err(AnalyzeError::EmptyFileSet {
            pattern: config.pattern.clone(),
        }
        .into());
    }

    let mut diagnostics = Vec::new();
    if config.verbose {
        for file in &files {
            diagnostics.push(Diagnostic::info("discovered").with_file(file.display().to_string()));
        }
    }

    let resolver = ModuleResolver::new(&config.base_path, config.primary_language());
    let fallback = config.primary_language();
    let base = config.base_path.as_path();

    let results: Vec<(Option<_>, Option<Diagnostic>)> = files
        .par_iter()
        .map(|path| {
            let source = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    let diag = Diagnostic::warning(format!("could not read file: {err}"))
                        .with_file(path.display().to_string());
                    return (None, Some(diag));
                }
            };
            match indexer::index_file(path, &source, fallback, &resolver, base) {
                Ok(node) => (Some(node), None),
                Err(err) => {
                    let diag = Diagnostic::warning(err.to_string())
                        .with_file(path.display().to_string());
                    (None, Some(diag))
                }
            }
        })
        .collect();

    let mut nodes = Vec::with_capacity(results.len());
    for (node, diag) in results {
        if let Some(node) = node {
            nodes.push(node);
        }
        if let Some(diag) = diag {
            diagnostics.push(diag);
        }
    }

    let skipped = files.len() - nodes.len();
    let graph = build_graph(nodes);
    let cycles = cycles::detect_cycles(&graph);

    let mut stats = AnalyzeStats::from_graph(&graph);
    stats.file_count = files.len();
    stats.skipped = skipped;
    stats.elapsed_secs = started.elapsed().as_secs_f64();

    Ok(Analysis {
        graph,
        cycles,
        diagnostics,
        stats,
    })
}
