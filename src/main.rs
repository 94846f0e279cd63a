mod analyzer;
mod cli;
mod config;
mod cycles;
mod diagnostics;
mod error;
mod export;
mod graph;
mod indexer;
mod language;
mod output;
mod resolver;
mod walker;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use analyzer::Analysis;
use cli::{Cli, Commands};
use config::{AnalyzerConfig, FileConfig};
use error::AnalyzeError;
use export::OutputFormat;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            pattern,
            language,
            format,
            base,
            output,
            verbose,
        } => {
            let file_config = FileConfig::load(&base);
            let cli_had_pattern = pattern.is_some();
            let cli_had_languages = language.is_some();
            let mut config = AnalyzerConfig {
                format,
                base_path: base,
                output,
                verbose,
                ..AnalyzerConfig::default()
            };
            if let Some(pattern) = pattern {
                config.pattern = pattern;
            }
            if let Some(language) = language {
                config.languages = language;
            }
            file_config.merge_into(&mut config, cli_had_pattern, cli_had_languages);
            run_analyze(&config)
        }
        Commands::Cycles { pattern, base, json } => {
            let config = AnalyzerConfig {
                pattern,
                base_path: base,
                ..AnalyzerConfig::default()
            };
            run_cycles(&config, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            // Matching no files is not a failure, just nothing to report.
            if let Some(AnalyzeError::EmptyFileSet { pattern }) = err.downcast_ref() {
                eprintln!("No files found matching pattern: {pattern}");
                return ExitCode::SUCCESS;
            }
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_analyze(config: &AnalyzerConfig) -> anyhow::Result<ExitCode> {
    let Analysis {
        graph,
        cycles,
        diagnostics,
        stats,
    } = analyzer::analyze(config)?;

    let payload = export::serialize_graph(&graph, config.format)?;
    // An HTML page is useless on a pipe, so it defaults to a file.
    let default_target = default_output_path(config.format);
    let target = config.output.as_deref().or(default_target.as_deref());
    write_payload(&payload, target)?;

    diagnostics::print_diagnostics(&diagnostics);
    output::print_summary(&stats, &cycles);

    Ok(ExitCode::SUCCESS)
}

fn run_cycles(config: &AnalyzerConfig, json: bool) -> anyhow::Result<ExitCode> {
    let analysis = analyzer::analyze(config)?;
    diagnostics::print_diagnostics(&analysis.diagnostics);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.cycles)?);
    } else if analysis.cycles.is_empty() {
        println!("No circular dependencies found");
    } else {
        println!("Found {} circular dependencies:", analysis.cycles.len());
        for cycle in &analysis.cycles {
            println!("  {}", output::format_cycle(cycle));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Stdout by default; a write failure to `--output` is fatal.
fn write_payload(payload: &str, output: Option<&std::path::Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, payload).map_err(|source| AnalyzeError::WriteFailure {
                path: path.to_path_buf(),
                source,
            })?;
            eprintln!("Graph written to {}", path.display());
            Ok(())
        }
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn default_output_path(format: OutputFormat) -> Option<PathBuf> {
    match format {
        OutputFormat::Html => Some(PathBuf::from("dependency-graph.html")),
        _ => None,
    }
}
