use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::export::OutputFormat;
use crate::language::Language;

#[derive(Parser)]
#[command(name = "dep-graph", version, about = "Analyze imports and function calls between files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the dependency graph for files matching a glob pattern
    Analyze {
        /// Glob pattern selecting the files to analyze; falls back to the
        /// pattern in dep-graph.toml, then to everything under the base path
        #[arg(short, long)]
        pattern: Option<String>,

        /// Languages to analyze (comma separated: ts, tsx, js, jsx; default all)
        #[arg(short, long, value_delimiter = ',')]
        language: Option<Vec<Language>>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Root that module identifiers are made relative to
        #[arg(short, long, default_value = ".")]
        base: PathBuf,

        /// Write the serialized graph to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print each discovered file to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report circular dependencies for files matching a glob pattern
    Cycles {
        /// Glob pattern selecting the files to analyze
        #[arg(short, long)]
        pattern: String,

        /// Root that module identifiers are made relative to
        #[arg(short, long, default_value = ".")]
        base: PathBuf,

        /// Emit the cycle list as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
