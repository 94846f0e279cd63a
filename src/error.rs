use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong during an analysis run.
///
/// Only `WriteFailure` is fatal. `ParseFailure` is caught per file (the file is
/// excluded and the batch continues), `UnresolvedImport` only ever drops a single
/// edge, and `EmptyFileSet` ends the run before any output is produced.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// An import specifier could not be mapped to an existing file.
    #[error("cannot resolve import '{specifier}'")]
    UnresolvedImport { specifier: String },

    /// A source file could not be parsed into a syntax tree.
    #[error("failed to parse {}: {reason}", path.display())]
    ParseFailure { path: PathBuf, reason: String },

    /// The glob pattern matched no files at all.
    #[error("no files matched pattern '{pattern}'")]
    EmptyFileSet { pattern: String },

    /// The serialized artifact could not be written to its destination.
    #[error("failed to write output to {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
