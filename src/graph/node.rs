use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::language::KNOWN_EXTENSIONS;
use crate::resolver::normalize_path;

/// Canonical identity of a source file: extension stripped, separators
/// normalized, expressed relative to the project base path when possible.
///
/// Two textually different but equivalent paths must produce the same
/// `ModuleId` — this is what makes import targets line up with indexed files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Wrap an already-canonical identity string.
    pub fn new(id: impl Into<String>) -> Self {
        ModuleId(id.into())
    }

    /// Canonicalize `path` against `base`.
    pub fn from_path(path: &Path, base: &Path) -> Self {
        let norm = normalize_path(&path.to_string_lossy());
        let base_norm = normalize_path(&base.to_string_lossy());

        // Strip the base only on a segment boundary: "/proj" must not match
        // inside "/project/x".
        let relative = match norm.strip_prefix(&base_norm) {
            Some(rest) if !base_norm.is_empty() => match rest.strip_prefix('/') {
                Some(under_base) => under_base,
                None if rest.is_empty() => rest,
                None => norm.as_str(),
            },
            _ => norm.as_str(),
        };

        ModuleId(strip_known_extension(relative).to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final path segment — used as the display label in every serializer.
    pub fn base_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drop a trailing recognized extension; unknown extensions are kept so that
/// `styles.css` and `styles` stay distinct.
fn strip_known_extension(path: &str) -> &str {
    if let Some((stem, ext)) = path.rsplit_once('.') {
        let last_segment_dot = !stem.is_empty() && !stem.ends_with('/');
        if last_segment_dot && KNOWN_EXTENSIONS.contains(&ext) {
            return stem;
        }
    }
    path
}

/// Classification of an exported symbol's declaration shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Class,
    Interface,
    Type,
    Enum,
    Variable,
    Default,
    Unknown,
}

/// Per-file record produced by the indexer: resolved imports in appearance
/// order, exported names with their kinds, and the set of call-site names.
/// Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct FileNode {
    pub id: ModuleId,
    /// Resolved import targets, appearance order preserved.
    pub imports: Vec<ModuleId>,
    /// Exported name -> kind. Names are unique; a re-declared name replaces
    /// the earlier kind.
    pub exports: Vec<(String, ExportKind)>,
    /// Call-site names: bare identifiers or two-part `receiver.method` strings.
    /// Set semantics, discovery order retained for deterministic output.
    pub calls: Vec<String>,
}

impl FileNode {
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            imports: Vec::new(),
            exports: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn export_kind(&self, name: &str) -> Option<ExportKind> {
        self.exports
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, k)| *k)
    }

    pub fn export_names(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(|(n, _)| n.as_str())
    }
}
