use serde::Serialize;

/// The kind of directed edge between two file nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EdgeKind {
    /// Source file imports the target file.
    Import,
    /// Source file calls `symbol`, which the target file exports as a function.
    /// Heuristic name match — not reference resolution.
    Call { symbol: String },
}

impl EdgeKind {
    /// Wire-format edge type string shared by all serializers.
    pub fn type_str(&self) -> &'static str {
        match self {
            EdgeKind::Import => "import",
            EdgeKind::Call { .. } => "call",
        }
    }

    /// The call symbol, when this is a call edge.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            EdgeKind::Import => None,
            EdgeKind::Call { symbol } => Some(symbol),
        }
    }
}
