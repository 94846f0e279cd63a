use serde::{Deserialize, Serialize};

/// A language variant handled by dep-graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ts,
    Tsx,
    Js,
    Jsx,
}

/// Extensions the resolver recognizes, in fallback preference order.
pub const KNOWN_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "json"];

impl Language {
    /// The file extension this variant owns.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Ts => "ts",
            Language::Tsx => "tsx",
            Language::Js => "js",
            Language::Jsx => "jsx",
        }
    }

    /// Map a file extension to its language variant.
    pub fn for_extension(ext: &str) -> Option<Language> {
        match ext {
            "ts" => Some(Language::Ts),
            "tsx" => Some(Language::Tsx),
            "js" => Some(Language::Js),
            "jsx" => Some(Language::Jsx),
            _ => None,
        }
    }

    /// The tree-sitter grammar for this variant. The JavaScript grammar also
    /// covers JSX syntax, so `Js` and `Jsx` share one grammar.
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::Ts => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::Js | Language::Jsx => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
