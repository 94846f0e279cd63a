pub mod calls;
pub mod exports;
pub mod imports;

use std::cell::RefCell;
use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::AnalyzeError;
use crate::graph::node::{FileNode, ModuleId};
use crate::language::Language;
use crate::resolver::ModuleResolver;

// Thread-local Parser instances, one per rayon worker thread. Each Parser
// is initialised once per thread with its grammar.
thread_local! {
    static PARSER_TS: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&Language::Ts.grammar()).unwrap();
        p
    });
    static PARSER_TSX: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&Language::Tsx.grammar()).unwrap();
        p
    });
    static PARSER_JS: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&Language::Js.grammar()).unwrap();
        p
    });
}

/// Parse source text with the thread-local parser for `language`.
pub fn parse(source: &[u8], language: Language) -> Option<Tree> {
    match language {
        Language::Ts => PARSER_TS.with(|p| p.borrow_mut().parse(source, None)),
        Language::Tsx => PARSER_TSX.with(|p| p.borrow_mut().parse(source, None)),
        Language::Js | Language::Jsx => PARSER_JS.with(|p| p.borrow_mut().parse(source, None)),
    }
}

/// Index one file: parse it, extract raw imports and pass each through the
/// resolver, extract exports and call-site names.
///
/// The grammar is chosen by file extension, falling back to `fallback` (the
/// primary configured language) for unrecognized extensions. Unresolved import
/// specifiers are dropped from the list, not retained as failed placeholders.
///
/// # Errors
/// `ParseFailure` when tree-sitter cannot produce a tree. The caller excludes
/// the file and continues the batch.
pub fn index_file(
    path: &Path,
    source: &[u8],
    fallback: Language,
    resolver: &ModuleResolver,
    base: &Path,
) -> Result<FileNode, AnalyzeError> {
    let language = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Language::for_extension)
        .unwrap_or(fallback);

    let tree = parse(source, language).ok_or_else(|| AnalyzeError::ParseFailure {
        path: path.to_path_buf(),
        reason: "tree-sitter returned no tree".to_owned(),
    })?;

    let mut node = FileNode::new(ModuleId::from_path(path, base));

    for specifier in imports::extract_imports(&tree, source) {
        if let Ok(resolved) = resolver.resolve(&specifier, Some(path)) {
            node.imports.push(ModuleId::from_path(Path::new(&resolved), base));
        }
    }

    node.exports = exports::extract_exports(&tree, source);
    node.calls = calls::extract_calls(&tree, source);

    Ok(node)
}

/// Pre-order traversal of the whole tree. Extraction never exits early;
/// every visitor sees every node.
pub(crate) fn visit<'t>(node: Node<'t>, f: &mut impl FnMut(Node<'t>)) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, f);
    }
}

pub(crate) fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}
