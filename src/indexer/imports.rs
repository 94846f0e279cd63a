use tree_sitter::{Node, Tree};

use super::{node_text, visit};

/// Extract raw relative import specifiers in appearance order.
///
/// Recognized forms:
/// - declarative imports with a string specifier: `import { x } from './m'`
///   (including type-only and side-effect imports)
/// - call-style module loading whose single argument is a relative string:
///   `require('./m')` and dynamic `import('./m')`
///
/// Only specifiers starting with `.` or `..` are tracked; package imports are
/// intentionally excluded.
pub fn extract_imports(tree: &Tree, source: &[u8]) -> Vec<String> {
    let mut specifiers = Vec::new();

    visit(tree.root_node(), &mut |node| match node.kind() {
        "import_statement" => {
            if let Some(spec) = node
                .child_by_field_name("source")
                .and_then(|s| string_fragment(s, source))
            {
                push_relative(&mut specifiers, spec);
            }
        }
        "call_expression" => {
            if is_module_load_call(node, source) {
                if let Some(spec) = single_string_argument(node, source) {
                    push_relative(&mut specifiers, spec);
                }
            }
        }
        _ => {}
    });

    specifiers
}

/// The text inside a `string` node. Empty strings carry no fragment child.
pub(crate) fn string_fragment(string_node: Node, source: &[u8]) -> Option<String> {
    let mut cursor = string_node.walk();
    string_node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "string_fragment")
        .map(|c| node_text(c, source).to_owned())
}

fn is_module_load_call(call: Node, source: &[u8]) -> bool {
    match call.child_by_field_name("function") {
        Some(callee) if callee.kind() == "identifier" => node_text(callee, source) == "require",
        // Dynamic `import(...)` — the callee is the `import` keyword node.
        Some(callee) => callee.kind() == "import",
        None => false,
    }
}

/// The call's argument, only when it is exactly one string literal.
fn single_string_argument(call: Node, source: &[u8]) -> Option<String> {
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let named: Vec<Node> = args.named_children(&mut cursor).collect();
    match named.as_slice() {
        [only] if only.kind() == "string" => string_fragment(*only, source),
        _ => None,
    }
}

fn push_relative(out: &mut Vec<String>, specifier: String) {
    if specifier.starts_with('.') {
        out.push(specifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::parse;
    use crate::language::Language;

    fn imports_of(src: &str, language: Language) -> Vec<String> {
        let tree = parse(src.as_bytes(), language).expect("parse");
        extract_imports(&tree, src.as_bytes())
    }

    #[test]
    fn test_relative_esm_import_tracked() {
        let found = imports_of("import { helper } from './utils';", Language::Ts);
        assert_eq!(found, vec!["./utils"]);
    }

    #[test]
    fn test_package_import_excluded() {
        let found = imports_of(
            "import React from 'react';\nimport { x } from '../lib/x';",
            Language::Ts,
        );
        assert_eq!(found, vec!["../lib/x"]);
    }

    #[test]
    fn test_side_effect_import_tracked() {
        let found = imports_of("import './polyfill';", Language::Ts);
        assert_eq!(found, vec!["./polyfill"]);
    }

    #[test]
    fn test_require_call_tracked() {
        let found = imports_of("const data = require('./data');", Language::Js);
        assert_eq!(found, vec!["./data"]);
    }

    #[test]
    fn test_require_of_package_excluded() {
        let found = imports_of("const fs = require('fs');", Language::Js);
        assert!(found.is_empty());
    }

    #[test]
    fn test_dynamic_import_tracked() {
        let found = imports_of("const lazy = await import('./lazy');", Language::Ts);
        assert_eq!(found, vec!["./lazy"]);
    }

    #[test]
    fn test_non_literal_require_ignored() {
        let found = imports_of("const m = require(name);", Language::Js);
        assert!(found.is_empty());
    }

    #[test]
    fn test_appearance_order_preserved() {
        let src = "import './b';\nimport './a';\nconst c = require('./c');";
        let found = imports_of(src, Language::Js);
        assert_eq!(found, vec!["./b", "./a", "./c"]);
    }
}
