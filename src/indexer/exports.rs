use tree_sitter::{Node, Tree};

use crate::graph::node::ExportKind;

use super::{node_text, visit};

/// Extract every exported name with its kind classification.
///
/// Recognized forms:
/// - exported declarations: `export function f`, `export class C`,
///   `export interface I`, `export type T`, `export enum E` — including
///   default-marked ones, recorded under their declaration kind
/// - exported variable statements, destructured bindings included (every
///   bound name recorded individually)
/// - named (re-)export lists: `export { a, b }` / `export { a } from './x'`,
///   kind `unknown` absent deeper resolution
/// - default-export assignment expressions: `export default expr`
/// - CommonJS aggregates: `module.exports = { ... }` (whole-object) and
///   `module.exports.name = expr` / `exports.name = expr` (single property)
///
/// Kind classification inspects the right-hand shape: function and arrow
/// expressions are `function`, class expressions are `class`, anything else
/// is `variable`.
pub fn extract_exports(tree: &Tree, source: &[u8]) -> Vec<(String, ExportKind)> {
    let mut exports = Vec::new();

    visit(tree.root_node(), &mut |node| match node.kind() {
        "export_statement" => collect_export_statement(node, source, &mut exports),
        "assignment_expression" => collect_commonjs_assignment(node, source, &mut exports),
        _ => {}
    });

    exports
}

/// Names are unique within a file; a re-declared name replaces the earlier kind.
fn record(exports: &mut Vec<(String, ExportKind)>, name: &str, kind: ExportKind) {
    if name.is_empty() {
        return;
    }
    match exports.iter_mut().find(|(n, _)| n == name) {
        Some(entry) => entry.1 = kind,
        None => exports.push((name.to_owned(), kind)),
    }
}

fn collect_export_statement(node: Node, source: &[u8], exports: &mut Vec<(String, ExportKind)>) {
    // `export <declaration>` and `export default <declaration>`.
    if let Some(decl) = node.child_by_field_name("declaration") {
        collect_declaration(decl, source, exports);
        return;
    }

    // `export { a, b }` / `export { a } from './x'`.
    if let Some(clause) = first_child_of_kind(node, "export_clause") {
        let mut cursor = clause.walk();
        for child in clause.children(&mut cursor) {
            if child.kind() == "export_specifier" {
                if let Some(name) = child.child_by_field_name("name") {
                    record(exports, node_text(name, source), ExportKind::Unknown);
                }
            }
        }
        return;
    }

    // `export default <expression>` — a named expression keeps its name,
    // anything anonymous lands under "default".
    if let Some(value) = node.child_by_field_name("value") {
        if value.kind() == "identifier" {
            record(exports, node_text(value, source), ExportKind::Default);
        } else {
            record(exports, "default", ExportKind::Default);
        }
    }
}

fn collect_declaration(decl: Node, source: &[u8], exports: &mut Vec<(String, ExportKind)>) {
    let kind = match decl.kind() {
        "function_declaration" | "generator_function_declaration" => ExportKind::Function,
        "class_declaration" | "abstract_class_declaration" => ExportKind::Class,
        "interface_declaration" => ExportKind::Interface,
        "type_alias_declaration" => ExportKind::Type,
        "enum_declaration" => ExportKind::Enum,
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            for declarator in decl.children(&mut cursor) {
                if declarator.kind() == "variable_declarator" {
                    collect_declarator(declarator, source, exports);
                }
            }
            return;
        }
        _ => return,
    };

    // `export default function () {}` has no name node.
    let name = decl
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or("default");
    record(exports, name, kind);
}

fn collect_declarator(declarator: Node, source: &[u8], exports: &mut Vec<(String, ExportKind)>) {
    let Some(name_node) = declarator.child_by_field_name("name") else {
        return;
    };
    match name_node.kind() {
        "identifier" => {
            let kind = declarator
                .child_by_field_name("value")
                .map(classify_expression)
                .unwrap_or(ExportKind::Variable);
            record(exports, node_text(name_node, source), kind);
        }
        // Destructured export: record each bound name individually.
        "object_pattern" | "array_pattern" => collect_pattern_bindings(name_node, source, exports),
        _ => {}
    }
}

/// Bound identifiers inside a destructuring pattern. Property keys in
/// `{ key: bound }` pairs and default-value expressions (`{ a = expr }`) are
/// not bindings and contribute no names.
fn collect_pattern_bindings(pattern: Node, source: &[u8], exports: &mut Vec<(String, ExportKind)>) {
    match pattern.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            record(exports, node_text(pattern, source), ExportKind::Variable);
        }
        // Defaulted binding: only the left side binds a name.
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = pattern.child_by_field_name("left") {
                collect_pattern_bindings(left, source, exports);
            }
        }
        // `{ key: bound }`: the key is not a binding.
        "pair_pattern" => {
            if let Some(value) = pattern.child_by_field_name("value") {
                collect_pattern_bindings(value, source, exports);
            }
        }
        _ => {
            let mut cursor = pattern.walk();
            for child in pattern.named_children(&mut cursor) {
                collect_pattern_bindings(child, source, exports);
            }
        }
    }
}

fn collect_commonjs_assignment(node: Node, source: &[u8], exports: &mut Vec<(String, ExportKind)>) {
    let Some(left) = node.child_by_field_name("left") else {
        return;
    };
    if left.kind() != "member_expression" {
        return;
    }
    let Some(right) = node.child_by_field_name("right") else {
        return;
    };

    let target = node_text(left, source);
    if target == "module.exports" {
        match right.kind() {
            "object" => collect_object_properties(right, source, exports),
            "identifier" => record(exports, node_text(right, source), ExportKind::Default),
            _ => record(exports, "default", classify_expression(right)),
        }
    } else if let Some(name) = target
        .strip_prefix("module.exports.")
        .or_else(|| target.strip_prefix("exports."))
    {
        // Single-property assignment only — deeper chains are not exports.
        if !name.contains('.') {
            record(exports, name, classify_expression(right));
        }
    }
}

fn collect_object_properties(object: Node, source: &[u8], exports: &mut Vec<(String, ExportKind)>) {
    let mut cursor = object.walk();
    for child in object.named_children(&mut cursor) {
        match child.kind() {
            "pair" => {
                let Some(key) = child.child_by_field_name("key") else {
                    continue;
                };
                let name = node_text(key, source).trim_matches(|c| c == '"' || c == '\'');
                let kind = child
                    .child_by_field_name("value")
                    .map(classify_expression)
                    .unwrap_or(ExportKind::Variable);
                record(exports, name, kind);
            }
            "shorthand_property_identifier" => {
                record(exports, node_text(child, source), ExportKind::Variable);
            }
            "method_definition" => {
                if let Some(name) = child.child_by_field_name("name") {
                    record(exports, node_text(name, source), ExportKind::Function);
                }
            }
            _ => {}
        }
    }
}

fn classify_expression(value: Node) -> ExportKind {
    match value.kind() {
        "arrow_function" | "function_expression" | "function" | "generator_function" => {
            ExportKind::Function
        }
        "class" => ExportKind::Class,
        _ => ExportKind::Variable,
    }
}

fn first_child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}
