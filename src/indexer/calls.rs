use tree_sitter::Tree;

use super::{node_text, visit};

/// Collect call-site names from every `call_expression` in the file.
///
/// Simple calls record the bare identifier (`doWork`), single-level member
/// calls record `object.method`. Deeper chains and computed callees are
/// skipped. Each name is recorded once, in discovery order.
pub fn extract_calls(tree: &Tree, source: &[u8]) -> Vec<String> {
    let mut calls = Vec::new();

    visit(tree.root_node(), &mut |node| {
        if node.kind() != "call_expression" {
            return;
        }
        let Some(callee) = node.child_by_field_name("function") else {
            return;
        };
        match callee.kind() {
            "identifier" => push_unique(&mut calls, node_text(callee, source)),
            "member_expression" => {
                let object = callee.child_by_field_name("object");
                let property = callee.child_by_field_name("property");
                if let (Some(object), Some(property)) = (object, property) {
                    if object.kind() == "identifier" && property.kind() == "property_identifier" {
                        let name =
                            format!("{}.{}", node_text(object, source), node_text(property, source));
                        push_unique(&mut calls, &name);
                    }
                }
            }
            _ => {}
        }
    });

    calls
}

fn push_unique(calls: &mut Vec<String>, name: &str) {
    if !calls.iter().any(|c| c == name) {
        calls.push(name.to_owned());
    }
}
