//! Name resolution over the parent chain of a node.
//!
//! Every lookup is [`nearest_ancestor`] with a different naming predicate.

use tree_sitter::Node;

use super::helpers::{field_text, get_node_text, is_capitalized};

/// Function-valued expressions a variable can be bound to.
const FUNCTION_VALUES: &[&str] = &[
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
];

/// Walk up from `node` (exclusive) and return the first name `name_of`
/// yields.
pub fn nearest_ancestor<'s, F>(node: Node, source: &'s str, name_of: F) -> Option<&'s str>
where
    F: Fn(&Node, &'s str) -> Option<&'s str>,
{
    let mut current = node.parent();
    while let Some(n) = current {
        if let Some(name) = name_of(&n, source) {
            return Some(name);
        }
        current = n.parent();
    }
    None
}

/// Name of a variable declarator whose value is a function.
///
/// Destructuring patterns have no single name and are skipped.
pub fn bound_function_name<'s>(node: &Node, source: &'s str) -> Option<&'s str> {
    if node.kind() != "variable_declarator" {
        return None;
    }
    let value = node.child_by_field_name("value")?;
    if !FUNCTION_VALUES.contains(&value.kind()) {
        return None;
    }
    let name = node.child_by_field_name("name")?;
    (name.kind() == "identifier").then(|| get_node_text(&name, source))
}

/// Name of a function declaration or function-bound variable.
pub fn declared_function_name<'s>(node: &Node, source: &'s str) -> Option<&'s str> {
    match node.kind() {
        "function_declaration" => field_text(node, "name", source),
        "variable_declarator" => bound_function_name(node, source),
        _ => None,
    }
}

/// Naming predicate for component-like constructs.
pub fn component_name<'s>(node: &Node, source: &'s str) -> Option<&'s str> {
    declared_function_name(node, source).filter(|name| is_capitalized(name))
}

/// Naming predicate for any named function-like construct.
pub fn function_name<'s>(node: &Node, source: &'s str) -> Option<&'s str> {
    match node.kind() {
        "generator_function_declaration" | "method_definition" => {
            field_text(node, "name", source)
        }
        _ => declared_function_name(node, source),
    }
}

/// Whether a declaration sits at module level, directly or behind `export`.
pub fn is_top_level(node: &Node) -> bool {
    let mut parent = node.parent();

    if node.kind() == "variable_declarator" {
        parent = parent
            .filter(|p| matches!(p.kind(), "lexical_declaration" | "variable_declaration"))
            .and_then(|p| p.parent());
    }

    let Some(mut p) = parent else {
        return false;
    };
    if p.kind() == "export_statement" {
        match p.parent() {
            Some(grand) => p = grand,
            None => return false,
        }
    }
    p.kind() == "program"
}
