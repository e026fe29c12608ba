//! Python parser adapter using tree-sitter
//!
//! Turns a source submission into the closed-variant tree in [`crate::ast`],
//! or reports the first syntax error with its location. tree-sitter recovers
//! from malformed input instead of failing outright, so syntax errors are
//! detected by scanning the produced tree for ERROR and missing nodes.

use crate::ast::{NodeKind, SyntaxNode};
use anyhow::{Context, Result};
use tree_sitter::{Node, Parser};

/// Outcome of parsing one source submission.
///
/// Exactly one of the two is produced per call; a submission that parses
/// cleanly always yields a tree, even when it is empty.
pub enum ParseOutcome {
    Tree(SyntaxNode),
    SyntaxError(String),
}

/// Parse a submission into a syntax tree, or describe its first syntax error.
///
/// Only syntax failures are reported through [`ParseOutcome::SyntaxError`];
/// a tree-sitter infrastructure failure is fatal and propagates as `Err`.
pub fn parse_source(source: &str) -> Result<ParseOutcome> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    parser
        .set_language(&language.into())
        .context("Failed to set Python language for parser")?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| anyhow::anyhow!("tree-sitter produced no tree for the submission"))?;

    let root = tree.root_node();
    if root.has_error() {
        return Ok(ParseOutcome::SyntaxError(first_error_message(root, source)));
    }

    Ok(ParseOutcome::Tree(convert_module(root, source)))
}

/// Describe the first ERROR or missing node, with its 1-indexed line.
fn first_error_message(root: Node, source: &str) -> String {
    match find_first_error(root) {
        Some(node) => {
            let row = node.start_position().row + 1; // tree-sitter rows are 0-indexed
            let column = node.start_position().column;
            if node.is_missing() {
                format!("expected {} (line {}, column {})", node.kind(), row, column)
            } else {
                let text = snippet(source.get(node.byte_range()).unwrap_or(""));
                if text.is_empty() {
                    format!("invalid syntax (line {}, column {})", row, column)
                } else {
                    format!("invalid syntax near '{}' (line {}, column {})", text, row, column)
                }
            }
        }
        None => "invalid syntax".to_string(),
    }
}

/// Locate the first ERROR or missing node in source order.
fn find_first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        // Clean subtree, nothing to find below
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_first_error(child) {
            return Some(found);
        }
    }
    None
}

/// First line of the offending text, capped for display.
fn snippet(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    first_line.chars().take(30).collect::<String>().trim().to_string()
}

/// Convert the module root into the analysis tree.
///
/// The module's statements form its body directly; Python has no block
/// wrapper at the top level.
fn convert_module(root: Node, source: &str) -> SyntaxNode {
    let mut module = SyntaxNode::new(NodeKind::Other);
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if is_converted(child) {
            module.body.push(convert_node(child, source));
        }
    }
    module
}

/// Convert one named node and its subtree.
///
/// `block` children are elided: their statements are spliced into the
/// parent's body container, so body statements hang directly off the
/// construct that owns them. Every other named child lands in `rest`.
fn convert_node(node: Node, source: &str) -> SyntaxNode {
    let mut converted = SyntaxNode::new(kind_of(node));

    let mut name_field_id = None;
    if converted.kind == NodeKind::FunctionDef {
        let name_node = node.child_by_field_name("name");
        converted.name = name_node
            .and_then(|n| source.get(n.byte_range()))
            .map(|s| s.to_string());
        converted.param_count = positional_param_count(node);
        // The name identifier is consumed into `name`, not kept as a child
        name_field_id = name_node.map(|n| n.id());
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !is_converted(child) || Some(child.id()) == name_field_id {
            continue;
        }
        if child.kind() == "block" {
            let mut inner = child.walk();
            for stmt in child.children(&mut inner) {
                if is_converted(stmt) {
                    converted.body.push(convert_node(stmt, source));
                }
            }
        } else {
            converted.rest.push(convert_node(child, source));
        }
    }

    converted
}

/// Whether a tree-sitter node becomes a node of the analysis tree.
fn is_converted(node: Node) -> bool {
    node.is_named() && node.kind() != "comment"
}

/// Map a tree-sitter node kind onto the closed tag set.
fn kind_of(node: Node) -> NodeKind {
    match node.kind() {
        "if_statement" | "elif_clause" => NodeKind::Conditional,
        "for_statement" | "while_statement" => NodeKind::Loop,
        "with_statement" => NodeKind::ScopedResource,
        "function_definition" | "async_function_definition" => NodeKind::FunctionDef,
        _ => NodeKind::Other,
    }
}

/// Count declared positional parameters.
///
/// Parameters after `*`, `*args`, or `**kwargs` are keyword-only and do not
/// count. Returns `None` when the parameter list is absent, which error
/// recovery can produce.
fn positional_param_count(node: Node) -> Option<usize> {
    let params = node.child_by_field_name("parameters")?;
    let mut count = 0;
    let mut cursor = params.walk();
    for child in params.children(&mut cursor) {
        match child.kind() {
            "identifier" | "typed_parameter" | "default_parameter" | "typed_default_parameter" => {
                count += 1;
            }
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => break,
            _ => {}
        }
    }
    Some(count)
}
