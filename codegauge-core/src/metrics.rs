//! Metric extraction from the converted syntax tree
//!
//! Global invariants enforced:
//! - Pure computation over the inputs: no I/O, no shared state
//! - Deterministic results for identical input

use crate::ast::{NodeKind, SyntaxNode};
use std::collections::BTreeMap;

/// Readability thresholds; submissions at or past any one of them score 0.
const READABLE_LINE_LIMIT: usize = 100;
const READABLE_NESTING_LIMIT: usize = 3;
const READABLE_FUNCTION_LIMIT: usize = 10;

/// Number of newline-delimited segments; an empty submission is one line.
pub fn total_lines(source: &str) -> usize {
    source.split('\n').count()
}

/// Semantic character count, not byte length.
pub fn total_characters(source: &str) -> usize {
    source.chars().count()
}

/// Maximum nesting depth across all control-flow and scoping constructs.
///
/// Each conditional, loop, and scoped-resource block in the tree is measured
/// from its own position; the result is the deepest body chain found. A tree
/// with no such construct has level 0.
pub fn max_nesting_level(tree: &SyntaxNode) -> usize {
    let mut max_level = 0;
    tree.walk(&mut |node| {
        if node.is_nesting_construct() {
            max_level = max_level.max(nesting_level(node, 0));
        }
    });
    max_level
}

/// Depth of the deepest body chain under `node`, starting from `level`.
///
/// The recursion follows body containers of every node kind, so a function
/// defined inside a branch extends the chain. A node with an empty body
/// contributes the level it was reached at.
fn nesting_level(node: &SyntaxNode, level: usize) -> usize {
    node.body
        .iter()
        .map(|child| nesting_level(child, level + 1))
        .max()
        .unwrap_or(level)
}

/// Complexity score per function definition, keyed by name.
///
/// Definitions at any depth participate; a later definition overwrites an
/// earlier one of the same name. Unnamed definitions (error-recovery
/// artifacts) are skipped.
pub fn function_complexities(tree: &SyntaxNode) -> BTreeMap<String, i64> {
    let mut complexities = BTreeMap::new();
    tree.walk(&mut |node| {
        if node.kind == NodeKind::FunctionDef {
            if let Some(name) = &node.name {
                complexities.insert(name.clone(), complexity(node));
            }
        }
    });
    complexities
}

/// Subtree node count minus positional parameter count minus one.
///
/// A definition whose parameter list cannot be inspected scores 0.
fn complexity(function: &SyntaxNode) -> i64 {
    match function.param_count {
        Some(params) => function.subtree_size() as i64 - params as i64 - 1,
        None => 0,
    }
}

/// Binary readability signal: 10 when all three thresholds hold, else 0.
///
/// This is a step function, not a weighted composite; one violation is
/// enough to zero the score.
pub fn readability_score(
    total_lines: usize,
    max_nesting_level: usize,
    num_functions: usize,
) -> u32 {
    if total_lines < READABLE_LINE_LIMIT
        && max_nesting_level < READABLE_NESTING_LIMIT
        && num_functions < READABLE_FUNCTION_LIMIT
    {
        10
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: NodeKind) -> SyntaxNode {
        SyntaxNode::new(kind)
    }

    fn with_body(kind: NodeKind, body: Vec<SyntaxNode>) -> SyntaxNode {
        let mut n = node(kind);
        n.body = body;
        n
    }

    #[test]
    fn test_total_lines_splits_unconditionally() {
        assert_eq!(total_lines(""), 1);
        assert_eq!(total_lines("a"), 1);
        assert_eq!(total_lines("a\nb"), 2);
        assert_eq!(total_lines("a\nb\n"), 3);
    }

    #[test]
    fn test_total_characters_counts_chars_not_bytes() {
        assert_eq!(total_characters(""), 0);
        assert_eq!(total_characters("abc"), 3);
        assert_eq!(total_characters("héllo"), 5);
    }

    #[test]
    fn test_nesting_level_zero_without_constructs() {
        let tree = with_body(NodeKind::Other, vec![node(NodeKind::Other)]);
        assert_eq!(max_nesting_level(&tree), 0);
    }

    #[test]
    fn test_nesting_level_single_construct() {
        let conditional = with_body(NodeKind::Conditional, vec![node(NodeKind::Other)]);
        let tree = with_body(NodeKind::Other, vec![conditional]);
        assert_eq!(max_nesting_level(&tree), 1);
    }

    #[test]
    fn test_nesting_level_chains_through_bodies() {
        let inner = with_body(NodeKind::Loop, vec![node(NodeKind::Other)]);
        let outer = with_body(NodeKind::Conditional, vec![inner]);
        let tree = with_body(NodeKind::Other, vec![outer]);
        assert_eq!(max_nesting_level(&tree), 2);
    }

    #[test]
    fn test_nesting_level_empty_body_is_reached_level() {
        // A construct with an empty body contributes its own level, not a failure
        let tree = with_body(NodeKind::Other, vec![node(NodeKind::Conditional)]);
        assert_eq!(max_nesting_level(&tree), 0);
    }

    #[test]
    fn test_complexity_uninspectable_parameters_score_zero() {
        let mut function = node(NodeKind::FunctionDef);
        function.name = Some("f".to_string());
        function.body.push(node(NodeKind::Other));
        let tree = with_body(NodeKind::Other, vec![function]);
        let complexities = function_complexities(&tree);
        assert_eq!(complexities.get("f"), Some(&0));
    }

    #[test]
    fn test_complexity_subtracts_parameters_and_self() {
        let mut function = node(NodeKind::FunctionDef);
        function.name = Some("f".to_string());
        function.param_count = Some(3);
        function.body.push(node(NodeKind::Other));
        // subtree of 2, minus 3 parameters, minus 1: negative scores are kept
        let tree = with_body(NodeKind::Other, vec![function]);
        let complexities = function_complexities(&tree);
        assert_eq!(complexities.get("f"), Some(&-2));
    }

    #[test]
    fn test_readability_step_function() {
        assert_eq!(readability_score(99, 2, 9), 10);
        assert_eq!(readability_score(100, 2, 9), 0);
        assert_eq!(readability_score(99, 3, 9), 0);
        assert_eq!(readability_score(99, 2, 10), 0);
    }
}
