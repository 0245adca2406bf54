// src/syntax/tree.rs
//! Tree-sitter backed syntax checking.
//!
//! Tree-sitter never refuses input; it recovers and marks the damage with
//! `ERROR` and `MISSING` nodes. The first such node in document order becomes
//! the diagnostic. A clean tree then goes through the early-error pass in
//! [`super::early`], which applies the module goal and [`ParseOptions`].

use tree_sitter::{Node, Parser};

use super::early::first_early_error;
use super::{Diagnostic, ParseOptions, SyntaxChecker};

#[cfg(test)]
#[path = "syntax_test.rs"]
mod tests;

const MAX_TOKEN_LEN: usize = 40;

/// JavaScript checker on `tree-sitter-javascript`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterChecker;

impl TreeSitterChecker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxChecker for TreeSitterChecker {
    fn check_syntax(
        &self,
        source: &str,
        filename: &str,
        options: &ParseOptions,
    ) -> Option<Diagnostic> {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(tree_sitter_javascript::language()) {
            return Some(Diagnostic::at(filename, source, 0, 0, format!("Parser unavailable: {e}")));
        }
        let Some(tree) = parser.parse(source, None) else {
            return Some(Diagnostic::at(
                filename,
                source,
                0,
                0,
                "Parser produced no syntax tree".to_string(),
            ));
        };

        let root = tree.root_node();
        if root.has_error() {
            if let Some(node) = find_first(root, |n| n.is_error() || n.is_missing()) {
                return Some(describe_error(node, source, filename));
            }
        }

        let early = first_early_error(root, source, options)?;
        Some(Diagnostic::at(filename, source, early.row, early.column, early.message))
    }
}

/// Pre-order search without recursion; minified bundles nest deeply.
fn find_first<'t>(root: Node<'t>, mut pred: impl FnMut(Node<'t>) -> bool) -> Option<Node<'t>> {
    let mut cursor = root.walk();
    loop {
        if pred(cursor.node()) {
            return Some(cursor.node());
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn describe_error(node: Node, source: &str, filename: &str) -> Diagnostic {
    let pos = node.start_position();
    let message = if node.is_missing() {
        format!("Missing expected `{}`", node.kind())
    } else {
        unexpected_message(node, source)
    };
    Diagnostic::at(filename, source, pos.row, pos.column, message)
}

fn unexpected_message(node: Node, source: &str) -> String {
    let token = first_leaf(node)
        .utf8_text(source.as_bytes())
        .unwrap_or("")
        .lines()
        .next()
        .unwrap_or("")
        .trim();
    if token.is_empty() {
        return "Unexpected end of input".to_string();
    }
    let shown: String = token.chars().take(MAX_TOKEN_LEN).collect();
    format!("Unexpected token `{shown}`")
}

fn first_leaf(node: Node) -> Node {
    let mut cur = node;
    while let Some(child) = cur.child(0) {
        cur = child;
    }
    cur
}
