//! Tree-sitter parser implementation
//!
//! This is where tree-sitter dependency lives.

use tree_sitter::{Node as TSNode, Parser as TSParser};

use crate::errors::{JavagraphError, Result};
use crate::features::parsing::domain::{ParseError, ParsedTree};
use crate::features::parsing::plugins::JavaPlugin;
use crate::features::parsing::ports::{Parser, SpanExt};

const SNIPPET_LEN: usize = 40;

/// Tree-sitter based Java parser
///
/// A fresh `tree_sitter::Parser` is created per call, so one instance can be
/// shared by every worker.
#[derive(Default)]
pub struct TreeSitterJavaParser {
    plugin: JavaPlugin,
}

impl TreeSitterJavaParser {
    pub fn new() -> Self {
        Self {
            plugin: JavaPlugin::new(),
        }
    }

    /// Collect parse errors
    ///
    /// Only the outermost `ERROR` or missing node of a region is reported.
    fn collect_errors(&self, node: &TSNode, source: &str, errors: &mut Vec<ParseError>) {
        if node.is_error() {
            let snippet: String = source
                .get(node.byte_range())
                .unwrap_or("")
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .chars()
                .take(SNIPPET_LEN)
                .collect();
            errors.push(ParseError {
                message: format!("syntax error near '{}'", snippet),
                span: node.to_span(),
            });
            return;
        }
        if node.is_missing() {
            errors.push(ParseError {
                message: format!("missing '{}'", node.kind()),
                span: node.to_span(),
            });
            return;
        }
        if !node.has_error() {
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_errors(&child, source, errors);
        }
    }
}

impl Parser for TreeSitterJavaParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.plugin.tree_sitter_language())
            .map_err(|e| JavagraphError::parse_error(format!("Failed to set language: {}", e)))?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            JavagraphError::parse_error(format!("{}: tree-sitter produced no tree", file_path))
        })?;

        let root = tree.root_node();
        let unit = self.plugin.lower(&tree, source);
        let mut errors = Vec::new();
        self.collect_errors(&root, source, &mut errors);

        let parsed = ParsedTree::new(unit, file_path.to_string(), self.language_name().to_string())
            .with_errors(errors);

        if parsed.has_errors && parsed.is_empty() {
            return Err(JavagraphError::parse_error(format!(
                "{}: no recognisable declaration",
                file_path
            )));
        }

        Ok(parsed)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "java"
    }

    fn language_name(&self) -> &'static str {
        "java"
    }
}
