//! Parsed tree representation
//!
//! The lowered syntax of one file plus everything the parser had to say
//! about it.

use super::syntax_node::CompilationUnitSyntax;
use crate::shared::models::{Diagnostic, DiagnosticKind, Span};

/// Parsed compilation unit
#[derive(Debug, Clone)]
pub struct ParsedTree {
    pub unit: CompilationUnitSyntax,

    /// File path (for error messages)
    pub file_path: String,

    /// Language
    pub language: String,

    /// Whether parsing had errors
    pub has_errors: bool,

    /// Parse errors (if any)
    pub errors: Vec<ParseError>,
}

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParsedTree {
    pub fn new(unit: CompilationUnitSyntax, file_path: String, language: String) -> Self {
        Self {
            unit,
            file_path,
            language,
            has_errors: false,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<ParseError>) -> Self {
        self.has_errors = !errors.is_empty();
        self.errors = errors;
        self
    }

    /// Parse errors as diagnostics
    ///
    /// Malformed imports are reported by the merge, which knows whether the
    /// imported path is a declared type.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(|e| {
                Diagnostic::at(
                    DiagnosticKind::ParseError,
                    e.message.clone(),
                    &self.file_path,
                    e.span,
                )
            })
            .collect()
    }

    /// Check if the unit declares nothing at all
    pub fn is_empty(&self) -> bool {
        self.unit.package.is_none() && self.unit.imports.is_empty() && self.unit.types.is_empty()
    }
}
