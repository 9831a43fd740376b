//! Parse file use case

use tracing::{debug, warn};

use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::ports::Parser;
use crate::shared::models::{Diagnostic, DiagnosticKind, Span};

/// What parsing one file produced
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Parsed(ParsedTree),
    /// The file yielded no usable tree; the diagnostic says why
    Unparseable(Diagnostic),
}

impl ParseOutcome {
    pub fn tree(&self) -> Option<&ParsedTree> {
        match self {
            ParseOutcome::Parsed(tree) => Some(tree),
            ParseOutcome::Unparseable(_) => None,
        }
    }
}

/// Parse file use case
pub struct ParseFileUseCase<P: Parser> {
    parser: P,
}

impl<P: Parser> ParseFileUseCase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Execute the parse operation
    ///
    /// Never fails: a parser error becomes an `UnparseableFile` diagnostic.
    pub fn execute(&self, source: &str, file_path: &str) -> ParseOutcome {
        match self.parser.parse(source, file_path) {
            Ok(tree) => {
                debug!(
                    file = file_path,
                    types = tree.unit.types.len(),
                    errors = tree.errors.len(),
                    "Parsed file"
                );
                ParseOutcome::Parsed(tree)
            }
            Err(e) => {
                warn!(file = file_path, error = %e, "Unparseable file");
                ParseOutcome::Unparseable(Diagnostic::at(
                    DiagnosticKind::UnparseableFile,
                    e.to_string(),
                    file_path,
                    Span::zero(),
                ))
            }
        }
    }

    pub fn language_name(&self) -> &'static str {
        self.parser.language_name()
    }
}
