//! Per-file worker
//!
//! Parse → extract symbols → build local edges. Runs on rayon workers with no
//! shared mutable state; each call returns an immutable [`FileAnalysis`].

use tracing::{debug, debug_span};

use crate::features::cross_file::{DeclarationSummary, DependencyGraphBuilder, FileAnalysis};
use crate::features::parsing::application::ParseOutcome;
use crate::features::parsing::{ParseFileUseCase, Parser};
use crate::features::symbols::SymbolExtractor;

use super::SourceFile;

pub struct FileProcessor<P: Parser> {
    parse: ParseFileUseCase<P>,
    extractor: SymbolExtractor,
    include_type_use: bool,
}

impl<P: Parser> FileProcessor<P> {
    pub fn new(parser: P, include_type_use: bool) -> Self {
        Self {
            parse: ParseFileUseCase::new(parser),
            extractor: SymbolExtractor::new(),
            include_type_use,
        }
    }

    pub fn process(&self, file: &SourceFile) -> FileAnalysis {
        let _span = debug_span!("process_file", path = %file.path).entered();

        let tree = match self.parse.execute(&file.text, &file.path) {
            ParseOutcome::Parsed(tree) => tree,
            ParseOutcome::Unparseable(diagnostic) => {
                return FileAnalysis::unparsed(file.path.clone(), file.text.clone(), diagnostic);
            }
        };

        let unit = self.extractor.extract(&tree.unit, &file.path, &file.text);
        let graph = DependencyGraphBuilder::new(&unit, self.include_type_use).build();
        let declarations: Vec<DeclarationSummary> = unit
            .declarations()
            .into_iter()
            .map(|d| DeclarationSummary::from_declaration(d, &file.path))
            .collect();

        debug!(
            declarations = declarations.len(),
            references = graph.len(),
            parse_errors = tree.errors.len(),
            "Processed file"
        );

        FileAnalysis {
            path: file.path.clone(),
            text: file.text.clone(),
            diagnostics: tree.diagnostics(),
            unit: Some(unit),
            declarations,
            graph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::TreeSitterJavaParser;
    use crate::shared::models::DiagnosticKind;

    #[test]
    fn test_process_parsed_file() {
        let processor = FileProcessor::new(TreeSitterJavaParser::new(), true);
        let analysis = processor.process(&SourceFile::new(
            "food/Steak.java",
            "package food;\nimport java.io;\npublic class Steak extends Food { private static class Tapeworm {} }\n",
        ));

        assert!(analysis.is_parsed());
        let names: Vec<_> = analysis
            .declarations
            .iter()
            .map(|d| d.qualified_name.as_str())
            .collect();
        assert_eq!(names, vec!["food.Steak", "food.Steak.Tapeworm"]);
        // `import java.io;` is settled at merge
        assert!(analysis.diagnostics.is_empty());
        assert!(analysis.unit.as_ref().unwrap().imports[0].looks_like_package);
        assert!(!analysis.graph.is_empty());
    }

    #[test]
    fn test_process_unparseable_file() {
        let processor = FileProcessor::new(TreeSitterJavaParser::new(), true);
        let analysis = processor.process(&SourceFile::new("junk.java", "}}}} ((( ;;; %%%"));
        assert!(!analysis.is_parsed());
        assert!(analysis.declarations.is_empty());
        assert_eq!(analysis.diagnostics[0].kind, DiagnosticKind::UnparseableFile);
    }
}
