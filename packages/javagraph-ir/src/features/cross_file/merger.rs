//! Graph Merger & Conflict Detector
//!
//! Single-writer reduction over per-file results. Files are folded in
//! (path, text) order so the merged graph does not depend on which worker
//! finished first.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace, warn};

use crate::config::{AnalysisConfig, ConflictPolicy};
use crate::shared::models::{Diagnostic, DiagnosticKind, Location, Severity, Span};

use super::import_resolver::ImportResolver;
use super::symbol_table::{DeclarationSummary, SymbolTable};
use super::types::{
    DependencyEdge, EdgeKind, EdgeTarget, FileAnalysis, ImportResolution, LocalResolution,
    ResolvedImport,
};

/// Global view after merging every file
#[derive(Debug, Default)]
pub struct MergedGraph {
    pub symbols: SymbolTable,
    /// Qualified names claimed by several files, with every claim's location
    pub conflicts: BTreeMap<String, Vec<Location>>,
    /// Sorted, deduplicated by (from, to, kind) and, for conflicted
    /// sources, by claimant file
    pub edges: Vec<DependencyEdge>,
    /// Import resolutions per file path
    pub imports: BTreeMap<String, Vec<ResolvedImport>>,
    /// Sorted
    pub diagnostics: Vec<Diagnostic>,
}

pub struct GraphMerger<'c> {
    config: &'c AnalysisConfig,
}

impl<'c> GraphMerger<'c> {
    pub fn new(config: &'c AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn merge(&self, files: &[FileAnalysis]) -> MergedGraph {
        let mut files: Vec<&FileAnalysis> = files.iter().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.text.cmp(&b.text)));

        let mut diagnostics: Vec<Diagnostic> = files
            .iter()
            .flat_map(|f| f.diagnostics.iter().chain(&f.graph.diagnostics).cloned())
            .collect();

        let (symbols, conflicts) = self.admit(&files, &mut diagnostics);
        debug!(
            symbols = symbols.len(),
            conflicts = conflicts.len(),
            "Symbol table merged"
        );

        let mut edges = EdgeSet::new(&symbols, &conflicts, self.config.conflict_policy);
        let mut imports = BTreeMap::new();
        let resolver = ImportResolver::new(&symbols, &conflicts);

        for file in files.iter().copied() {
            let Some(unit) = &file.unit else {
                continue;
            };

            let top_level: Vec<(&str, bool)> = unit
                .types
                .iter()
                .map(|t| (t.qualified_name.as_str(), t.file_local))
                .collect();

            let mut resolved_imports = Vec::with_capacity(unit.imports.len());
            for import in &unit.imports {
                let resolution = resolver.resolve_import(import, &file.path);
                let target = match &resolution {
                    ImportResolution::Resolved { target } => Some(EdgeTarget::Declared(target.clone())),
                    ImportResolution::Conflicted { target } => {
                        Some(EdgeTarget::Conflicted(target.clone()))
                    }
                    ImportResolution::External { name } => {
                        self.report_external(name, &file.path, import.span, &mut diagnostics);
                        Some(EdgeTarget::External(name.clone()))
                    }
                    ImportResolution::Malformed => {
                        diagnostics.push(Diagnostic::at(
                            DiagnosticKind::MalformedImport,
                            format!(
                                "import '{}' names a package, not a type; did you mean '{}.*'?",
                                import.path, import.path
                            ),
                            &file.path,
                            import.span,
                        ));
                        None
                    }
                    ImportResolution::Scope { .. } => None,
                };
                if let Some(target) = target {
                    for &(from, from_file_local) in &top_level {
                        edges.add(from, from_file_local, target.clone(), EdgeKind::Import, &file.path);
                    }
                }
                resolved_imports.push(ResolvedImport::new(import.display(), import.span, resolution));
            }
            imports.insert(file.path.clone(), resolved_imports);

            for reference in &file.graph.references {
                let target = match &reference.resolution {
                    LocalResolution::TypeVariable(name) => EdgeTarget::TypeVariable(name.clone()),
                    LocalResolution::MemberType(name) if conflicts.contains_key(name) => {
                        EdgeTarget::Conflicted(name.clone())
                    }
                    LocalResolution::MemberType(name) => EdgeTarget::Declared(name.clone()),
                    LocalResolution::Deferred(candidates) => {
                        let target = resolver.resolve_reference(
                            &reference.written,
                            candidates,
                            &file.path,
                            reference.span,
                            &mut diagnostics,
                        );
                        if let EdgeTarget::External(name) = &target {
                            self.report_external(name, &file.path, reference.span, &mut diagnostics);
                        }
                        target
                    }
                };
                trace!(from = %reference.from, to = %target, kind = %reference.kind, "Resolved reference");
                edges.add(
                    &reference.from,
                    reference.from_file_local,
                    target,
                    reference.kind,
                    &file.path,
                );
            }
        }

        let edges = edges.into_sorted();
        diagnostics.sort();
        diagnostics.dedup();

        MergedGraph {
            symbols,
            conflicts,
            edges,
            imports,
            diagnostics,
        }
    }

    /// Admit uniquely claimed names; every other name becomes a conflict
    fn admit(
        &self,
        files: &[&FileAnalysis],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (SymbolTable, BTreeMap<String, Vec<Location>>) {
        let mut claims: BTreeMap<&str, Vec<&DeclarationSummary>> = BTreeMap::new();
        for file in files.iter().copied() {
            for decl in &file.declarations {
                claims.entry(decl.qualified_name.as_str()).or_default().push(decl);
            }
        }

        let mut symbols = SymbolTable::new();
        let mut conflicts = BTreeMap::new();
        for (name, decls) in claims {
            if let [decl] = decls.as_slice() {
                if let Err(existing) = symbols.insert((*decl).clone()) {
                    debug!(qualified_name = %name, existing, "Declaration already admitted");
                }
                continue;
            }

            let locations: Vec<Location> = decls.iter().map(|d| d.location()).collect();
            warn!(
                qualified_name = %name,
                claims = decls.len(),
                "Duplicate declaration; excluded from the symbol table"
            );
            let paths: Vec<&str> = decls.iter().map(|d| d.file.as_str()).collect();
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                kind: DiagnosticKind::DuplicateDeclaration,
                message: format!(
                    "'{}' is declared {} times ({}): {}",
                    name,
                    decls.len(),
                    paths.join(", "),
                    describe_differences(&decls)
                ),
                locations: locations.clone(),
            });
            conflicts.insert(name.to_string(), locations);
        }
        (symbols, conflicts)
    }

    fn report_external(
        &self,
        name: &str,
        file: &str,
        span: Span,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if let Some(root) = self.config.package_root_of(name) {
            diagnostics.push(
                Diagnostic::at(
                    DiagnosticKind::UnresolvedReference,
                    format!(
                        "'{}' lies under package root '{}' but is not declared in the input",
                        name, root
                    ),
                    file,
                    span,
                )
                .with_severity(Severity::Warning),
            );
        } else if self.config.report_external_references {
            diagnostics.push(Diagnostic::at(
                DiagnosticKind::UnresolvedReference,
                format!("'{}' is external to the input", name),
                file,
                span,
            ));
        }
    }
}

/// Edge accumulator applying the visibility filter and conflict policy
struct EdgeSet<'a> {
    symbols: &'a SymbolTable,
    conflicts: &'a BTreeMap<String, Vec<Location>>,
    policy: ConflictPolicy,
    /// Keyed by (from, to, kind, claimant file); the file is empty unless
    /// `from` is conflicted, so each claimant keeps its own edges
    edges: BTreeMap<(String, EdgeTarget, EdgeKind, String), DependencyEdge>,
}

impl<'a> EdgeSet<'a> {
    fn new(
        symbols: &'a SymbolTable,
        conflicts: &'a BTreeMap<String, Vec<Location>>,
        policy: ConflictPolicy,
    ) -> Self {
        Self {
            symbols,
            conflicts,
            policy,
            edges: BTreeMap::new(),
        }
    }

    fn add(&mut self, from: &str, from_file_local: bool, to: EdgeTarget, kind: EdgeKind, file: &str) {
        if matches!(&to, EdgeTarget::Declared(target) if target == from) {
            return;
        }

        // (target file, target file-local)
        let (target_file, target_file_local) = match &to {
            EdgeTarget::Declared(name) => match self.symbols.get(name) {
                Some(decl) => (Some(decl.file.as_str()), decl.file_local),
                None => (None, false),
            },
            EdgeTarget::TypeVariable(_) => (Some(file), false),
            EdgeTarget::External(_) | EdgeTarget::Conflicted(_) => (None, false),
        };
        if (from_file_local || target_file_local) && target_file != Some(file) {
            return;
        }

        let mut edge = DependencyEdge::new(from, to, kind, file);
        let mut claimant = String::new();
        if self.conflicts.contains_key(from) {
            match self.policy {
                ConflictPolicy::Drop => return,
                ConflictPolicy::Mark => edge = edge.mark_conflicted(),
            }
            claimant = file.to_string();
        }

        self.edges
            .entry((edge.from.clone(), edge.to.clone(), edge.kind, claimant))
            .or_insert(edge);
    }

    fn into_sorted(self) -> Vec<DependencyEdge> {
        let mut edges: Vec<DependencyEdge> = self.edges.into_values().collect();
        edges.sort();
        edges
    }
}

/// Structural difference between the claims on one qualified name
fn describe_differences(decls: &[&DeclarationSummary]) -> String {
    let Some((first, rest)) = decls.split_first() else {
        return String::new();
    };

    let mut parts = Vec::new();
    for other in rest {
        if other.kind != first.kind {
            parts.push(format!(
                "kind {:?} in {} vs {:?} in {}",
                first.kind, first.file, other.kind, other.file
            ));
        }
        if other.generics.len() != first.generics.len() {
            parts.push(format!(
                "generic arity {} in {} vs {} in {}",
                first.generics.len(),
                first.file,
                other.generics.len(),
                other.file
            ));
        }
        if other.supertypes != first.supertypes {
            parts.push(format!(
                "supertypes [{}] in {} vs [{}] in {}",
                first.supertypes.join(", "),
                first.file,
                other.supertypes.join(", "),
                other.file
            ));
        }

        let ours: BTreeSet<&str> = first.members.iter().map(|m| m.signature.as_str()).collect();
        let theirs: BTreeSet<&str> = other.members.iter().map(|m| m.signature.as_str()).collect();
        let only_ours: Vec<&str> = ours.difference(&theirs).copied().collect();
        let only_theirs: Vec<&str> = theirs.difference(&ours).copied().collect();
        if !only_ours.is_empty() {
            parts.push(format!(
                "members only in {}: {}",
                first.file,
                only_ours.join(", ")
            ));
        }
        if !only_theirs.is_empty() {
            parts.push(format!(
                "members only in {}: {}",
                other.file,
                only_theirs.join(", ")
            ));
        }
    }

    if parts.is_empty() {
        "declarations are structurally identical".to_string()
    } else {
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cross_file::edge_builder::DependencyGraphBuilder;
    use crate::features::parsing::{Parser, TreeSitterJavaParser};
    use crate::features::symbols::SymbolExtractor;

    fn analyze_file(path: &str, source: &str) -> FileAnalysis {
        let tree = TreeSitterJavaParser::new().parse(source, path).unwrap();
        let unit = SymbolExtractor::new().extract(&tree.unit, path, source);
        let graph = DependencyGraphBuilder::new(&unit, true).build();
        let declarations = unit
            .declarations()
            .into_iter()
            .map(|d| DeclarationSummary::from_declaration(d, path))
            .collect();
        FileAnalysis {
            path: path.to_string(),
            text: source.to_string(),
            unit: Some(unit),
            declarations,
            graph,
            diagnostics: tree.diagnostics(),
        }
    }

    fn has_edge(graph: &MergedGraph, from: &str, to: &EdgeTarget, kind: EdgeKind) -> bool {
        graph
            .edges
            .iter()
            .any(|e| e.from == from && &e.to == to && e.kind == kind)
    }

    #[test]
    fn test_cross_file_resolution() {
        let config = AnalysisConfig::default();
        let merged = GraphMerger::new(&config).merge(&[
            analyze_file("food/Steak.java", "package food;\npublic class Steak extends Food {}\n"),
            analyze_file("food/Food.java", "package food;\npublic abstract class Food {}\n"),
        ]);
        assert!(has_edge(
            &merged,
            "food.Steak",
            &EdgeTarget::Declared("food.Food".into()),
            EdgeKind::Extends
        ));
        assert_eq!(merged.symbols.len(), 2);
        assert!(merged.diagnostics.is_empty());
    }

    #[test]
    fn test_duplicates_are_conflicts() {
        let config = AnalysisConfig::default();
        let merged = GraphMerger::new(&config).merge(&[
            analyze_file("a/Burger.java", "package food;\npublic class Burger { int a; }\n"),
            analyze_file("b/Burger.java", "package food;\npublic class Burger<T> { }\n"),
            analyze_file(
                "food/Shop.java",
                "package food;\npublic class Shop { Burger special; }\n",
            ),
        ]);

        assert!(!merged.symbols.contains("food.Burger"));
        assert_eq!(merged.conflicts["food.Burger"].len(), 2);

        let duplicates: Vec<_> = merged
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::DuplicateDeclaration)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].locations.len(), 2);
        assert!(duplicates[0].message.contains("generic arity 0 in a/Burger.java vs 1 in b/Burger.java"));
        assert!(duplicates[0].message.contains("members only in a/Burger.java: a: int"));

        assert!(has_edge(
            &merged,
            "food.Shop",
            &EdgeTarget::Conflicted("food.Burger".into()),
            EdgeKind::FieldType
        ));
    }

    #[test]
    fn test_conflict_policy() {
        let files = || {
            vec![
                analyze_file("a/Burger.java", "package food;\nclass Burger extends Food {}\n"),
                analyze_file("b/Burger.java", "package food;\nclass Burger extends Food {}\n"),
                analyze_file("food/Food.java", "package food;\nclass Food {}\n"),
            ]
        };

        let mark = AnalysisConfig::default();
        let merged = GraphMerger::new(&mark).merge(&files());
        let from_burger: Vec<_> = merged.edges.iter().filter(|e| e.from == "food.Burger").collect();
        assert_eq!(from_burger.len(), 2, "one edge per claimant");
        assert!(from_burger.iter().all(|e| e.conflicted));
        let claimant_files: Vec<_> = from_burger.iter().map(|e| e.file.as_str()).collect();
        assert_eq!(claimant_files, vec!["a/Burger.java", "b/Burger.java"]);

        let drop = AnalysisConfig::default().conflict_policy(ConflictPolicy::Drop);
        let merged = GraphMerger::new(&drop).merge(&files());
        assert!(merged.edges.iter().all(|e| e.from != "food.Burger"));
    }

    #[test]
    fn test_edges_of_one_declaration_still_deduplicated() {
        let config = AnalysisConfig::default();
        let merged = GraphMerger::new(&config).merge(&[
            analyze_file(
                "food/Plate.java",
                "package food;\nclass Plate { Food first; Food second; }\n",
            ),
            analyze_file("food/Food.java", "package food;\nclass Food {}\n"),
        ]);
        let from_plate: Vec<_> = merged.edges.iter().filter(|e| e.from == "food.Plate").collect();
        assert_eq!(from_plate.len(), 1);
    }

    #[test]
    fn test_malformed_imports_settled_at_merge() {
        let config = AnalysisConfig::default();
        let merged = GraphMerger::new(&config).merge(&[
            analyze_file("app/model/user.java", "package app.model;\npublic class user {}\n"),
            analyze_file("a/B/C.java", "package a.B;\npublic class C {}\n"),
            analyze_file(
                "app/Account.java",
                "package app;\nimport app.model.user;\nimport a.B;\nimport java.io;\npublic class Account { private user owner; }\n",
            ),
        ]);

        let malformed: Vec<_> = merged
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::MalformedImport)
            .map(|d| d.primary_location().unwrap().span.start_line)
            .collect();
        assert_eq!(malformed, vec![3, 4]);

        let user = EdgeTarget::Declared("app.model.user".into());
        assert!(has_edge(&merged, "app.Account", &user, EdgeKind::FieldType));
        assert!(has_edge(&merged, "app.Account", &user, EdgeKind::Import));
        assert!(merged
            .edges
            .iter()
            .all(|e| e.to != EdgeTarget::External("a.B".into())));
    }

    #[test]
    fn test_private_edges_stay_in_file() {
        let config = AnalysisConfig::default();
        let merged = GraphMerger::new(&config).merge(&[
            analyze_file(
                "food/Steak.java",
                r#"
package food;
public class Steak {
    private static class Tapeworm extends Food {
        Steak host;
    }
}
"#,
            ),
            analyze_file("food/Food.java", "package food;\npublic class Food {}\n"),
        ]);

        assert!(merged.symbols.contains("food.Steak.Tapeworm"));
        assert!(has_edge(
            &merged,
            "food.Steak.Tapeworm",
            &EdgeTarget::Declared("food.Steak".into()),
            EdgeKind::FieldType
        ));
        assert!(merged.edges.iter().all(|e| e.to.name() != "food.Food"));
    }

    #[test]
    fn test_package_roots_turn_externals_into_warnings() {
        let config = AnalysisConfig::default().package_root("io.nanoapi");
        let merged = GraphMerger::new(&config).merge(&[analyze_file(
            "App.java",
            "package app;\nimport io.nanoapi.Missing;\nimport java.util.List;\nclass App {}\n",
        )]);

        let unresolved: Vec<_> = merged
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::UnresolvedReference)
            .collect();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].severity, Severity::Warning);
        assert!(unresolved[0].message.contains("io.nanoapi.Missing"));

        assert!(has_edge(
            &merged,
            "app.App",
            &EdgeTarget::External("java.util.List".into()),
            EdgeKind::Import
        ));
    }

    #[test]
    fn test_report_external_references() {
        let config = AnalysisConfig::default().report_external_references(true);
        let merged = GraphMerger::new(&config).merge(&[analyze_file(
            "App.java",
            "class App { java.util.List items; }",
        )]);
        let info: Vec<_> = merged
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Info)
            .collect();
        assert_eq!(info.len(), 1);
        assert!(info[0].message.contains("java.util.List"));
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = analyze_file("a/A.java", "package a;\nimport b.*;\npublic class A { B b; }\n");
        let b = analyze_file("b/B.java", "package b;\npublic class B { a.A a; }\n");
        let config = AnalysisConfig::default();

        let forward = GraphMerger::new(&config).merge(&[a.clone(), b.clone()]);
        let backward = GraphMerger::new(&config).merge(&[b, a]);
        assert_eq!(forward.edges, backward.edges);
        assert_eq!(forward.diagnostics, backward.diagnostics);
        assert_eq!(forward.imports, backward.imports);
    }

    #[test]
    fn test_describe_identical_duplicates() {
        let a = analyze_file("x/Food.java", "package food;\nclass Food {}\n");
        let b = analyze_file("y/Food.java", "package food;\nclass Food {}\n");
        let decls = vec![&a.declarations[0], &b.declarations[0]];
        assert_eq!(
            describe_differences(&decls),
            "declarations are structurally identical"
        );
    }
}
