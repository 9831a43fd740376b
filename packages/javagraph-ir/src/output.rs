//! Analysis result
//!
//! Everything one run produces, in the shape the host serializes. Maps are
//! `BTreeMap` and lists are sorted, so the JSON is byte-stable for a given
//! input set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::Result;
use crate::features::cross_file::{
    DeclarationSummary, DependencyEdge, DependencyGraph, EdgeTarget, FileAnalysis, MergedGraph,
    ResolvedImport,
};
use crate::features::symbols::domain::Metrics;
use crate::shared::models::{Diagnostic, DiagnosticKind, Location, Severity};

/// A file or external name that a file depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDependency {
    /// File path, or the external qualified name
    pub id: String,
    pub is_external: bool,
    /// Qualified names used through this dependency
    pub symbols: BTreeSet<String>,
}

/// Per-file dependency manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileManifest {
    pub path: String,
    pub parsed: bool,
    /// Empty for the default package
    pub package: String,
    /// Qualified names declared in the file, conflicted ones included
    pub symbols: Vec<String>,
    pub imports: Vec<ResolvedImport>,
    pub dependencies: BTreeMap<String, FileDependency>,
    /// Dependent file → its symbols that depend on this file
    pub dependents: BTreeMap<String, BTreeSet<String>>,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub files: usize,
    pub parsed_files: usize,
    pub symbols: usize,
    pub edges: usize,
    pub external_edges: usize,
    pub conflicts: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Output of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symbols: BTreeMap<String, DeclarationSummary>,
    pub edges: Vec<DependencyEdge>,
    pub diagnostics: Vec<Diagnostic>,
    pub conflicts: BTreeMap<String, Vec<Location>>,
    pub cycles: Vec<Vec<String>>,
    pub topological_order: Vec<String>,
    pub files: BTreeMap<String, FileManifest>,
    pub stats: AnalysisStats,
}

impl AnalysisResult {
    pub fn assemble(files: &[FileAnalysis], merged: MergedGraph, graph: DependencyGraph) -> Self {
        let MergedGraph {
            symbols,
            conflicts,
            edges,
            mut imports,
            diagnostics,
        } = merged;
        let (cycles, topological_order) = graph.into_parts();

        let mut manifests: BTreeMap<String, FileManifest> = BTreeMap::new();
        for file in files {
            let manifest = manifests
                .entry(file.path.clone())
                .or_insert_with(|| FileManifest {
                    path: file.path.clone(),
                    ..FileManifest::default()
                });
            manifest
                .symbols
                .extend(file.declarations.iter().map(|d| d.qualified_name.clone()));
            manifest.symbols.sort();
            manifest.symbols.dedup();
            if let Some(unit) = &file.unit {
                manifest.parsed = true;
                manifest.package = unit.package.clone();
                manifest.metrics = unit.metrics();
            }
            if let Some(resolved) = imports.remove(&file.path) {
                manifest.imports = resolved;
            }
        }

        // (from file, to file) → symbols used, for the dependents side
        let mut reverse: Vec<(String, String, String)> = Vec::new();
        for edge in &edges {
            let Some(manifest) = manifests.get_mut(&edge.file) else {
                continue;
            };
            let targets: Vec<(String, bool)> = match &edge.to {
                EdgeTarget::Declared(name) => symbols
                    .get(name)
                    .map(|d| vec![(d.file.clone(), false)])
                    .unwrap_or_default(),
                EdgeTarget::Conflicted(name) => conflicts
                    .get(name)
                    .map(|locations| locations.iter().map(|l| (l.path.clone(), false)).collect())
                    .unwrap_or_default(),
                EdgeTarget::External(name) => vec![(name.clone(), true)],
                EdgeTarget::TypeVariable(_) => Vec::new(),
            };

            for (id, is_external) in targets {
                if id == edge.file {
                    continue;
                }
                manifest
                    .dependencies
                    .entry(id.clone())
                    .or_insert_with(|| FileDependency {
                        id: id.clone(),
                        is_external,
                        symbols: BTreeSet::new(),
                    })
                    .symbols
                    .insert(edge.to.name().to_string());
                if !is_external {
                    reverse.push((id, edge.file.clone(), edge.from.clone()));
                }
            }
        }
        for (target_file, dependent_file, symbol) in reverse {
            if let Some(manifest) = manifests.get_mut(&target_file) {
                manifest
                    .dependents
                    .entry(dependent_file)
                    .or_default()
                    .insert(symbol);
            }
        }

        let stats = AnalysisStats {
            files: manifests.len(),
            parsed_files: manifests.values().filter(|m| m.parsed).count(),
            symbols: symbols.len(),
            edges: edges.len(),
            external_edges: edges.iter().filter(|e| e.to.is_external()).count(),
            conflicts: conflicts.len(),
            errors: diagnostics.iter().filter(|d| d.severity == Severity::Error).count(),
            warnings: diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Warning)
                .count(),
        };

        Self {
            symbols: symbols.into_map(),
            edges,
            diagnostics,
            conflicts,
            cycles,
            topological_order,
            files: manifests,
            stats,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn edges_from<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DependencyEdge> + 'a {
        self.edges.iter().filter(move |e| e.from == name)
    }

    pub fn edges_to<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DependencyEdge> + 'a {
        self.edges.iter().filter(move |e| e.to.name() == name)
    }

    pub fn diagnostics_of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}
