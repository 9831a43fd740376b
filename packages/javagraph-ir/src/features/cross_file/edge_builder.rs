//! Per-file dependency extraction
//!
//! Walks the declarations of one [`SourceUnit`] and turns every type
//! reference into a [`PendingReference`]. Generic parameters and member types
//! of the declaring (or an enclosing) type are settled here, since they only
//! need the file itself. Everything else carries its ordered candidate list to
//! the merge phase.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::features::symbols::domain::{RefContext, SourceUnit, TypeDeclaration, TypeReference};
use crate::shared::models::{Diagnostic, DiagnosticKind};

use super::import_resolver::ImportScope;
use super::types::{EdgeKind, FileGraph, LocalResolution, PendingReference};

pub struct DependencyGraphBuilder<'a> {
    unit: &'a SourceUnit,
    scope: ImportScope,
    local_names: FxHashSet<&'a str>,
    include_type_use: bool,
}

impl<'a> DependencyGraphBuilder<'a> {
    pub fn new(unit: &'a SourceUnit, include_type_use: bool) -> Self {
        let local_names = unit
            .declarations()
            .into_iter()
            .map(|d| d.qualified_name.as_str())
            .collect();
        Self {
            unit,
            scope: ImportScope::from_unit(unit),
            local_names,
            include_type_use,
        }
    }

    pub fn build(&self) -> FileGraph {
        let mut graph = FileGraph::default();
        for decl in &self.unit.types {
            self.visit(decl, &[], &[], &mut graph);
        }
        trace!(
            file = %self.unit.path,
            references = graph.references.len(),
            "Built file graph"
        );
        graph
    }

    /// `enclosing` is outermost first; `inherited` holds the generic
    /// parameters an inner (non-static) class can see
    fn visit(
        &self,
        decl: &'a TypeDeclaration,
        enclosing: &[&'a TypeDeclaration],
        inherited: &[&'a str],
        graph: &mut FileGraph,
    ) {
        let mut generics: Vec<&str> = if decl.is_inner {
            inherited.to_vec()
        } else {
            Vec::new()
        };
        generics.extend(decl.generic_names());

        let type_refs = decl
            .supertypes
            .iter()
            .chain(&decl.body_references)
            .chain(decl.generics.iter().flat_map(|g| &g.bounds));
        for reference in type_refs {
            self.reference(decl, enclosing, &generics, reference, graph);
        }

        for member in &decl.members {
            let mut member_generics = if member.is_static() {
                Vec::new()
            } else {
                generics.clone()
            };
            member_generics.extend(member.type_parameters.iter().map(|g| g.name.as_str()));

            let member_refs = member
                .references
                .iter()
                .chain(member.type_parameters.iter().flat_map(|g| &g.bounds));
            for reference in member_refs {
                self.reference(decl, enclosing, &member_generics, reference, graph);
            }
        }

        let mut chain = enclosing.to_vec();
        chain.push(decl);
        for nested in &decl.nested {
            self.visit(nested, &chain, &generics, graph);
        }
    }

    fn reference(
        &self,
        decl: &TypeDeclaration,
        enclosing: &[&TypeDeclaration],
        generics: &[&str],
        reference: &TypeReference,
        graph: &mut FileGraph,
    ) {
        let kind = EdgeKind::from_context(reference.context);
        if kind == EdgeKind::TypeUse && !self.include_type_use {
            return;
        }

        let head = reference.head();
        let resolution = if !reference.is_qualified() && generics.contains(&head) {
            if reference.context == RefContext::Instantiation {
                graph.diagnostics.push(Diagnostic::at(
                    DiagnosticKind::TypeVariableInstantiation,
                    format!(
                        "'{}' instantiates type parameter '{}', which is not a concrete type",
                        decl.qualified_name, head
                    ),
                    &self.unit.path,
                    reference.span,
                ));
            }
            LocalResolution::TypeVariable(head.to_string())
        } else if let Some(qualified_name) = self.member_type(decl, enclosing, &reference.name) {
            LocalResolution::MemberType(qualified_name)
        } else {
            LocalResolution::Deferred(self.scope.candidates(&reference.name))
        };

        graph.references.push(PendingReference {
            from: decl.qualified_name.clone(),
            from_file_local: decl.file_local,
            written: reference.name.clone(),
            kind,
            span: reference.span,
            resolution,
        });
    }

    /// `Owner.name` for the declaring type, then each enclosing type from
    /// the innermost out, if declared in this file
    ///
    /// Member types inherited from supertypes are not searched.
    fn member_type<'d>(
        &self,
        decl: &'d TypeDeclaration,
        enclosing: &[&'d TypeDeclaration],
        name: &str,
    ) -> Option<String> {
        std::iter::once(decl)
            .chain(enclosing.iter().rev().copied())
            .map(|owner| format!("{}.{}", owner.qualified_name, name))
            .find(|candidate| self.local_names.contains(candidate.as_str()))
    }
}
