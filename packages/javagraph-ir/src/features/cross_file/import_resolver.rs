//! Import Resolver
//!
//! Two halves:
//! - [`ImportScope`] is built per file from its imports and package, and
//!   produces the ordered candidate list for a written type name.
//! - [`ImportResolver`] runs at merge time against the global
//!   [`SymbolTable`], resolving import declarations and picking the first
//!   visible candidate of a pending reference.
//!
//! Candidate order follows Java's shadowing rules: single-type imports,
//! then the current package, then on-demand imports, then `java.lang`.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

use crate::features::symbols::domain::{ImportDeclaration, SourceUnit};
use crate::shared::models::{Diagnostic, DiagnosticKind, Location, Span};

use super::symbol_table::SymbolTable;
use super::types::{Candidate, EdgeTarget, ImportResolution, ResolutionMethod};

const IMPLICIT_PACKAGE: &str = "java.lang";

/// Names a file can see through its package and imports
#[derive(Debug, Clone, Default)]
pub struct ImportScope {
    package: String,
    /// Simple name → imported qualified name
    single: FxHashMap<String, String>,
    /// Same, for imports spelled like a package (`import app.model.user;`)
    package_like: FxHashMap<String, String>,
    /// On-demand import prefixes, in declaration order
    wildcards: Vec<String>,
}

impl ImportScope {
    /// Package-like imports are kept apart; they only count when the merge
    /// finds a declaration at exactly that path
    pub fn from_unit(unit: &SourceUnit) -> Self {
        let mut scope = Self {
            package: unit.package.clone(),
            ..Self::default()
        };
        for import in &unit.imports {
            if import.is_wildcard {
                if !scope.wildcards.contains(&import.path) {
                    scope.wildcards.push(import.path.clone());
                }
                continue;
            }
            let names = if import.looks_like_package {
                &mut scope.package_like
            } else {
                &mut scope.single
            };
            names
                .entry(import.simple_name().to_string())
                .or_insert_with(|| import.path.clone());
        }
        scope
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Ordered, deduplicated qualified names `name` may denote
    ///
    /// For a dotted name only the first segment goes through the scope and
    /// the rest is appended (`Map.Entry` with `import java.util.Map;`).
    pub fn candidates(&self, name: &str) -> Vec<Candidate> {
        let (head, rest) = match name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        let extend = |base: String| match rest {
            Some(rest) => format!("{}.{}", base, rest),
            None => base,
        };

        let mut out: Vec<Candidate> = Vec::new();
        let mut push = |qualified_name: String, method: ResolutionMethod| {
            if !out.iter().any(|c| c.qualified_name == qualified_name) {
                out.push(Candidate::new(qualified_name, method));
            }
        };

        if let Some(imported) = self.single.get(head) {
            push(extend(imported.clone()), ResolutionMethod::SingleImport);
        } else if let Some(imported) = self.package_like.get(head) {
            push(extend(imported.clone()), ResolutionMethod::PackageLikeImport);
        }
        push(extend(qualify(&self.package, head)), ResolutionMethod::SamePackage);
        for prefix in &self.wildcards {
            push(extend(format!("{}.{}", prefix, head)), ResolutionMethod::Wildcard);
        }
        push(
            extend(format!("{}.{}", IMPLICIT_PACKAGE, head)),
            ResolutionMethod::ImplicitLang,
        );
        if rest.is_some() {
            push(name.to_string(), ResolutionMethod::FullyQualified);
        }
        out
    }
}

fn qualify(package: &str, simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{}.{}", package, simple_name)
    }
}

/// Merge-time resolution against the admitted declarations
pub struct ImportResolver<'a> {
    symbols: &'a SymbolTable,
    conflicts: &'a BTreeMap<String, Vec<Location>>,
}

impl<'a> ImportResolver<'a> {
    pub fn new(symbols: &'a SymbolTable, conflicts: &'a BTreeMap<String, Vec<Location>>) -> Self {
        Self { symbols, conflicts }
    }

    /// Target for a qualified name as seen from `file`, if any
    fn lookup(&self, qualified_name: &str, file: &str) -> Option<EdgeTarget> {
        if self.conflicts.contains_key(qualified_name) {
            return Some(EdgeTarget::Conflicted(qualified_name.to_string()));
        }
        self.symbols
            .get(qualified_name)
            .filter(|d| d.is_visible_from(file))
            .map(|d| EdgeTarget::Declared(d.qualified_name.clone()))
    }

    /// A single-type import whose path is a package of the input, or that
    /// is spelled like one and is not a declared type
    pub fn names_package(&self, import: &ImportDeclaration) -> bool {
        if import.is_static || import.is_wildcard {
            return false;
        }
        let path = import.path.as_str();
        if self.symbols.contains(path) || self.conflicts.contains_key(path) {
            return false;
        }
        let conflict_below = self.conflicts.keys().any(|name| {
            name.strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('.'))
        });
        if self.symbols.declares_under(path) || conflict_below {
            return true;
        }
        import.looks_like_package
    }

    pub fn resolve_import(&self, import: &ImportDeclaration, file: &str) -> ImportResolution {
        if self.names_package(import) {
            return ImportResolution::Malformed;
        }

        if import.is_wildcard {
            let declarations = self
                .symbols
                .scope_members(&import.path)
                .filter(|d| d.is_visible_from(file))
                .count()
                + self
                    .conflicts
                    .keys()
                    .filter(|name| {
                        name.strip_prefix(import.path.as_str())
                            .and_then(|rest| rest.strip_prefix('.'))
                            .is_some_and(|rest| !rest.contains('.'))
                    })
                    .count();
            return if declarations == 0 {
                ImportResolution::External {
                    name: format!("{}.*", import.path),
                }
            } else {
                ImportResolution::Scope {
                    prefix: import.path.clone(),
                    declarations,
                }
            };
        }

        if let Some(target) = self.lookup(&import.path, file) {
            return import_target(target);
        }

        if import.is_static {
            // `import static a.B.m;` names member `m` of type `a.B`
            let owner = import.owner();
            if let Some(target) = self.lookup(owner, file) {
                let has_member = self
                    .symbols
                    .get(owner)
                    .map_or(true, |d| d.has_accessible_member(import.simple_name()));
                if has_member {
                    return import_target(target);
                }
            }
            return ImportResolution::External {
                name: owner.to_string(),
            };
        }

        ImportResolution::External {
            name: import.path.clone(),
        }
    }

    /// First visible candidate, or an external target
    ///
    /// When the winner came from an on-demand import and a later on-demand
    /// candidate also matches, the reference is ambiguous in Java; the first
    /// one is kept and a warning is pushed to `diagnostics`.
    pub fn resolve_reference(
        &self,
        written: &str,
        candidates: &[Candidate],
        file: &str,
        span: Span,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> EdgeTarget {
        let hit = candidates
            .iter()
            .enumerate()
            .find_map(|(i, c)| self.lookup(&c.qualified_name, file).map(|t| (i, c, t)));

        let Some((index, winner, target)) = hit else {
            let name = candidates
                .iter()
                .find(|c| c.method == ResolutionMethod::SingleImport)
                .map_or_else(|| written.to_string(), |c| c.qualified_name.clone());
            return EdgeTarget::External(name);
        };

        if winner.method == ResolutionMethod::Wildcard {
            let others: Vec<&str> = candidates[index + 1..]
                .iter()
                .filter(|c| c.method == ResolutionMethod::Wildcard)
                .filter(|c| self.lookup(&c.qualified_name, file).is_some())
                .map(|c| c.qualified_name.as_str())
                .collect();
            if !others.is_empty() {
                diagnostics.push(Diagnostic::at(
                    DiagnosticKind::AmbiguousReference,
                    format!(
                        "'{}' matches {} through on-demand imports; using '{}'",
                        written,
                        std::iter::once(winner.qualified_name.as_str())
                            .chain(others)
                            .map(|n| format!("'{}'", n))
                            .collect::<Vec<_>>()
                            .join(" and "),
                        winner.qualified_name
                    ),
                    file,
                    span,
                ));
            }
        }

        target
    }
}

fn import_target(target: EdgeTarget) -> ImportResolution {
    match target {
        EdgeTarget::Conflicted(name) => ImportResolution::Conflicted { target: name },
        other => ImportResolution::Resolved {
            target: other.name().to_string(),
        },
    }
}
