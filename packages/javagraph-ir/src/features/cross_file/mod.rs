//! Cross-File Resolution Module
//!
//! Per-file reference extraction, global symbol table, import resolution,
//! the single-writer merge and declaration-level graph analysis.
//!
//! Key features:
//! - Two-phase resolution: generic parameters and member types settle in the
//!   per-file pass, everything else resolves against the merged table
//! - Duplicate declarations detected and isolated under a conflict marker
//! - Dependency graph with petgraph (Tarjan SCC for cycle detection)

mod dep_graph;
mod edge_builder;
mod import_resolver;
mod merger;
mod symbol_table;
mod types;

pub use dep_graph::DependencyGraph;
pub use edge_builder::DependencyGraphBuilder;
pub use import_resolver::{ImportResolver, ImportScope};
pub use merger::{GraphMerger, MergedGraph};
pub use symbol_table::{DeclId, DeclarationSummary, MemberSummary, SymbolTable};
pub use types::*;
