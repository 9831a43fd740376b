//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

// Java source → typed syntax (tree-sitter-java)
pub mod parsing;

// Typed syntax → per-file symbol model
pub mod symbols;

// Two-phase resolution, merge, conflict detection, graph analysis
pub mod cross_file;
