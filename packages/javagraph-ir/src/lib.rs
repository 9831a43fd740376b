/*
 * Javagraph IR - Java declaration dependency graph
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, Location, Diagnostic)
 * - features/    : Vertical slices (parsing → symbols → cross_file)
 * - pipeline/    : Orchestration (rayon per-file pass + single-writer merge)
 * - output       : Serialized analysis result
 *
 * Determinism:
 * - Per-file results are merged in (path, text) order
 * - Every map is a BTreeMap and every list is sorted
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Resolution helpers thread scope through
#![allow(clippy::type_complexity)] // Claim maps keyed by borrowed names
#![allow(clippy::new_without_default)] // Default impl not always needed

/// Shared models and utilities
pub mod shared;

/// Feature modules (parsing → symbols → cross_file)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

/// Analysis result and JSON encoding
pub mod output;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnalysisConfig, ConfigError, ConflictPolicy, ParallelConfig};
pub use errors::{JavagraphError, Result};
pub use features::cross_file::{
    DeclarationSummary, DependencyEdge, EdgeKind, EdgeTarget, ImportResolution, ResolvedImport,
};
pub use output::{AnalysisResult, AnalysisStats, FileDependency, FileManifest};
pub use pipeline::{analyze, AnalysisPipeline, SourceFile};
pub use shared::models::{Diagnostic, DiagnosticKind, Location, Severity, Span};
