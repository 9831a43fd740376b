//! Common test utilities for javagraph-ir
//!
//! Shared Java fixtures and small lookup helpers for integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use javagraph_ir::{AnalysisConfig, AnalysisResult, DependencyEdge, EdgeKind, EdgeTarget, ParallelConfig};

/// Deterministic config for tests that compare whole results
pub fn sequential_config() -> AnalysisConfig {
    AnalysisConfig::default().parallel(ParallelConfig::sequential())
}

/// Edge lookup by source, target and kind
pub fn find_edge<'a>(
    result: &'a AnalysisResult,
    from: &str,
    to: &EdgeTarget,
    kind: EdgeKind,
) -> Option<&'a DependencyEdge> {
    result
        .edges
        .iter()
        .find(|e| e.from == from && &e.to == to && e.kind == kind)
}

pub fn declared(name: &str) -> EdgeTarget {
    EdgeTarget::Declared(name.to_string())
}
