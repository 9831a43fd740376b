//! Pipeline orchestrator
//!
//! Parallel per-file pass, then the single-writer merge and graph analysis.

use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, info_span};

use crate::config::{AnalysisConfig, Validatable};
use crate::errors::{JavagraphError, Result};
use crate::features::cross_file::{DependencyGraph, FileAnalysis, GraphMerger};
use crate::features::parsing::{Parser, TreeSitterJavaParser};
use crate::output::AnalysisResult;

use super::processor::FileProcessor;
use super::SourceFile;

/// Pipeline orchestrator
pub struct AnalysisPipeline<P: Parser = TreeSitterJavaParser> {
    processor: FileProcessor<P>,
    config: AnalysisConfig,
}

impl AnalysisPipeline<TreeSitterJavaParser> {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        Self::with_parser(TreeSitterJavaParser::new(), config)
    }
}

impl<P: Parser> AnalysisPipeline<P> {
    /// Fails if the configuration does not validate
    pub fn with_parser(parser: P, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            processor: FileProcessor::new(parser, config.include_type_use_references),
            config,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one input set
    ///
    /// Fails only when `files` is empty or no file parses; everything else
    /// is reported through the result's diagnostics.
    pub fn run(&self, files: &[SourceFile]) -> Result<AnalysisResult> {
        let _span = info_span!("analyze", files = files.len()).entered();
        if files.is_empty() {
            return Err(JavagraphError::EmptyInput);
        }

        let start = Instant::now();
        info!(files = files.len(), "Starting analysis");

        let analyses = {
            let _span = info_span!("process_files").entered();
            self.process_all(files)?
        };

        let parsed = analyses.iter().filter(|a| a.is_parsed()).count();
        debug!(parsed, unparsed = analyses.len() - parsed, "Per-file pass finished");
        if parsed == 0 {
            return Err(JavagraphError::NothingParsed { files: files.len() });
        }

        let merged = {
            let _span = info_span!("merge").entered();
            GraphMerger::new(&self.config).merge(&analyses)
        };

        let graph = {
            let _span = info_span!("graph_analysis").entered();
            DependencyGraph::build(&merged.symbols, &merged.edges)
        };
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            cycles = graph.cycles().len(),
            "Dependency graph built"
        );

        let result = AnalysisResult::assemble(&analyses, merged, graph);
        info!(
            symbols = result.stats.symbols,
            edges = result.stats.edges,
            diagnostics = result.diagnostics.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Analysis finished"
        );
        Ok(result)
    }

    fn process_all(&self, files: &[SourceFile]) -> Result<Vec<FileAnalysis>> {
        let parallel = &self.config.parallel;
        if !parallel.enabled {
            return Ok(files.iter().map(|f| self.processor.process(f)).collect());
        }

        if parallel.needs_dedicated_pool() {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(parallel.num_workers)
                .build()
                .map_err(|e| JavagraphError::pipeline(format!("failed to build thread pool: {}", e)))?;
            return Ok(pool.install(|| files.par_iter().map(|f| self.processor.process(f)).collect()));
        }

        Ok(files.par_iter().map(|f| self.processor.process(f)).collect())
    }
}

/// Analyze `files` with the tree-sitter Java parser
pub fn analyze(files: &[SourceFile], config: &AnalysisConfig) -> Result<AnalysisResult> {
    AnalysisPipeline::new(config.clone())?.run(files)
}
