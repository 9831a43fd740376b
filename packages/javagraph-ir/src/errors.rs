//! Error types for javagraph-ir
//!
//! Only whole-run failures are errors. File-local problems are reported as
//! [`Diagnostic`](crate::shared::models::Diagnostic)s instead.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for javagraph-ir operations
#[derive(Debug, Error)]
pub enum JavagraphError {
    /// No source files were supplied
    #[error("No source files to analyze")]
    EmptyInput,

    /// Every supplied file failed to parse
    #[error("None of the {files} source files could be parsed")]
    NothingParsed { files: usize },

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Pipeline error
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Result encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JavagraphError {
    pub fn parse_error(msg: impl Into<String>) -> Self {
        JavagraphError::Parse(msg.into())
    }

    pub fn pipeline(msg: impl Into<String>) -> Self {
        JavagraphError::Pipeline(msg.into())
    }
}

/// Result type alias for javagraph operations
pub type Result<T> = std::result::Result<T, JavagraphError>;
