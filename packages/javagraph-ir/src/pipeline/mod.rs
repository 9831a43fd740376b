//! Pipeline orchestration

use serde::{Deserialize, Serialize};

pub mod orchestrator;
pub mod processor;

pub use orchestrator::{analyze, AnalysisPipeline};
pub use processor::FileProcessor;

/// One input file as supplied by the discovery collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}
