//! Parser port (interface)
//!
//! Defines the contract for parsing source code.

use crate::errors::Result;
use crate::features::parsing::domain::ParsedTree;

/// Parser trait - abstraction over parsing implementation
///
/// `Err` means the file produced no usable tree at all. Local syntax errors
/// are recovered and reported through [`ParsedTree::errors`].
pub trait Parser: Send + Sync {
    /// Parse source code into a ParsedTree
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree>;

    /// Check if this parser supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
