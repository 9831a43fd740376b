//! Parsing Feature
//!
//! Responsible for turning Java source text into typed syntax.
//!
//! ## Structure
//! - `domain/` - ParsedTree and the typed CST
//! - `ports/` - Parser trait
//! - `application/` - ParseFileUseCase
//! - `infrastructure/` - TreeSitterJavaParser
//! - `plugins/` - tree-sitter-java lowering

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;
pub mod ports;

// Re-exports
pub use application::ParseFileUseCase;
pub use domain::ParsedTree;
pub use infrastructure::TreeSitterJavaParser;
pub use plugins::JavaPlugin;
pub use ports::{Parser, SpanExt};
