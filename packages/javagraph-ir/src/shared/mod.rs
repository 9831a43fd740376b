//! Shared module - Common types used by every feature
//!
//! It has no tree-sitter dependency; parsing-specific helpers live in
//! `features::parsing`.

pub mod models;

pub use models::*;
