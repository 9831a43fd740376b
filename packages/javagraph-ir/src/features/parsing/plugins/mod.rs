//! Language plugins
//!
//! Each plugin lowers its grammar's tree-sitter output into the typed
//! syntax of `domain`.

pub mod java;

pub use java::JavaPlugin;
