//! Configuration System
//!
//! One [`AnalysisConfig`] drives a run. It can be built in code with the
//! builder methods or loaded from a versioned YAML document.
//!
//! # Examples
//!
//! ```rust,ignore
//! use javagraph_ir::config::{AnalysisConfig, ConflictPolicy};
//!
//! let config = AnalysisConfig::default()
//!     .package_root("io.nanoapi")
//!     .conflict_policy(ConflictPolicy::Drop);
//!
//! let config = AnalysisConfig::from_yaml_file("javagraph.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;
pub mod stage_configs;
pub mod validation;

// Re-exports
pub use analysis_config::AnalysisConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
pub use stage_configs::{ConflictPolicy, ParallelConfig};
pub use validation::{Validatable, ValidatableCollection};
