//! Per-phase configuration types

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;

// ============================================================================
// Parallelism Configuration
// ============================================================================

/// Parallelism Configuration for the per-file pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Number of workers (0 = rayon global pool, 1..=256 = dedicated pool)
    pub num_workers: usize,

    /// Process files on rayon workers; `false` runs them sequentially
    pub enabled: bool,
}

impl ParallelConfig {
    pub fn sequential() -> Self {
        Self {
            num_workers: 0,
            enabled: false,
        }
    }

    pub fn with_workers(num_workers: usize) -> Self {
        Self {
            num_workers,
            enabled: true,
        }
    }

    /// True when the run needs its own thread pool
    pub fn needs_dedicated_pool(&self) -> bool {
        self.enabled && self.num_workers > 0
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: 0,
            enabled: true,
        }
    }
}

impl Validatable for ParallelConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=global pool)",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ParallelConfig"
    }
}

// ============================================================================
// Merge Configuration
// ============================================================================

/// What the merge does with edges declared by a conflicted qualified name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Keep the edges, flagged `conflicted`
    #[default]
    Mark,
    /// Remove the edges
    Drop,
}
