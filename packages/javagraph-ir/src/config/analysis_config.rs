//! Top-level analysis configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, SUPPORTED_VERSIONS};
use super::stage_configs::{ConflictPolicy, ParallelConfig};
use super::validation::{validate_package_root, Validatable};

/// Configuration for one analysis run
///
/// ```rust,ignore
/// let config = AnalysisConfig::default()
///     .package_root("io.nanoapi")
///     .conflict_policy(ConflictPolicy::Drop)
///     .parallel(ParallelConfig::with_workers(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Package prefixes expected to be fully present in the source set
    pub package_roots: Vec<String>,

    pub conflict_policy: ConflictPolicy,

    /// Emit an info diagnostic for every reference leaving the source set
    pub report_external_references: bool,

    /// Emit `type-use` edges (local variables, casts, throws, bounds)
    pub include_type_use_references: bool,

    pub parallel: ParallelConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            package_roots: Vec::new(),
            conflict_policy: ConflictPolicy::Mark,
            report_external_references: false,
            include_type_use_references: true,
            parallel: ParallelConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn package_root(mut self, root: impl Into<String>) -> Self {
        self.package_roots.push(root.into());
        self
    }

    pub fn conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn report_external_references(mut self, enabled: bool) -> Self {
        self.report_external_references = enabled;
        self
    }

    pub fn include_type_use_references(mut self, enabled: bool) -> Self {
        self.include_type_use_references = enabled;
        self
    }

    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether `qualified_name` lies under one of the recognised package roots
    pub fn is_under_package_root(&self, qualified_name: &str) -> bool {
        self.package_root_of(qualified_name).is_some()
    }

    /// First recognised root containing `qualified_name`
    pub fn package_root_of(&self, qualified_name: &str) -> Option<&str> {
        self.package_roots
            .iter()
            .find(|root| {
                qualified_name == root.as_str()
                    || qualified_name
                        .strip_prefix(root.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .map(String::as_str)
    }

    /// Load from a YAML v1 document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let mut config = Self::default();
        if let Some(roots) = export.package_roots {
            config.package_roots = roots;
        }
        if let Some(policy) = export.conflict_policy {
            config.conflict_policy = policy;
        }
        if let Some(report) = export.report_external_references {
            config.report_external_references = report;
        }
        if let Some(include) = export.include_type_use_references {
            config.include_type_use_references = include;
        }
        if let Some(parallel) = export.parallel {
            config.parallel = parallel;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML v1 file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export as a YAML v1 document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            package_roots: Some(self.package_roots.clone()),
            conflict_policy: Some(self.conflict_policy),
            report_external_references: Some(self.report_external_references),
            include_type_use_references: Some(self.include_type_use_references),
            parallel: Some(self.parallel.clone()),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        for root in &self.package_roots {
            validate_package_root(root)?;
        }
        self.parallel.validate()
    }

    fn config_name(&self) -> &'static str {
        "AnalysisConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert!(config.package_roots.is_empty());
        assert_eq!(config.conflict_policy, ConflictPolicy::Mark);
        assert!(!config.report_external_references);
        assert!(config.include_type_use_references);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AnalysisConfig::default()
            .package_root("io.nanoapi")
            .package_root("com.example")
            .report_external_references(true)
            .parallel(ParallelConfig::sequential());

        assert_eq!(config.package_roots.len(), 2);
        assert!(config.report_external_references);
        assert!(!config.parallel.enabled);
    }

    #[test]
    fn test_package_root_matching() {
        let config = AnalysisConfig::default().package_root("io.nanoapi");
        assert!(config.is_under_package_root("io.nanoapi"));
        assert!(config.is_under_package_root("io.nanoapi.food.Steak"));
        assert!(!config.is_under_package_root("io.nanoapix.Steak"));
        assert!(!config.is_under_package_root("java.util.List"));
    }

    #[test]
    fn test_validate_rejects_bad_root() {
        let config = AnalysisConfig::default().package_root("io.");
        assert!(config.validate().is_err());
    }
}
