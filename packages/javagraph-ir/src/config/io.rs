//! Configuration I/O (YAML loading)
//!
//! Defines YAML schema types. Implementation methods are in analysis_config.rs
//! to avoid field visibility issues.

use serde::{Deserialize, Serialize};

use super::stage_configs::{ConflictPolicy, ParallelConfig};

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
///
/// Every field but `version` is optional; missing fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1). Optional here so a missing version
    /// can be reported as such rather than as a YAML error.
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_roots: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_policy: Option<ConflictPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_external_references: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_type_use_references: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ConfigError;
    use crate::config::AnalysisConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnalysisConfig::default()
            .package_root("io.nanoapi")
            .conflict_policy(ConflictPolicy::Drop);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("io.nanoapi"));
        assert!(yaml.contains("conflict_policy: drop"));

        let loaded = AnalysisConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
package_roots:
  - io.nanoapi
report_external_references: true
parallel:
  num_workers: 2
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = AnalysisConfig::from_yaml_file(temp_file.path()).unwrap();
        assert_eq!(config.package_roots, vec!["io.nanoapi".to_string()]);
        assert!(config.report_external_references);
        assert!(config.include_type_use_references);
        assert_eq!(config.parallel.num_workers, 2);
        assert!(config.parallel.enabled);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = AnalysisConfig::from_yaml_str("package_roots: [io]\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = AnalysisConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        let result = AnalysisConfig::from_yaml_str("version: 1\npreset: fast\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_invalid_root_rejected() {
        let result = AnalysisConfig::from_yaml_str("version: 1\npackage_roots: ['io..x']\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPackageRoot { .. })
        ));
    }
}
