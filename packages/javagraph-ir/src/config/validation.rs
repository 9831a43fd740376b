//! Configuration validation
//!
//! Provides the validation trait shared by every configuration type.

use super::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use javagraph_ir::config::Validatable;
///
/// fn build<C: Validatable>(config: C) -> Result<Thing, ConfigError> {
///     config.validate()?;
///     // ...
/// }
/// ```
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Extension trait for validating collections of configs
pub trait ValidatableCollection {
    fn validate_all(&self) -> ConfigResult<()>;
}

impl<T: Validatable> ValidatableCollection for Vec<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        for config in self {
            config.validate()?;
        }
        Ok(())
    }
}

/// Check that `root` is a dotted Java package name (`io.nanoapi.food`)
pub fn validate_package_root(root: &str) -> ConfigResult<()> {
    if root.is_empty() {
        return Err(ConfigError::invalid_package_root(root, "must not be empty"));
    }
    for segment in root.split('.') {
        let mut chars = segment.chars();
        match chars.next() {
            None => {
                return Err(ConfigError::invalid_package_root(root, "empty segment"));
            }
            Some(c) if !(c.is_alphabetic() || c == '_' || c == '$') => {
                return Err(ConfigError::invalid_package_root(
                    root,
                    format!("segment '{segment}' does not start with a letter"),
                ));
            }
            Some(_) => {}
        }
        if let Some(bad) = chars.find(|c| !(c.is_alphanumeric() || *c == '_' || *c == '$')) {
            return Err(ConfigError::invalid_package_root(
                root,
                format!("unexpected character '{bad}'"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_roots() {
        assert!(validate_package_root("io").is_ok());
        assert!(validate_package_root("io.nanoapi.food").is_ok());
        assert!(validate_package_root("com.example_1.$gen").is_ok());
    }

    #[test]
    fn test_invalid_roots() {
        assert!(validate_package_root("").is_err());
        assert!(validate_package_root("io..food").is_err());
        assert!(validate_package_root("io.1food").is_err());
        assert!(validate_package_root("io.food.*").is_err());
        assert!(validate_package_root("io.food.").is_err());
    }
}
