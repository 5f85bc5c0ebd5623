//! Configuration validation
//!
//! Validates configuration and reports issues.

use super::types::{resolve_against, InstallerConfig};
use crate::targets::TargetId;

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ConfigValidationResult {
    /// Whether the config is valid
    pub valid: bool,
    /// Validation errors (critical)
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings (non-critical)
    pub warnings: Vec<ValidationIssue>,
}

impl ConfigValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        ConfigValidationResult {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn with_error(mut self, issue: ValidationIssue) -> Self {
        self.valid = false;
        self.errors.push(issue);
        self
    }

    /// Add a warning
    pub fn with_warning(mut self, issue: ValidationIssue) -> Self {
        self.warnings.push(issue);
        self
    }
}

/// A validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the config field
    pub path: String,
    /// Issue message
    pub message: String,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new issue
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Validate the configuration
pub fn validate_config(config: &InstallerConfig) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::valid();

    result = validate_paths(config, result);
    result = validate_discovery(config, result);
    result = validate_templates(config, result);

    result
}

fn validate_paths(config: &InstallerConfig, mut result: ConfigValidationResult) -> ConfigValidationResult {
    let source_dir = config.source_dir();
    if !source_dir.is_dir() {
        result = result.with_error(
            ValidationIssue::new(
                "paths.source_dir",
                format!("Skills directory does not exist: {}", source_dir.display()),
            )
            .with_suggestion("Create the directory or set paths.source_dir / SKILLPORT_SOURCE_DIR"),
        );
    }

    result
}

fn validate_discovery(config: &InstallerConfig, mut result: ConfigValidationResult) -> ConfigValidationResult {
    let extension = &config.discovery.extension;

    if extension.trim_start_matches('.').is_empty() {
        result = result.with_error(
            ValidationIssue::new("discovery.extension", "Document extension is empty")
                .with_suggestion("Set discovery.extension, e.g. \"md\""),
        );
    } else if extension.starts_with('.') {
        result = result.with_warning(
            ValidationIssue::new(
                "discovery.extension",
                format!("Extension {:?} has a leading dot; it is ignored", extension),
            )
            .with_suggestion("Write the extension without the dot"),
        );
    }

    result
}

fn validate_templates(config: &InstallerConfig, mut result: ConfigValidationResult) -> ConfigValidationResult {
    let root = config.project_root();

    for target in TargetId::ALL {
        let Some(path) = config.templates.override_for(target) else {
            continue;
        };

        let resolved = resolve_against(&root, path);
        if !resolved.is_file() {
            result = result.with_error(
                ValidationIssue::new(
                    format!("templates.{}", target),
                    format!("Template file does not exist: {}", resolved.display()),
                )
                .with_suggestion("Fix the path or remove the override to use the built-in template"),
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_in(root: &std::path::Path) -> InstallerConfig {
        let mut config = InstallerConfig::default();
        config.paths.project_root = Some(root.to_path_buf());
        config
    }

    #[test]
    fn test_missing_source_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_config(&config_in(dir.path()));

        assert!(!result.valid);
        assert_eq!(result.errors[0].path, "paths.source_dir");
    }

    #[test]
    fn test_default_layout_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("skills")).unwrap();
        let result = validate_config(&config_in(dir.path()));

        assert!(result.valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_extension_checks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("skills")).unwrap();

        let mut config = config_in(dir.path());
        config.discovery.extension = ".md".to_string();
        let result = validate_config(&config);
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);

        config.discovery.extension = String::new();
        assert!(!validate_config(&config).valid);
    }

    #[test]
    fn test_missing_template_override_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("skills")).unwrap();

        let mut config = config_in(dir.path());
        config.templates.cursor = Some(PathBuf::from("missing.hbs"));
        let result = validate_config(&config);

        assert!(!result.valid);
        assert_eq!(result.errors[0].path, "templates.cursor");
    }
}
