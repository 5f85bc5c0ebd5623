//! Configuration I/O - Loading configuration
//!
//! Handles reading configuration from files and environment variables.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::InstallerConfig;
use crate::error::{Error, Result};

/// Load configuration with layered precedence:
/// 1. Config file (skillport.toml / skillport.json) if found, otherwise defaults
/// 2. Environment variable overrides (includes .env)
///
/// `project_root` seeds the config file lookup and becomes the project root
/// unless the file sets one.
pub fn load_config(project_root: Option<&Path>) -> Result<InstallerConfig> {
    let root = match project_root {
        Some(root) => root.to_path_buf(),
        None => std::env::var("SKILLPORT_PROJECT_ROOT")
            .map(PathBuf::from)
            .or_else(|_| std::env::current_dir())?,
    };

    let mut config = match super::paths::config_path(&root) {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_from_path(&path)?
        }
        None => InstallerConfig::default(),
    };

    if config.paths.project_root.is_none() {
        config.paths.project_root = Some(root);
    }

    // Apply environment variable overrides (highest precedence)
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<InstallerConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    parse_config(&content, path.extension().and_then(|ext| ext.to_str()))
}

/// Parse config text; the extension picks the format, unknown extensions
/// try JSON5 and then TOML
pub fn parse_config(content: &str, extension: Option<&str>) -> Result<InstallerConfig> {
    match extension {
        Some("json") => {
            json5::from_str(content).map_err(|e| Error::Config(format!("Invalid JSON config: {}", e)))
        }
        Some("toml") => {
            toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))
        }
        _ => json5::from_str(content)
            .or_else(|_| toml::from_str(content).map_err(|e| Error::Config(e.to_string())))
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e))),
    }
}

/// Apply environment variable overrides to an existing config.
///
/// Loads `.env` if present, then overlays any set `SKILLPORT_*` variables.
pub fn apply_env_overrides(config: &mut InstallerConfig) {
    dotenvy::dotenv().ok();

    if let Ok(root) = std::env::var("SKILLPORT_PROJECT_ROOT") {
        config.paths.project_root = Some(PathBuf::from(root));
    }
    if let Ok(dir) = std::env::var("SKILLPORT_SOURCE_DIR") {
        config.paths.source_dir = Some(PathBuf::from(dir));
    }
    if let Ok(name) = std::env::var("SKILLPORT_PROJECT_NAME") {
        config.project.name = name;
    }
    if let Ok(ext) = std::env::var("SKILLPORT_EXTENSION") {
        config.discovery.extension = ext;
    }
}

/// Render the effective configuration as TOML
pub fn config_to_toml(config: &InstallerConfig) -> Result<String> {
    toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_toml_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("skillport.toml");
        std::fs::write(
            &path,
            r#"
[project]
name = "AppNotesBG"

[discovery]
excluded_stems = ["draft"]

[templates]
claude = "templates/claude.hbs"
"#,
        )
        .unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.project.name, "AppNotesBG");
        assert_eq!(config.discovery.excluded_stems, vec!["draft"]);
        assert_eq!(config.discovery.extension, "md");
        assert_eq!(
            config.templates.claude.as_deref(),
            Some(Path::new("templates/claude.hbs"))
        );
    }

    #[test]
    fn test_load_json5_config() {
        let config = parse_config(
            "{ project: { name: 'Notes' }, paths: { source_dir: 'docs' }, }",
            Some("json"),
        )
        .unwrap();
        assert_eq!(config.project.name, "Notes");
        assert_eq!(config.paths.source_dir, Some(PathBuf::from("docs")));
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let result = parse_config("[project\nname =", Some("toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = InstallerConfig::default();
        let text = config_to_toml(&config).unwrap();
        let parsed = parse_config(&text, Some("toml")).unwrap();
        assert_eq!(parsed.project.name, config.project.name);
    }
}
