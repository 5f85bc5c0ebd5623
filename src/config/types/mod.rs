//! Configuration types module
//!
//! Re-exports all configuration types.

pub mod discovery;
pub mod templates;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use discovery::DiscoveryConfig;
pub use templates::TemplatesConfig;

/// Main installer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Project identity used in generated output
    #[serde(default)]
    pub project: ProjectConfig,

    /// Project root and skills source directory
    #[serde(default)]
    pub paths: PathsConfig,

    /// Document discovery rules
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Per-target template overrides
    #[serde(default)]
    pub templates: TemplatesConfig,
}

impl InstallerConfig {
    /// Resolved project root
    pub fn project_root(&self) -> PathBuf {
        self.paths.project_root()
    }

    /// Resolved skills source directory
    pub fn source_dir(&self) -> PathBuf {
        self.paths.source_dir()
    }
}

/// Project identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Display name, shown in generated footers and default descriptions
    #[serde(default = "default_project_name")]
    pub name: String,
    /// Tag added to generated front matter (defaults to the lowercased name)
    #[serde(default)]
    pub tag: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            name: default_project_name(),
            tag: None,
        }
    }
}

impl ProjectConfig {
    pub fn tag(&self) -> String {
        self.tag
            .clone()
            .unwrap_or_else(|| crate::skills::slugify(&self.name))
    }
}

fn default_project_name() -> String {
    "Skillport".to_string()
}

/// Filesystem layout of the project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Project root; assistant directories (`.claude`, ...) live here.
    /// Defaults to the current directory.
    #[serde(default)]
    pub project_root: Option<PathBuf>,
    /// Skills source directory; relative paths resolve against the project
    /// root. Defaults to `<project_root>/skills`.
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
}

impl PathsConfig {
    pub fn project_root(&self) -> PathBuf {
        match &self.project_root {
            Some(root) => root.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn source_dir(&self) -> PathBuf {
        let root = self.project_root();
        match &self.source_dir {
            Some(dir) => resolve_against(&root, dir),
            None => root.join(DEFAULT_SOURCE_DIR),
        }
    }
}

/// Default skills directory name under the project root
pub const DEFAULT_SOURCE_DIR: &str = "skills";

/// Join a relative path onto `root`, leave absolute paths alone
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_dir_defaults_under_root() {
        let paths = PathsConfig {
            project_root: Some(PathBuf::from("/work/app")),
            source_dir: None,
        };
        assert_eq!(paths.source_dir(), PathBuf::from("/work/app/skills"));
    }

    #[test]
    fn test_relative_source_dir_resolves_against_root() {
        let paths = PathsConfig {
            project_root: Some(PathBuf::from("/work/app")),
            source_dir: Some(PathBuf::from("docs/skills")),
        };
        assert_eq!(paths.source_dir(), PathBuf::from("/work/app/docs/skills"));
    }

    #[test]
    fn test_project_tag_defaults_to_slug() {
        let project = ProjectConfig {
            name: "AppNotes BG".to_string(),
            tag: None,
        };
        assert_eq!(project.tag(), "appnotes-bg");
    }
}
