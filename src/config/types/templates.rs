//! Template override configuration
//!
//! Each target can swap its built-in handlebars template for a file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::resolve_against;
use crate::error::{Error, Result};
use crate::targets::TargetId;

/// Paths to handlebars files replacing the built-in templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default)]
    pub opencode: Option<PathBuf>,
    #[serde(default)]
    pub claude: Option<PathBuf>,
    #[serde(default)]
    pub cursor: Option<PathBuf>,
}

impl TemplatesConfig {
    /// Configured override path for a target, if any
    pub fn override_for(&self, target: TargetId) -> Option<&Path> {
        match target {
            TargetId::Opencode => self.opencode.as_deref(),
            TargetId::Claude => self.claude.as_deref(),
            TargetId::Cursor => self.cursor.as_deref(),
        }
    }

    /// Read the override template for a target, resolving relative paths
    /// against the project root
    pub fn load_override(&self, target: TargetId, project_root: &Path) -> Result<Option<String>> {
        let Some(path) = self.override_for(target) else {
            return Ok(None);
        };

        let path = resolve_against(project_root, path);
        let template = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!(
                "Failed to read {} template {}: {}",
                target,
                path.display(),
                e
            ))
        })?;
        Ok(Some(template))
    }
}
