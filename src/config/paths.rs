//! Configuration paths
//!
//! Utilities for resolving configuration file and assistant directory paths.

use std::path::{Path, PathBuf};

use crate::targets::TargetId;

/// Config file names looked up in the project root, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["skillport.toml", "skillport.json"];

/// Get the per-user configuration directory
pub fn user_config_dir() -> PathBuf {
    // Check for explicit override
    if let Ok(dir) = std::env::var("SKILLPORT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    dirs::config_dir()
        .map(|d| d.join("skillport"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".config").join("skillport"))
                .unwrap_or_else(|| PathBuf::from(".skillport"))
        })
}

/// Find the configuration file for a project.
///
/// `SKILLPORT_CONFIG` wins; then the project root is searched, then the
/// user config directory.
pub fn config_path(project_root: &Path) -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SKILLPORT_CONFIG") {
        return Some(PathBuf::from(path));
    }

    find_config_file(project_root, &user_config_dir())
}

/// First existing config file: project files in `CONFIG_FILE_NAMES` order,
/// then `<user_dir>/config.toml`
pub fn find_config_file(project_root: &Path, user_dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .chain(std::iter::once(user_dir.join("config.toml")))
        .find(|path| path.is_file())
}

/// Root directory of one assistant, e.g. `<project>/.claude`
pub fn assistant_dir(project_root: &Path, target: TargetId) -> PathBuf {
    project_root.join(format!(".{}", target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_dir() {
        let root = Path::new("/work/app");
        assert_eq!(
            assistant_dir(root, TargetId::Claude),
            PathBuf::from("/work/app/.claude")
        );
    }

    #[test]
    fn test_config_file_prefers_project_toml() {
        let project = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        std::fs::write(project.path().join("skillport.json"), "{}").unwrap();
        std::fs::write(project.path().join("skillport.toml"), "").unwrap();
        std::fs::write(user.path().join("config.toml"), "").unwrap();

        assert_eq!(
            find_config_file(project.path(), user.path()),
            Some(project.path().join("skillport.toml"))
        );
    }

    #[test]
    fn test_config_file_falls_back_to_user_dir() {
        let project = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        assert_eq!(find_config_file(project.path(), user.path()), None);

        std::fs::write(user.path().join("config.toml"), "").unwrap();
        assert_eq!(
            find_config_file(project.path(), user.path()),
            Some(user.path().join("config.toml"))
        );
    }
}
