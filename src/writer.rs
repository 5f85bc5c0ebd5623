//! Output writer
//!
//! Persists rendered artifacts under the project root.

use std::path::{Component, Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};
use crate::render::RenderedArtifact;

/// Writes artifacts below a fixed root directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OutputWriter { root: root.into() }
    }

    /// Absolute destination of a relative artifact path.
    ///
    /// Absolute paths and `..` components are rejected so nothing lands
    /// outside the root.
    pub fn resolve(&self, relative: &Path) -> Result<PathBuf> {
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(Error::Write(format!(
                "Access denied: {} is outside {}",
                relative.display(),
                self.root.display()
            )));
        }

        Ok(self.root.join(relative))
    }

    /// Write an artifact, creating parent directories and replacing any
    /// existing file
    pub fn write(&self, artifact: &RenderedArtifact) -> Result<PathBuf> {
        let full_path = self.resolve(&artifact.path)?;

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Write(format!(
                    "Failed to create directories {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        std::fs::write(&full_path, &artifact.content).map_err(|e| {
            Error::Write(format!("Failed to write {}: {}", full_path.display(), e))
        })?;

        info!(
            "Wrote {} bytes for {} -> {}",
            artifact.content.len(),
            artifact.skill,
            full_path.display()
        );
        Ok(full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::TargetId;
    use tempfile::tempdir;

    fn artifact(path: &str, content: &str) -> RenderedArtifact {
        RenderedArtifact {
            target: TargetId::Opencode,
            skill: "planner".to_string(),
            path: PathBuf::from(path),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_creates_intermediate_directories() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());

        let written = writer
            .write(&artifact(".opencode/skills/planner/SKILL.md", "hello"))
            .unwrap();

        assert_eq!(written, dir.path().join(".opencode/skills/planner/SKILL.md"));
        assert_eq!(std::fs::read_to_string(written).unwrap(), "hello");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());

        writer.write(&artifact(".claude/commands/planner.md", "a much longer first version")).unwrap();
        let written = writer.write(&artifact(".claude/commands/planner.md", "v2")).unwrap();

        assert_eq!(std::fs::read_to_string(written).unwrap(), "v2");
    }

    #[test]
    fn test_rejects_traversal_and_absolute_paths() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("project"));

        for path in ["../escape.md", ".claude/../../escape.md", "/tmp/abs.md", ""] {
            let result = writer.write(&artifact(path, "x"));
            assert!(matches!(result, Err(Error::Write(_))), "{} was accepted", path);
        }
        assert!(!dir.path().join("escape.md").exists());
    }

    #[test]
    fn test_unwritable_destination_is_write_error() {
        let dir = tempdir().unwrap();
        // a regular file where a directory is needed
        std::fs::write(dir.path().join(".cursor"), "not a dir").unwrap();
        let writer = OutputWriter::new(dir.path());

        let result = writer.write(&artifact(".cursor/rules/planner.md", "x"));
        assert!(matches!(result, Err(Error::Write(_))));
    }
}
