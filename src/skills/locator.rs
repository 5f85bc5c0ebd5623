//! Document locator
//!
//! Walks the source root and returns every skill document in a stable order.

use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::types::SourceDocument;
use crate::config::DiscoveryConfig;
use crate::error::{Error, Result};

/// Enumerate skill documents under `root`.
///
/// The result is sorted ascending by full path, so repeated runs over an
/// unchanged tree produce the same order.
pub fn discover_skills(root: &Path, discovery: &DiscoveryConfig) -> Result<Vec<SourceDocument>> {
    if !root.is_dir() {
        return Err(Error::NotFound(format!(
            "Skills source directory does not exist: {}",
            root.display()
        )));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !is_skill_file(path, discovery) {
            continue;
        }

        debug!("Skill found: {}", path.display());
        documents.push(SourceDocument::new(root, path));
    }

    documents.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(documents)
}

/// Whether a file passes the extension and exclusion rules
pub fn is_skill_file(path: &Path, discovery: &DiscoveryConfig) -> bool {
    let extension = discovery.extension.trim_start_matches('.');
    let matches_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if !matches_extension {
        return false;
    }

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if file_name == discovery.entry_point {
        return false;
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    !discovery
        .excluded_stems
        .iter()
        .any(|excluded| excluded.to_lowercase() == stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# Skill\n").unwrap();
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let dir = tempdir().unwrap();
        let result = discover_skills(&dir.path().join("nope"), &DiscoveryConfig::default());
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_excluded_stems_are_never_returned() {
        let dir = tempdir().unwrap();
        for name in [
            "README.md",
            "readme.md",
            "ChangeLog.md",
            "CONTRIBUTING.md",
            "License.md",
            "setup.md",
            "nested/README.md",
            "writer.md",
        ] {
            touch(dir.path(), name);
        }

        let docs = discover_skills(dir.path(), &DiscoveryConfig::default()).unwrap();
        let stems: Vec<_> = docs.iter().map(|d| d.stem.as_str()).collect();
        assert_eq!(stems, vec!["writer"]);
    }

    #[test]
    fn test_entry_point_and_other_extensions_ignored() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "SETUP.md");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "script.py");
        touch(dir.path(), "planner.md");

        let discovery = DiscoveryConfig {
            entry_point: "SETUP.md".to_string(),
            excluded_stems: Vec::new(),
            ..DiscoveryConfig::default()
        };
        let docs = discover_skills(dir.path(), &discovery).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].stem, "planner");
    }

    #[test]
    fn test_results_sorted_and_stable() {
        let dir = tempdir().unwrap();
        for name in ["zeta.md", "alpha.md", "b/middle.md", "a/deep/inner.md"] {
            touch(dir.path(), name);
        }

        let first = discover_skills(dir.path(), &DiscoveryConfig::default()).unwrap();
        let second = discover_skills(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(first, second);

        let rel: Vec<_> = first.iter().map(|d| d.relative_display()).collect();
        assert_eq!(rel, vec!["a/deep/inner.md", "alpha.md", "b/middle.md", "zeta.md"]);
    }
}
