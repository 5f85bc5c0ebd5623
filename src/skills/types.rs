//! Skill document model
//!
//! A `SourceDocument` is a file found by the locator; a `ParsedSkill` is the
//! normalized title + sections view the renderer works from.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A candidate skill file under the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to the source root
    pub relative_path: PathBuf,
    /// File stem, used as the skill name
    pub stem: String,
}

impl SourceDocument {
    /// Build a document from a file path under `root`
    pub fn new(root: &Path, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        SourceDocument {
            path,
            relative_path,
            stem,
        }
    }

    /// Relative path with forward slashes on every platform
    pub fn relative_display(&self) -> String {
        self.relative_path.to_string_lossy().replace('\\', "/")
    }

    /// Read the document text.
    ///
    /// Invalid UTF-8 is decoded lossily so parsing stays total.
    pub fn read(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            Error::Parse(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Ordered section mapping: normalized heading key -> body text.
///
/// Keys are unique; re-inserting a key replaces its body in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<(String, String)>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a section body
    pub fn insert(&mut self, key: impl Into<String>, body: impl Into<String>) {
        let key = key.into();
        let body = body.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = body,
            None => self.entries.push((key, body)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, body) in &self.entries {
            map.serialize_entry(key, body)?;
        }
        map.end()
    }
}

/// A skill document parsed into title and sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSkill {
    /// File stem of the source document
    pub name: String,
    /// First level-1 heading, or `name`
    pub title: String,
    /// Section bodies keyed by normalized heading
    pub sections: Sections,
    /// Source path relative to the source root (forward slashes)
    pub relative_path: String,
    /// Original document text
    pub raw_content: String,
}

impl ParsedSkill {
    /// Filesystem-safe name used in output paths
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Look up a section body by normalized key
    pub fn section(&self, key: &str) -> Option<&str> {
        self.sections.get(key)
    }
}

/// Lowercase a skill name and turn underscores and spaces into hyphens
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(['_', ' '], "-")
}
