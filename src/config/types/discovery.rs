//! Discovery configuration types
//!
//! Which files under the source root count as skill documents.

use serde::{Deserialize, Serialize};

/// Document discovery rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Recognized document extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Installer entry-point file, excluded by exact file name
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
    /// File stems never treated as skills (case-insensitive)
    #[serde(default = "default_excluded_stems")]
    pub excluded_stems: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            extension: default_extension(),
            entry_point: default_entry_point(),
            excluded_stems: default_excluded_stems(),
        }
    }
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_entry_point() -> String {
    "SETUP.md".to_string()
}

fn default_excluded_stems() -> Vec<String> {
    ["readme", "changelog", "contributing", "license", "setup"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
