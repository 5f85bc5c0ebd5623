//! Target profiles - output conventions for each assistant
//!
//! Every supported assistant is one `TargetId` variant. Its `TargetProfile`
//! says where generated files go, how they are named and which template and
//! fields produce their content. The `TargetRegistry` holds one profile per
//! variant and is built once from configuration.
//!
//! | target   | output                                 |
//! |----------|----------------------------------------|
//! | opencode | `.opencode/skills/<slug>/SKILL.md`     |
//! | claude   | `.claude/commands/<slug>.md`           |
//! | cursor   | `.cursor/rules/<slug>.md`              |

mod fallback;
mod templates;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub use fallback::{FallbackChain, FieldFormat, FieldSpec};
pub use templates::{CLAUDE_TEMPLATE, CURSOR_TEMPLATE, OPENCODE_TEMPLATE};

use crate::config::{InstallerConfig, ProjectConfig};
use crate::error::{Error, Result};

/// Supported assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetId {
    Opencode,
    Claude,
    Cursor,
}

impl TargetId {
    pub const ALL: [TargetId; 3] = [TargetId::Opencode, TargetId::Claude, TargetId::Cursor];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetId::Opencode => "opencode",
            TargetId::Claude => "claude",
            TargetId::Cursor => "cursor",
        }
    }

    fn index(&self) -> usize {
        match self {
            TargetId::Opencode => 0,
            TargetId::Claude => 1,
            TargetId::Cursor => 2,
        }
    }
}

impl std::str::FromStr for TargetId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opencode" => Ok(TargetId::Opencode),
            "claude" | "claude-code" => Ok(TargetId::Claude),
            "cursor" => Ok(TargetId::Cursor),
            _ => Err(Error::InvalidInput(format!(
                "Unknown target: {}. Valid: opencode, claude, cursor",
                s
            ))),
        }
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a skill maps to a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLayout {
    /// `<slug>/<file_name>`, one directory per skill
    PerSkillDirectory { file_name: &'static str },
    /// `<slug>.<extension>`
    Flat { extension: &'static str },
}

impl FileLayout {
    pub fn file_path(&self, slug: &str) -> PathBuf {
        match self {
            FileLayout::PerSkillDirectory { file_name } => Path::new(slug).join(file_name),
            FileLayout::Flat { extension } => PathBuf::from(format!("{}.{}", slug, extension)),
        }
    }
}

/// Output conventions and rendering rules of one assistant
#[derive(Debug, Clone)]
pub struct TargetProfile {
    pub id: TargetId,
    /// Display name
    pub name: &'static str,
    pub emoji: &'static str,
    /// Executable looked up on PATH during detection
    pub binary: &'static str,
    /// Directory under the assistant root holding generated files
    pub output_subdir: &'static str,
    pub layout: FileLayout,
    /// Values resolved from sections and exposed as `fields.<name>`
    pub fields: Vec<FieldSpec>,
    /// Handlebars template source
    pub template: Cow<'static, str>,
}

impl TargetProfile {
    /// Built-in profile for a target
    pub fn builtin(id: TargetId, project: &ProjectConfig) -> Self {
        match id {
            TargetId::Opencode => TargetProfile {
                id,
                name: "Opencode",
                emoji: "🔷",
                binary: "opencode",
                output_subdir: "skills",
                layout: FileLayout::PerSkillDirectory { file_name: "SKILL.md" },
                fields: templates::opencode_fields(project),
                template: Cow::Borrowed(OPENCODE_TEMPLATE),
            },
            TargetId::Claude => TargetProfile {
                id,
                name: "Claude Code",
                emoji: "🟣",
                binary: "claude",
                output_subdir: "commands",
                layout: FileLayout::Flat { extension: "md" },
                fields: templates::claude_fields(),
                template: Cow::Borrowed(CLAUDE_TEMPLATE),
            },
            TargetId::Cursor => TargetProfile {
                id,
                name: "Cursor",
                emoji: "⚡",
                binary: "cursor",
                output_subdir: "rules",
                layout: FileLayout::Flat { extension: "md" },
                fields: templates::cursor_fields(project),
                template: Cow::Borrowed(CURSOR_TEMPLATE),
            },
        }
    }

    /// Replace the template source
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Cow::Owned(template.into());
        self
    }

    /// Output directory relative to the project root, e.g. `.claude/commands`
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(format!(".{}", self.id)).join(self.output_subdir)
    }

    /// Output file relative to the project root
    pub fn output_path(&self, slug: &str) -> PathBuf {
        self.output_dir().join(self.layout.file_path(slug))
    }
}

/// One profile per `TargetId`
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    profiles: [TargetProfile; 3],
}

impl TargetRegistry {
    /// Built-in profiles with no template overrides
    pub fn builtin(project: &ProjectConfig) -> Self {
        TargetRegistry {
            profiles: TargetId::ALL.map(|id| TargetProfile::builtin(id, project)),
        }
    }

    /// Built-in profiles with the configured template overrides applied
    pub fn from_config(config: &InstallerConfig) -> Result<Self> {
        let mut registry = Self::builtin(&config.project);
        let root = config.project_root();

        for id in TargetId::ALL {
            if let Some(template) = config.templates.load_override(id, &root)? {
                registry = registry.with_template(id, template);
            }
        }

        Ok(registry)
    }

    /// Override one target's template
    pub fn with_template(mut self, id: TargetId, template: impl Into<String>) -> Self {
        let profile = self.profiles[id.index()].clone().with_template(template);
        self.profiles[id.index()] = profile;
        self
    }

    pub fn get(&self, id: TargetId) -> &TargetProfile {
        &self.profiles[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetProfile> {
        self.profiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_id_parse_and_display() {
        assert_eq!("Claude".parse::<TargetId>().unwrap(), TargetId::Claude);
        assert_eq!("claude-code".parse::<TargetId>().unwrap(), TargetId::Claude);
        assert!("vim".parse::<TargetId>().is_err());
        for id in TargetId::ALL {
            assert_eq!(id.to_string().parse::<TargetId>().unwrap(), id);
        }
    }

    #[test]
    fn test_output_paths() {
        let registry = TargetRegistry::builtin(&ProjectConfig::default());
        assert_eq!(
            registry.get(TargetId::Opencode).output_path("research-assistant"),
            PathBuf::from(".opencode/skills/research-assistant/SKILL.md")
        );
        assert_eq!(
            registry.get(TargetId::Claude).output_path("research-assistant"),
            PathBuf::from(".claude/commands/research-assistant.md")
        );
        assert_eq!(
            registry.get(TargetId::Cursor).output_path("research-assistant"),
            PathBuf::from(".cursor/rules/research-assistant.md")
        );
    }

    #[test]
    fn test_registry_lookup_matches_id() {
        let registry = TargetRegistry::builtin(&ProjectConfig::default());
        for id in TargetId::ALL {
            assert_eq!(registry.get(id).id, id);
        }
        assert_eq!(registry.iter().count(), 3);
    }

    #[test]
    fn test_template_override_touches_one_target() {
        let registry = TargetRegistry::builtin(&ProjectConfig::default())
            .with_template(TargetId::Cursor, "{{title}}");
        assert_eq!(registry.get(TargetId::Cursor).template, "{{title}}");
        assert_eq!(registry.get(TargetId::Claude).template, CLAUDE_TEMPLATE);
    }

    #[test]
    fn test_from_config_loads_override_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("claude.hbs"), "# {{title}}\n").unwrap();

        let mut config = InstallerConfig::default();
        config.paths.project_root = Some(dir.path().to_path_buf());
        config.templates.claude = Some(PathBuf::from("claude.hbs"));

        let registry = TargetRegistry::from_config(&config).unwrap();
        assert_eq!(registry.get(TargetId::Claude).template, "# {{title}}\n");
    }

    #[test]
    fn test_from_config_missing_override_is_config_error() {
        let mut config = InstallerConfig::default();
        config.templates.opencode = Some(PathBuf::from("/definitely/missing.hbs"));
        assert!(matches!(
            TargetRegistry::from_config(&config),
            Err(Error::Config(_))
        ));
    }
}
