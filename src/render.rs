//! Renderer - skill + profile -> output text and path

use chrono::NaiveDateTime;
use handlebars::Handlebars;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::skills::{ParsedSkill, Sections};
use crate::targets::{TargetId, TargetProfile, TargetRegistry};

/// A fully rendered output file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub target: TargetId,
    /// Name of the source skill
    pub skill: String,
    /// Output path relative to the project root
    pub path: PathBuf,
    pub content: String,
}

/// Data handed to the templates
#[derive(Debug, Serialize)]
struct RenderContext<'a> {
    title: &'a str,
    name: &'a str,
    slug: String,
    source: &'a str,
    project: &'a str,
    tag: &'a str,
    installer_version: &'a str,
    generated_at: String,
    generated_at_display: String,
    fields: BTreeMap<&'static str, String>,
    sections: &'a Sections,
}

/// Renders skills through the compiled templates of every profile
pub struct Renderer {
    /// Handlebars registry, one template per target
    registry: Handlebars<'static>,
    project: String,
    tag: String,
}

impl Renderer {
    /// Compile every profile template.
    ///
    /// A template that does not compile is a configuration error.
    pub fn new(targets: &TargetRegistry, project: &ProjectConfig) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        for profile in targets.iter() {
            registry
                .register_template_string(profile.id.as_str(), profile.template.as_ref())
                .map_err(|e| Error::Config(format!("Invalid {} template: {}", profile.id, e)))?;
        }

        Ok(Renderer {
            registry,
            project: project.name.clone(),
            tag: project.tag(),
        })
    }

    /// Render one skill for one target. Pure given its inputs.
    pub fn render(
        &self,
        skill: &ParsedSkill,
        profile: &TargetProfile,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedArtifact> {
        let slug = skill.slug();
        let fields = profile
            .fields
            .iter()
            .map(|field| (field.name, field.resolve(&skill.sections)))
            .collect();

        let context = RenderContext {
            title: &skill.title,
            name: &skill.name,
            slug: slug.clone(),
            source: &skill.relative_path,
            project: &self.project,
            tag: &self.tag,
            installer_version: crate::VERSION,
            generated_at: generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            generated_at_display: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            fields,
            sections: &skill.sections,
        };

        let content = self
            .registry
            .render(profile.id.as_str(), &context)
            .map_err(|e| {
                Error::Transform(format!(
                    "Failed to render {} for {}: {}",
                    skill.name, profile.id, e
                ))
            })?;

        Ok(RenderedArtifact {
            target: profile.id,
            skill: skill.name.clone(),
            path: profile.output_path(&slug),
            content,
        })
    }
}
