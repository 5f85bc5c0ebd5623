//! Built-in handlebars templates and their fields
//!
//! Template context:
//! - `title`, `name`, `slug`, `source`: the skill
//! - `project`, `tag`, `installer_version`: installer identity
//! - `generated_at` (ISO 8601) and `generated_at_display` (`%Y-%m-%d %H:%M:%S`)
//! - `fields.<name>`: resolved fallback chains listed below
//! - `sections.<key>`: raw section bodies (strict mode: missing keys fail)

use super::fallback::FieldSpec;
use crate::config::ProjectConfig;

const ROLE: &[&str] = &["rol"];
const ACTIVATION: &[&str] = &["activacion"];
const FLOW: &[&str] = &["flujo_de_ejecucion", "protocolo_de_entrada"];
const WORKFLOW: &[&str] = &["flujo_de_ejecucion"];
const INPUT: &[&str] = &["protocolo_de_entrada"];
const OUTPUT: &[&str] = &["protocolo_de_salida"];
const KEY_CONSTRAINTS: &[&str] = &["restricciones_clave"];
const CONSTRAINTS: &[&str] = &["restricciones_clave", "reglas"];
const LEVEL: &[&str] = &["nivel"];
const DOMAIN: &[&str] = &["dominio"];

pub const OPENCODE_TEMPLATE: &str = r#"---
name: {{slug}}
description: {{fields.description}}
version: "1.0.0"
source: {{source}}
generated_at: {{generated_at}}
tags: [{{slug}}, {{tag}}]
---

# 🎯 What I Do
{{fields.what}}

# ⚡ When to Use Me
{{fields.when}}

# 🔄 How to Use Me

## Execution Flow
{{fields.flow}}

## Input Protocol
```json
{
  "action": "string",
  "data": {}
}
```

## Output Protocol
```json
{
  "success": true,
  "result": {}
}
```

# ⚠️ Constraints
{{fields.constraints}}

# 📚 References
- **Source**: `{{source}}`
- **Title**: {{title}}
- **Generated**: {{generated_at_display}}

---
*Generated by {{project}} Multi-Assistant Installer v{{installer_version}}*
"#;

pub const CLAUDE_TEMPLATE: &str = r#"# {{title}}

## 🎯 Role
{{fields.role}}

## 📊 Level
{{fields.level}}

## 🌍 Domain
{{fields.domain}}

## ⚡ When to Use
{{fields.when}}

## 🔄 Execution Flow
{{fields.flow}}

## 📥 Input Protocol
{{fields.input}}

## 📤 Output Protocol
{{fields.output}}

## ⚠️ Constraints
{{fields.constraints}}

## 📚 References
- **Source**: `{{source}}`
- **Generated**: {{generated_at}}

---
*Generated by {{project}} Multi-Assistant Installer v{{installer_version}}*
"#;

pub const CURSOR_TEMPLATE: &str = r#"# {{title}}

## Description
{{fields.description}}

## Activation
{{fields.activation}}

## Rules
{{fields.rules}}

## Workflow
{{fields.workflow}}

## Source
{{source}}

---
*Generated by {{project}} Multi-Assistant Installer v{{installer_version}}*
"#;

pub fn opencode_fields(project: &ProjectConfig) -> Vec<FieldSpec> {
    vec![
        FieldSpec::inline("description", ROLE, format!("Skill de {}", project.name), 100),
        FieldSpec::block("what", ROLE, "Sin descripción"),
        FieldSpec::block("when", ACTIVATION, "Cuando sea necesario"),
        FieldSpec::block("flow", FLOW, "Seguir las instrucciones del skill"),
        FieldSpec::block("constraints", KEY_CONSTRAINTS, "Seguir las reglas del proyecto"),
    ]
}

pub fn claude_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::block("role", ROLE, "Sin descripción"),
        FieldSpec::block("level", LEVEL, "Not specified"),
        FieldSpec::block("domain", DOMAIN, "General"),
        FieldSpec::block("when", ACTIVATION, "Use when needed"),
        FieldSpec::block("flow", FLOW, "Follow instructions"),
        FieldSpec::block("input", INPUT, "JSON format"),
        FieldSpec::block("output", OUTPUT, "JSON format"),
        FieldSpec::block("constraints", CONSTRAINTS, "Follow best practices"),
    ]
}

pub fn cursor_fields(project: &ProjectConfig) -> Vec<FieldSpec> {
    vec![
        FieldSpec::block("description", ROLE, format!("Skill for {}", project.name)),
        FieldSpec::block("activation", ACTIVATION, "Automatic or on demand"),
        FieldSpec::block("rules", CONSTRAINTS, "Follow best practices"),
        FieldSpec::block("workflow", WORKFLOW, "Execute as documented"),
    ]
}
