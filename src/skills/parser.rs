//! Section parser
//!
//! Turns skill markdown into a title plus a flat key -> body mapping. Only
//! `#` and `##` headings open sections; anything deeper is body text.

use super::types::{ParsedSkill, Sections, SourceDocument};
use crate::error::Result;

/// Read and parse a source document
pub fn parse_document(doc: &SourceDocument) -> Result<ParsedSkill> {
    let content = doc.read()?;
    Ok(parse_skill(&doc.stem, &doc.relative_display(), content))
}

/// Parse raw skill text. Never fails: text without headings yields no
/// sections and the stem as title.
pub fn parse_skill(name: &str, relative_path: &str, content: String) -> ParsedSkill {
    let mut title: Option<String> = None;
    let mut sections = Sections::new();
    let mut current: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in content.lines() {
        let Some((level, text)) = parse_heading(line) else {
            if current.is_some() {
                body.push(line);
            }
            continue;
        };

        if level == 1 && title.is_none() && !text.is_empty() {
            title = Some(text.to_string());
        }

        if let Some(key) = current.take() {
            sections.insert(key, join_body(&body));
        }
        body.clear();

        let key = normalize_key(text);
        // an empty heading closes the open section without starting a new one
        if !key.is_empty() {
            current = Some(key);
        }
    }

    // a trailing heading with no lines at all is not stored
    if let Some(key) = current {
        if !body.is_empty() {
            sections.insert(key, join_body(&body));
        }
    }

    ParsedSkill {
        name: name.to_string(),
        title: title.unwrap_or_else(|| name.to_string()),
        sections,
        relative_path: relative_path.to_string(),
        raw_content: content,
    }
}

/// Recognize `# text` / `## text` and return (level, trimmed text)
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=2).contains(&level) {
        return None;
    }

    let rest = &line[level..];
    let mut chars = rest.chars();
    // marker, at least one whitespace char, then at least one more char
    if !chars.next().is_some_and(char::is_whitespace) || chars.next().is_none() {
        return None;
    }

    Some((level, rest.trim()))
}

/// Normalize heading text into a section key: trim, lowercase, collapse
/// whitespace runs into `_`.
pub fn normalize_key(heading: &str) -> String {
    heading
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Join accumulated lines, dropping leading and trailing blank lines
fn join_body(lines: &[&str]) -> String {
    let is_blank = |l: &&str| l.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(l));
    let end = lines.iter().rposition(|l| !is_blank(l));

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParsedSkill {
        parse_skill("research_assistant", "research_assistant.md", content.to_string())
    }

    #[test]
    fn test_title_and_sections() {
        let skill = parse("# Research Assistant\n## Rol\nFinds papers.\n## Activacion\nOn request.\n");
        assert_eq!(skill.title, "Research Assistant");
        assert_eq!(skill.section("rol"), Some("Finds papers."));
        assert_eq!(skill.section("activacion"), Some("On request."));
    }

    #[test]
    fn test_title_falls_back_to_stem() {
        let skill = parse("## Rol\nWrites tests.\n");
        assert_eq!(skill.title, "research_assistant");
    }

    #[test]
    fn test_no_headings_yields_no_sections() {
        let skill = parse("just some prose\nwith no structure\n");
        assert!(skill.sections.is_empty());
        assert_eq!(skill.title, "research_assistant");
    }

    #[test]
    fn test_lines_before_first_heading_are_dropped() {
        let skill = parse("preamble\n\n## Rol\nbody\n");
        assert_eq!(skill.sections.len(), 1);
        assert_eq!(skill.section("rol"), Some("body"));
    }

    #[test]
    fn test_title_heading_opens_a_section() {
        let skill = parse("# Planner\nIntro text.\n## Rol\nPlans.\n");
        assert_eq!(skill.section("planner"), Some("Intro text."));
    }

    #[test]
    fn test_deeper_headings_are_body_text() {
        let skill = parse("## Flujo de Ejecucion\n### Paso 1\nDo it.\n#### Nota\n");
        assert_eq!(
            skill.section("flujo_de_ejecucion"),
            Some("### Paso 1\nDo it.\n#### Nota")
        );
    }

    #[test]
    fn test_marker_needs_whitespace() {
        let skill = parse("## Rol\n#hashtag line\n##tight\n");
        assert_eq!(skill.section("rol"), Some("#hashtag line\n##tight"));
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(normalize_key("  Protocolo   de\tEntrada "), "protocolo_de_entrada");
        assert_eq!(normalize_key("Restricciones Clave"), "restricciones_clave");
        assert_eq!(normalize_key("   "), "");
    }

    #[test]
    fn test_duplicate_heading_last_wins() {
        let skill = parse("## Reglas\nold\n## Rol\nr\n## Reglas\nnew\n");
        assert_eq!(skill.section("reglas"), Some("new"));
        assert_eq!(skill.sections.len(), 2);
    }

    #[test]
    fn test_blank_lines_trimmed_but_inner_kept() {
        let skill = parse("## Rol\n\n\n  indented first\n\nsecond\n\n\n## Nivel\nx\n");
        assert_eq!(skill.section("rol"), Some("  indented first\n\nsecond"));
    }

    #[test]
    fn test_trailing_section_flushed_without_following_heading() {
        let skill = parse("## Rol\na\n## Dominio\nbackend");
        assert_eq!(skill.section("dominio"), Some("backend"));
    }

    #[test]
    fn test_flushed_sections_match_non_empty_headings() {
        let content = "# T\nintro\n## A\n1\n## B\n2\n\n## C\n3\n";
        let skill = parse(content);
        let headings = content
            .lines()
            .filter(|l| parse_heading(l).is_some())
            .count();
        assert_eq!(skill.sections.len(), headings);
    }

    #[test]
    fn test_trailing_blank_section_kept_as_empty() {
        let skill = parse("## Rol\na\n## Nivel\n\n");
        assert_eq!(skill.section("rol"), Some("a"));
        assert_eq!(skill.section("nivel"), Some(""));
    }

    #[test]
    fn test_trailing_heading_without_lines_not_flushed() {
        let skill = parse("## Rol\na\n## Nivel");
        assert_eq!(skill.sections.len(), 1);
        assert!(!skill.sections.contains_key("nivel"));
    }

    #[test]
    fn test_empty_mid_section_kept_as_empty() {
        let skill = parse("## Nivel\n## Rol\na\n");
        assert_eq!(skill.section("nivel"), Some(""));
    }

    #[test]
    fn test_empty_heading_closes_section_without_key() {
        let skill = parse("## Rol\nkept\n##  \ndropped\n## Nivel\nsenior\n");
        assert_eq!(skill.section("rol"), Some("kept"));
        assert_eq!(skill.section("nivel"), Some("senior"));
        assert!(!skill.sections.contains_key(""));
        assert!(!skill.raw_content.is_empty());
        assert!(!skill.sections.iter().any(|(_, body)| body.contains("dropped")));
    }

    #[test]
    fn test_crlf_input() {
        let skill = parse("# Title\r\n## Rol\r\nWindows body\r\n");
        assert_eq!(skill.title, "Title");
        assert_eq!(skill.section("rol"), Some("Windows body"));
    }
}
