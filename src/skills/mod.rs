//! Skills module - discovery and parsing of skill documents
//!
//! Skills are markdown documents under the source root. Each one is found by
//! the locator, parsed into a title plus normalized sections, and handed to
//! the renderer once per target.
//!
//! ## Document shape
//!
//! ```text
//! # Research Assistant        <- title
//! ## Rol                      <- section key `rol`
//! Finds papers.
//! ## Flujo de Ejecucion       <- section key `flujo_de_ejecucion`
//! ### Step 1                  <- body text (deeper headings are not sections)
//! ```

mod locator;
mod parser;
mod types;

pub use locator::{discover_skills, is_skill_file};
pub use parser::{normalize_key, parse_document, parse_skill};
pub use types::{slugify, ParsedSkill, Sections, SourceDocument};
