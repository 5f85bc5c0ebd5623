//! Section fallback chains
//!
//! A rendered field names the section keys it may come from, in order, and
//! a literal default used when none of them is present.

use crate::skills::Sections;

/// Ordered candidate keys with a terminal literal default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    keys: &'static [&'static str],
    default: String,
}

impl FallbackChain {
    pub fn new(keys: &'static [&'static str], default: impl Into<String>) -> Self {
        FallbackChain {
            keys,
            default: default.into(),
        }
    }

    /// First present key wins; otherwise the default
    pub fn resolve<'a>(&'a self, sections: &'a Sections) -> &'a str {
        self.keys
            .iter()
            .find_map(|key| sections.get(key))
            .unwrap_or(self.default.as_str())
    }
}

/// How a resolved value is placed in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Section body copied verbatim
    Block,
    /// Collapsed to one line and cut to `max_chars` characters (front matter)
    Inline { max_chars: usize },
}

/// One named value a template renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub chain: FallbackChain,
    pub format: FieldFormat,
}

impl FieldSpec {
    pub fn block(name: &'static str, keys: &'static [&'static str], default: impl Into<String>) -> Self {
        FieldSpec {
            name,
            chain: FallbackChain::new(keys, default),
            format: FieldFormat::Block,
        }
    }

    pub fn inline(
        name: &'static str,
        keys: &'static [&'static str],
        default: impl Into<String>,
        max_chars: usize,
    ) -> Self {
        FieldSpec {
            name,
            chain: FallbackChain::new(keys, default),
            format: FieldFormat::Inline { max_chars },
        }
    }

    /// Resolve the chain and apply the field format
    pub fn resolve(&self, sections: &Sections) -> String {
        let value = self.chain.resolve(sections);
        match self.format {
            FieldFormat::Block => value.to_string(),
            FieldFormat::Inline { max_chars } => value
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .chars()
                .take(max_chars)
                .collect(),
        }
    }
}
