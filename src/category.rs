//! The fixed category registry.
//!
//! Categories are compiled in, not data-driven. The `id` of each entry is what
//! gets persisted inside a note, so labels can change freely without touching
//! stored data.
use std::fmt;

use crate::{Result, SzError};

/// Filter selector meaning "no category restriction". Never stored on a note.
pub const ALL_FILTER: &str = "all";

/// Title used for the unfiltered view and for identifiers outside the registry.
pub const FALLBACK_LABEL: &str = "Acervo";

/// A classification bucket for notes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Short ASCII alias accepted on the command line
    pub key: &'static str,
    /// Stable identifier, persisted in `Note::category`
    pub id: &'static str,
    /// Human label
    pub label: &'static str,
    /// Display glyph
    pub glyph: &'static str,
}

/// Registry order is display order; the first entry is the default.
pub const CATEGORIES: [Category; 4] = [
    Category {
        key: "inbox",
        id: "📥 Entrada",
        label: "Entrada",
        glyph: "📥",
    },
    Category {
        key: "writing",
        id: "✍️ Escrita",
        label: "Escrita",
        glyph: "✍️",
    },
    Category {
        key: "sources",
        id: "🗃️ Fontes",
        label: "Fontes",
        glyph: "🗃️",
    },
    Category {
        key: "lab",
        id: "🤖 IA",
        label: "Lab / IA",
        glyph: "🤖",
    },
];

impl Category {
    /// Finds a category by exact identifier, or by key or label ignoring case.
    pub fn lookup(input: &str) -> Option<&'static Category> {
        let input = input.trim();
        CATEGORIES
            .iter()
            .find(|c| c.id == input)
            .or_else(|| {
                CATEGORIES.iter().find(|c| {
                    c.key.eq_ignore_ascii_case(input) || c.label.to_lowercase() == input.to_lowercase()
                })
            })
    }

    /// Finds a category by exact identifier only.
    pub fn by_id(id: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.id == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph, self.label)
    }
}

/// Human label for an identifier; falls back to `FALLBACK_LABEL` for `all` or anything unknown.
pub fn resolve_label(identifier: &str) -> &'static str {
    Category::by_id(identifier)
        .map(|c| c.label)
        .unwrap_or(FALLBACK_LABEL)
}

/// Identifier assigned when a note is created without a category.
pub fn default_category() -> &'static str {
    CATEGORIES[0].id
}

pub fn is_valid_identifier(identifier: &str) -> bool {
    Category::by_id(identifier).is_some()
}

/// The category half of the visible-notes query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(&'static Category),
}

impl CategoryFilter {
    /// Accepts `all` or anything `Category::lookup` accepts.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim() == ALL_FILTER {
            return Ok(CategoryFilter::All);
        }

        Category::lookup(input)
            .map(CategoryFilter::Only)
            .ok_or_else(|| SzError::UnknownCategory {
                input: input.to_string(),
            })
    }

    /// The selector value as the original UI stored it: `all` or an identifier.
    pub fn selector(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_FILTER,
            CategoryFilter::Only(category) => category.id,
        }
    }

    /// View title for this selector.
    pub fn title(&self) -> &'static str {
        resolve_label(self.selector())
    }
}
