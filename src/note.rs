//! The note record persisted by the repository.
use serde::{Deserialize, Serialize};

/// Identifier of a note, in milliseconds since the Unix epoch at creation.
pub type NoteId = i64;

/// Represents a single note in our system
///
/// Field order matches the persisted record: `id`, `content`, `category`,
/// `tags`, `date`. Every field has a serde default so records written by
/// other tools are accepted as-is on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for the note
    #[serde(default)]
    pub id: NoteId,
    /// Note body, kept verbatim
    #[serde(default)]
    pub content: String,
    /// Category identifier (see `category::CATEGORIES`)
    #[serde(default)]
    pub category: String,
    /// Tags for organization, in the order they were typed
    #[serde(default)]
    pub tags: Vec<String>,
    /// Locale-formatted creation timestamp
    #[serde(default)]
    pub date: String,
}

impl Note {
    pub fn new(
        id: NoteId,
        content: String,
        category: String,
        tags: Vec<String>,
        date: String,
    ) -> Self {
        Note {
            id,
            content,
            category,
            tags,
            date,
        }
    }
}
