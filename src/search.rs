//! Category filter and free-text search over the note collection.
//!
//! Everything here is pure: the collection is never mutated and results keep
//! the input order (newest first).
use log::trace;

use crate::{CategoryFilter, Note};

/// Notes visible for a category selector and a search query.
pub fn visible<'a>(notes: &'a [Note], filter: &CategoryFilter, query: &str) -> Vec<&'a Note> {
    let searching = !query.trim().is_empty();
    let needle = query.to_lowercase();

    let result: Vec<&Note> = notes
        .iter()
        .filter(|note| match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => note.category == category.id,
        })
        .filter(|note| !searching || contains_lowercase(note, &needle))
        .collect();

    trace!(
        "{} of {} notes visible for filter '{}' and query '{}'",
        result.len(),
        notes.len(),
        filter.selector(),
        query
    );
    result
}

fn contains_lowercase(note: &Note, needle: &str) -> bool {
    note.content.to_lowercase().contains(needle)
        || note.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
