use log::{debug, info, trace, warn};

use crate::{
    category::{default_category, is_valid_identifier},
    clock::{Clock, SystemClock},
    helper::{format_date, parse_tags, DEFAULT_DATE_FORMAT},
    store::{KeyValueStore, NOTES_KEY},
    ConfirmPrompt, Confirmation, Note, NoteId, Result, SzError,
};

/// What happened to a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The note was removed and the remainder persisted
    Deleted(Note),
    /// No note had that id; the collection was persisted unchanged
    NotFound,
    /// The confirmation was declined; nothing changed
    Declined,
}

/// Owns the canonical, newest-first collection of notes.
///
/// The store is read once, in [`NoteRepository::initialize`]. Every mutation
/// rewrites the whole collection under the notes key before returning.
pub struct NoteRepository<S: KeyValueStore> {
    /// Store handle the collection is persisted through
    store: S,

    /// In-memory collection, newest first
    notes: Vec<Note>,

    /// Source of ids and creation dates
    clock: Box<dyn Clock>,

    /// strftime layout for `Note::date`
    date_format: String,

    /// Highest id issued by this instance
    last_issued: Option<NoteId>,
}

impl<S: KeyValueStore> NoteRepository<S> {
    /// Loads the collection from the store.
    ///
    /// An absent, unreadable or unparseable notes key yields an empty
    /// collection; the store is never treated as a fatal error here.
    pub fn initialize(store: S) -> Self {
        let notes = match store.get(NOTES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => {
                    info!("Loaded {} notes from store", notes.len());
                    notes
                }
                Err(e) => {
                    warn!("Stored notes are not readable, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No notes stored yet");
                Vec::new()
            }
            Err(e) => {
                warn!("Store unavailable, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            store,
            notes,
            clock: Box::new(SystemClock),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            last_issued: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Creates a note, prepends it, and persists the collection.
    ///
    /// `category` defaults to the Inbox identifier. Whitespace-only content is
    /// rejected with `SzError::Validation` and nothing is written.
    pub fn create(
        &mut self,
        content: &str,
        category: Option<&str>,
        raw_tags: &str,
    ) -> Result<Note> {
        if content.trim().is_empty() {
            debug!("Rejecting note with empty content");
            return Err(SzError::Validation {
                message: "note content is empty".to_string(),
            });
        }

        let category = match category {
            Some(id) if is_valid_identifier(id) => id.to_string(),
            Some(other) => {
                return Err(SzError::UnknownCategory {
                    input: other.to_string(),
                })
            }
            None => default_category().to_string(),
        };

        let now = self.clock.now();
        let id = self.next_id(now.timestamp_millis());
        let note = Note::new(
            id,
            content.to_string(),
            category,
            parse_tags(raw_tags),
            format_date(&now, &self.date_format),
        );

        self.notes.insert(0, note.clone());
        if let Err(e) = self.persist() {
            self.notes.remove(0);
            return Err(e);
        }
        self.last_issued = Some(id);

        info!("Created note {} in {}", note.id, note.category);
        Ok(note)
    }

    /// Deletes a note after asking `confirmation`.
    ///
    /// The remainder is persisted even when no note matched `id`.
    pub fn delete(
        &mut self,
        id: NoteId,
        confirmation: &mut dyn Confirmation,
    ) -> Result<DeleteOutcome> {
        if !confirmation.confirm(&ConfirmPrompt::DeleteNote { id }) {
            debug!("Deletion of note {} declined", id);
            return Ok(DeleteOutcome::Declined);
        }

        let position = self.notes.iter().position(|n| n.id == id);
        let removed = position.map(|index| self.notes.remove(index));
        if let Err(e) = self.persist() {
            if let (Some(index), Some(note)) = (position, removed) {
                self.notes.insert(index, note);
            }
            return Err(e);
        }

        match removed {
            Some(note) => {
                info!("Deleted note {}", id);
                Ok(DeleteOutcome::Deleted(note))
            }
            None => {
                debug!("Note {} not found; nothing deleted", id);
                Ok(DeleteOutcome::NotFound)
            }
        }
    }

    /// The in-memory collection, newest first. Does not touch the store.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Overwrites the whole collection and persists it verbatim.
    ///
    /// No validation: duplicate ids and foreign categories are kept as given.
    pub fn replace_all(&mut self, notes: Vec<Note>) -> Result<()> {
        info!(
            "Replacing {} notes with {} imported notes",
            self.notes.len(),
            notes.len()
        );
        let previous = std::mem::replace(&mut self.notes, notes);
        if let Err(e) = self.persist() {
            self.notes = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Raw value currently stored under the notes key, read from the store.
    pub fn persisted_payload(&self) -> Result<Option<String>> {
        self.store.get(NOTES_KEY)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.notes)?;
        trace!("Persisting {} notes ({} bytes)", self.notes.len(), json.len());
        self.store.set(NOTES_KEY, &json)
    }

    /// Millisecond id, forced above the last issued one and clear of any id
    /// already in the collection.
    fn next_id(&self, millis: i64) -> NoteId {
        let mut candidate = match self.last_issued {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        while self.notes.iter().any(|n| n.id == candidate) {
            candidate += 1;
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::HashSet};

    use crate::{clock::ManualClock, store::MemoryStore, AlwaysConfirm, NeverConfirm};

    use super::*;

    fn repo(store: &MemoryStore) -> NoteRepository<&MemoryStore> {
        NoteRepository::initialize(store).with_clock(ManualClock::at_millis(1_760_000_000_000))
    }

    #[test]
    fn create_prepends_and_persists() {
        let store = MemoryStore::new();
        let mut repo = repo(&store);

        let note = repo.create("first thought", None, "").unwrap();
        assert_eq!(note.category, default_category());
        assert_eq!(note.id, 1_760_000_000_000);
        assert_eq!(repo.list()[0], note);

        let raw = store.get(NOTES_KEY).unwrap().unwrap();
        let stored: Vec<Note> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, repo.list());
    }

    #[test]
    fn whitespace_content_is_rejected_without_write() {
        let store = MemoryStore::new();
        let mut repo = repo(&store);

        let err = repo.create("  \n\t ", None, "tag").unwrap_err();
        assert!(matches!(err, SzError::Validation { .. }));
        assert!(repo.is_empty());
        assert_eq!(store.get(NOTES_KEY).unwrap(), None);
    }

    #[test]
    fn content_is_kept_verbatim() {
        let store = MemoryStore::new();
        let mut repo = repo(&store);
        let note = repo.create("  padded  ", None, "").unwrap();
        assert_eq!(note.content, "  padded  ");
    }

    #[test]
    fn unknown_explicit_category_is_rejected() {
        let store = MemoryStore::new();
        let mut repo = repo(&store);
        assert!(matches!(
            repo.create("text", Some("Novels"), ""),
            Err(SzError::UnknownCategory { .. })
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn same_millisecond_creates_get_distinct_increasing_ids() {
        let store = MemoryStore::new();
        let mut repo = repo(&store);

        let ids: Vec<NoteId> = (0..5)
            .map(|i| repo.create(&format!("note {}", i), None, "").unwrap().id)
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let listed: Vec<NoteId> = repo.list().iter().map(|n| n.id).collect();
        let mut reversed = ids.clone();
        reversed.reverse();
        assert_eq!(listed, reversed);
        assert_eq!(listed.iter().collect::<HashSet<_>>().len(), 5);
    }

    #[test]
    fn ids_skip_values_already_present_from_import() {
        let store = MemoryStore::new();
        let mut repo = repo(&store);
        repo.replace_all(vec![Note::new(
            1_760_000_000_000,
            "imported".to_string(),
            default_category().to_string(),
            Vec::new(),
            String::new(),
        )])
        .unwrap();

        let note = repo.create("fresh", None, "").unwrap();
        assert_eq!(note.id, 1_760_000_000_001);
    }

    #[test]
    fn delete_asks_first_and_persists_remainder() {
        let store = MemoryStore::new();
        let mut repo = repo(&store);
        let a = repo.create("a", None, "").unwrap();
        let b = repo.create("b", None, "").unwrap();

        assert_eq!(repo.delete(a.id, &mut NeverConfirm).unwrap(), DeleteOutcome::Declined);
        assert_eq!(repo.len(), 2);

        assert_eq!(
            repo.delete(a.id, &mut AlwaysConfirm).unwrap(),
            DeleteOutcome::Deleted(a)
        );
        assert_eq!(repo.list(), &[b.clone()]);

        let stored: Vec<Note> =
            serde_json::from_str(&store.get(NOTES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, vec![b]);
    }

    #[test]
    fn deleting_missing_id_is_not_an_error() {
        let store = MemoryStore::new();
        let mut repo = repo(&store);
        repo.create("keep", None, "").unwrap();
        let before = repo.list().to_vec();

        assert_eq!(repo.delete(42, &mut AlwaysConfirm).unwrap(), DeleteOutcome::NotFound);
        assert_eq!(repo.list(), before.as_slice());
    }

    #[test]
    fn malformed_store_value_starts_empty() {
        let store = MemoryStore::new();
        store.set(NOTES_KEY, "{not json").unwrap();

        let repo = NoteRepository::initialize(&store);
        assert!(repo.is_empty());
        assert_eq!(repo.persisted_payload().unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn list_does_not_reread_the_store() {
        let store = MemoryStore::new();
        let mut repo = repo(&store);
        repo.create("kept in memory", None, "").unwrap();

        store.clear();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.persisted_payload().unwrap(), None);
    }

    #[test]
    fn date_uses_configured_layout() {
        let store = MemoryStore::new();
        let mut repo = repo(&store).with_date_format("%Y-%m-%d");
        let note = repo.create("dated", None, "").unwrap();
        assert_eq!(note.date, "2025-10-09");
    }

    /// Store whose writes start failing once `failing` is set
    #[derive(Default)]
    struct FailingStore {
        inner: MemoryStore,
        failing: Cell<bool>,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.failing.get() {
                return Err(SzError::Store {
                    key: key.to_string(),
                    message: "disk full".to_string(),
                });
            }
            self.inner.set(key, value)
        }
    }

    fn seeded(store: &FailingStore) -> NoteRepository<&FailingStore> {
        let mut repo = NoteRepository::initialize(store)
            .with_clock(ManualClock::at_millis(1_760_000_000_000));
        repo.create("older", None, "").unwrap();
        repo.create("newer", None, "").unwrap();
        store.failing.set(true);
        repo
    }

    #[test]
    fn failed_create_write_leaves_collection_unchanged() {
        let store = FailingStore::default();
        let mut repo = seeded(&store);
        let before = repo.list().to_vec();
        let stored_before = store.get(NOTES_KEY).unwrap();

        assert!(matches!(
            repo.create("lost", None, ""),
            Err(SzError::Store { .. })
        ));
        assert_eq!(repo.list(), before.as_slice());
        assert_eq!(store.get(NOTES_KEY).unwrap(), stored_before);
    }

    #[test]
    fn failed_delete_write_restores_note_in_place() {
        let store = FailingStore::default();
        let mut repo = seeded(&store);
        let before = repo.list().to_vec();
        let stored_before = store.get(NOTES_KEY).unwrap();

        assert!(matches!(
            repo.delete(before[1].id, &mut AlwaysConfirm),
            Err(SzError::Store { .. })
        ));
        assert_eq!(repo.list(), before.as_slice());
        assert_eq!(store.get(NOTES_KEY).unwrap(), stored_before);

        store.failing.set(false);
        assert_eq!(
            repo.delete(before[1].id, &mut AlwaysConfirm).unwrap(),
            DeleteOutcome::Deleted(before[1].clone())
        );
    }

    #[test]
    fn failed_replace_all_write_keeps_previous_collection() {
        let store = FailingStore::default();
        let mut repo = seeded(&store);
        let before = repo.list().to_vec();
        let stored_before = store.get(NOTES_KEY).unwrap();

        assert!(matches!(
            repo.replace_all(Vec::new()),
            Err(SzError::Store { .. })
        ));
        assert_eq!(repo.list(), before.as_slice());
        assert_eq!(store.get(NOTES_KEY).unwrap(), stored_before);
    }
}
