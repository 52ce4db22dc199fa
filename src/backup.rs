//! Full-collection backup and restore.
//!
//! The backup payload is exactly the persisted notes record: a JSON array of
//! notes, no envelope, no version field. Export hands back what the store
//! holds; import replaces the whole collection after confirmation.
use chrono::Utc;
use log::{debug, info, warn};

use crate::{
    store::KeyValueStore, ConfirmPrompt, Confirmation, ExportedFile, Note, NoteRepository,
    Result, SzError,
};

pub const BACKUP_MIME: &str = "application/json";

/// What an import did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The collection was replaced by `count` imported notes
    Replaced { count: usize },
    /// The payload parsed, but the replacement was declined
    Declined,
}

/// Exports the stored notes record verbatim as `sistematiza_backup_<millis>.json`.
///
/// Reads the store rather than the in-memory collection. Fails with
/// `SzError::NoData` if nothing was ever persisted.
pub fn export_backup<S: KeyValueStore>(repo: &NoteRepository<S>) -> Result<ExportedFile> {
    let contents = repo.persisted_payload()?.ok_or_else(|| {
        debug!("Backup requested with no stored notes");
        SzError::NoData
    })?;

    let file = ExportedFile {
        file_name: format!("sistematiza_backup_{}.json", Utc::now().timestamp_millis()),
        mime_type: BACKUP_MIME.to_string(),
        contents,
    };
    info!("Prepared backup {} ({} bytes)", file.file_name, file.contents.len());
    Ok(file)
}

/// Parses a backup payload into notes.
///
/// Accepts UTF-8 with or without a byte-order mark. Records are taken as-is:
/// missing fields get defaults, unknown categories and duplicate ids are kept.
pub fn parse_backup(payload: &[u8]) -> Result<Vec<Note>> {
    let text = std::str::from_utf8(payload).map_err(|e| SzError::ImportParse {
        message: format!("payload is not UTF-8: {}", e),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    serde_json::from_str::<Vec<Note>>(text).map_err(|e| {
        warn!("Rejected import payload: {}", e);
        SzError::ImportParse {
            message: e.to_string(),
        }
    })
}

/// Replaces the collection with the payload's notes once `confirmation` agrees.
///
/// A payload that does not parse leaves the repository and the store untouched.
pub fn import_backup<S: KeyValueStore>(
    repo: &mut NoteRepository<S>,
    payload: &[u8],
    confirmation: &mut dyn Confirmation,
) -> Result<ImportOutcome> {
    let notes = parse_backup(payload)?;

    let prompt = ConfirmPrompt::ReplaceCollection {
        incoming: notes.len(),
        current: repo.len(),
    };
    if !confirmation.confirm(&prompt) {
        debug!("Import of {} notes declined", notes.len());
        return Ok(ImportOutcome::Declined);
    }

    let count = notes.len();
    repo.replace_all(notes)?;
    info!("Imported {} notes", count);
    Ok(ImportOutcome::Replaced { count })
}

#[cfg(test)]
mod tests {
    use crate::{store::MemoryStore, AlwaysConfirm, NeverConfirm, NOTES_KEY};

    use super::*;

    #[test]
    fn export_without_stored_notes_is_no_data() {
        let store = MemoryStore::new();
        let repo = NoteRepository::initialize(&store);
        assert!(matches!(export_backup(&repo), Err(SzError::NoData)));
        assert!(repo.list().is_empty());
    }

    #[test]
    fn export_is_the_stored_record_byte_for_byte() {
        let store = MemoryStore::new();
        let mut repo = NoteRepository::initialize(&store);
        repo.create("one", None, "a, b").unwrap();

        let file = export_backup(&repo).unwrap();
        assert_eq!(Some(file.contents.clone()), store.get(NOTES_KEY).unwrap());
        assert!(file.file_name.starts_with("sistematiza_backup_"));
        assert!(file.file_name.ends_with(".json"));
        assert_eq!(file.mime_type, "application/json");
    }

    #[test]
    fn export_reads_the_store_not_memory() {
        let store = MemoryStore::new();
        store.set(NOTES_KEY, "[]").unwrap();
        let repo = NoteRepository::initialize(&store);
        store.set(NOTES_KEY, r#"[{"id":9}]"#).unwrap();

        assert_eq!(export_backup(&repo).unwrap().contents, r#"[{"id":9}]"#);
    }

    #[test]
    fn malformed_payloads_are_parse_errors() {
        let payloads: [&[u8]; 5] = [
            b"{not json",
            b"{\"id\": 1}",
            b"\"text\"",
            b"[{\"tags\": 5}]",
            &[0xff, 0xfe, 0x00],
        ];
        for payload in payloads {
            assert!(
                matches!(parse_backup(payload), Err(SzError::ImportParse { .. })),
                "payload {:?} should be rejected",
                payload
            );
        }
    }

    #[test]
    fn bom_and_foreign_records_are_accepted() {
        let payload = "\u{feff}[{\"id\":1,\"content\":\"x\",\"category\":\"Other\",\"tags\":[],\"date\":\"\"},{\"id\":1}]";
        let notes = parse_backup(payload.as_bytes()).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].category, "Other");
        assert_eq!(notes[1].id, 1);
    }

    #[test]
    fn failed_parse_leaves_everything_untouched() {
        let store = MemoryStore::new();
        let mut repo = NoteRepository::initialize(&store);
        repo.create("keep me", None, "").unwrap();
        let before = repo.list().to_vec();
        let stored_before = store.get(NOTES_KEY).unwrap();

        let mut asked = false;
        let mut confirm = |_: &ConfirmPrompt| {
            asked = true;
            true
        };
        let result = import_backup(&mut repo, b"{not json", &mut confirm);

        assert!(matches!(result, Err(SzError::ImportParse { .. })));
        assert!(!asked);
        assert_eq!(repo.list(), before.as_slice());
        assert_eq!(store.get(NOTES_KEY).unwrap(), stored_before);
    }

    #[test]
    fn declined_import_changes_nothing() {
        let store = MemoryStore::new();
        let mut repo = NoteRepository::initialize(&store);
        repo.create("keep me", None, "").unwrap();

        let outcome = import_backup(&mut repo, b"[]", &mut NeverConfirm).unwrap();
        assert_eq!(outcome, ImportOutcome::Declined);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn confirmed_import_replaces_without_merging() {
        let store = MemoryStore::new();
        let mut repo = NoteRepository::initialize(&store);
        repo.create("old", None, "").unwrap();

        let payload = r#"[{"id":5,"content":"new","category":"🤖 IA","tags":["x"],"date":"d"}]"#;
        let outcome = import_backup(&mut repo, payload.as_bytes(), &mut AlwaysConfirm).unwrap();

        assert_eq!(outcome, ImportOutcome::Replaced { count: 1 });
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list()[0].content, "new");
        assert_eq!(store.get(NOTES_KEY).unwrap().as_deref(), Some(payload));
    }
}
