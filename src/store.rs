//! Persistent key-value stores the repository writes through.
//!
//! The store is a synchronous, device-local map from string keys to string
//! values. Callers own a handle to it and pass it in explicitly; nothing here is
//! global.
use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::PathBuf,
    rc::Rc,
};

use log::{debug, error, info, trace};

use crate::{helper::write_atomically, Result, SzError};

/// Key under which the notes collection is persisted
pub const NOTES_KEY: &str = "sistematiza_v1";

/// Key under which the style guide text is persisted
pub const STYLE_KEY: &str = "sistematiza_style";

/// A synchronous scalar store
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value for `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every key, as if the medium had been wiped.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: one file per key, replaced atomically on every write
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates, if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            info!("Creating data directory: {}", dir.display());
            fs::create_dir_all(&dir).map_err(|e| {
                error!("Failed to create data directory {}: {}", dir.display(), e);
                SzError::Io(e)
            })?;
        }
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && key != "."
            && key != "..";
        if !valid {
            return Err(SzError::Store {
                key: key.to_string(),
                message: "key is not a valid file name".to_string(),
            });
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        trace!("Reading key '{}' from {}", key, path.display());

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Key '{}' not present", key);
                Ok(None)
            }
            Err(e) => {
                error!("Failed to read key '{}': {}", key, e);
                Err(SzError::Store {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        write_atomically(&path, value).map_err(|e| SzError::Store {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}
