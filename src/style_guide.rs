//! The style guide: one free-text blob under its own store key.
use log::{debug, info};

use crate::{
    store::{KeyValueStore, STYLE_KEY},
    Result,
};

pub struct StyleGuideStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StyleGuideStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored text, or an empty string if it was never saved.
    pub fn get(&self) -> Result<String> {
        let text = self.store.get(STYLE_KEY)?;
        if text.is_none() {
            debug!("No style guide saved yet");
        }
        Ok(text.unwrap_or_default())
    }

    /// Stores `text` verbatim (raw, not JSON-encoded).
    pub fn set(&self, text: &str) -> Result<()> {
        self.store.set(STYLE_KEY, text)?;
        info!("Saved style guide ({} chars)", text.chars().count());
        Ok(())
    }
}
