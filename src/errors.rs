//! Error types for the sistematiza application.
//!
//! This module defines the error kinds that can surface from the note
//! repository, the backup protocol and the command-line layer.

use std::io;

use thiserror::Error;

/// The main error type for the sistematiza application.
#[derive(Error, Debug)]
pub enum SzError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A note could not be created from the given input.
    #[error("Invalid note: {message}")]
    Validation { message: String },

    /// The input does not name a known category.
    #[error("Unknown category: {input}")]
    UnknownCategory { input: String },

    /// Full export attempted before anything was ever persisted.
    #[error("Nenhum dado para exportar.")]
    NoData,

    /// The import payload is not a JSON array of notes.
    #[error("Erro ao importar arquivo: {message}")]
    ImportParse { message: String },

    /// The key-value store failed to read or write a key.
    #[error("Store error on key '{key}': {message}")]
    Store { key: String, message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: i64 },

    #[error("{message}")]
    EditorError { message: String },
}

impl SzError {
    /// Whether the error is one the user is told about in a notice instead of
    /// a failure exit.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            SzError::Validation { .. } | SzError::NoData | SzError::ImportParse { .. }
        )
    }
}
