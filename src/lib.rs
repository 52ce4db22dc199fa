//! Local-first personal knowledge repository library
//!
//! This library records short notes, classifies them into a fixed set of
//! categories, tags them, and retrieves them by category and free-text search.
//! State lives in a device-local key-value store; backups are the persisted
//! notes record itself.

mod backup;
mod category;
mod cli;
mod clock;
mod confirm;
mod config;
mod errors;
pub mod helper;
mod markdown;
mod note;
mod repository;
mod search;
pub mod store;
mod style_guide;
mod types;

// Re-export key components
pub use backup::*;
pub use category::*;
pub use cli::*;
pub use clock::*;
pub use confirm::*;
pub use config::*;
pub use errors::*;
pub use markdown::*;
pub use note::*;
pub use repository::*;
pub use search::*;
pub use store::{FileStore, KeyValueStore, MemoryStore, NOTES_KEY, STYLE_KEY};
pub use style_guide::*;
pub use types::*;
