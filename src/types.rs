//! Shared types for the sistematiza application.
//!
//! This module holds the Result alias, the file artifact produced by exports,
//! and the CLI subcommands.
use std::path::{Path, PathBuf};

use clap::Subcommand;
use log::info;

use crate::{helper::write_atomically, NoteId, SzError};

/// A specialized Result type for sistematiza operations.
pub type Result<T> = std::result::Result<T, SzError>;

/// A document produced by an export, ready to be handed to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Suggested file name, e.g. `nota_<id>.md`
    pub file_name: String,
    /// MIME type of `contents`
    pub mime_type: String,
    /// UTF-8 document body
    pub contents: String,
}

impl ExportedFile {
    /// Writes the document as `dir/<file_name>` and returns the full path.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        write_atomically(&path, &self.contents)?;
        info!("Exported {} ({})", path.display(), self.mime_type);
        Ok(path)
    }
}

/// Available subcommands for the sistematiza application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Archive a new note
    Add {
        /// Content of the note
        content: Option<String>,

        /// Category (identifier, key or label); defaults to the inbox
        #[clap(short, long)]
        category: Option<String>,

        /// Tags to associate with the note (comma-separated)
        #[clap(short, long, default_value = "")]
        tags: String,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,
    },

    /// List notes, optionally filtered by category and search text
    List {
        /// Category selector: `all` or a category
        #[clap(short, long, default_value = "all")]
        category: String,

        /// Text to look for in content and tags
        #[clap(short, long, default_value = "")]
        query: String,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,

        /// Only show note IDs and a one-line preview
        #[clap(short, long)]
        brief: bool,
    },

    /// Search notes by content and tags
    Search {
        /// Search query text
        query: String,

        /// Category selector: `all` or a category
        #[clap(short, long, default_value = "all")]
        category: String,
    },

    /// Print a note as markdown
    Show {
        /// ID of the note to show
        id: NoteId,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: NoteId,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Export one note as a markdown file
    Export {
        /// ID of the note to export
        id: NoteId,

        /// Directory to write into (default uses config setting)
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a full backup of the collection
    Backup {
        /// Directory to write into (default uses config setting)
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the collection with the notes in a backup file
    Import {
        /// Path to the backup file
        file: PathBuf,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Show or replace the style guide
    Style {
        #[clap(subcommand)]
        action: StyleAction,
    },

    /// List the available categories
    Categories,
}

/// Style guide operations
#[derive(Subcommand, Debug)]
pub enum StyleAction {
    /// Print the saved style guide
    Show,

    /// Save a new style guide
    Set {
        /// New style guide text
        text: Option<String>,

        /// Edit the current style guide in the editor
        #[clap(short, long)]
        edit: bool,
    },
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn write_into_uses_file_name() {
        let dir = TempDir::new().unwrap();
        let file = ExportedFile {
            file_name: "nota_1.md".to_string(),
            mime_type: "text/markdown".to_string(),
            contents: "# x".to_string(),
        };

        let path = file.write_into(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("nota_1.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# x");
    }
}
